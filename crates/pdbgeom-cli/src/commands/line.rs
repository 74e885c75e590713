use super::{read_structure, write_output};
use crate::cli::LineCli;
use crate::config::PartialConfig;
use crate::error::{CliError, Result};
use pdbgeom::core::io::pdb::PdbWriter;
use pdbgeom::core::models::spec::ResidueSpecifier;
use pdbgeom::workflows::{self, line::LineResult};
use tracing::info;

pub fn run(args: &LineCli) -> Result<()> {
    // Reject bad residue specifiers before blocking on stdin.
    for spec in [&args.first, &args.last] {
        spec.parse::<ResidueSpecifier>()
            .map_err(|e| CliError::Argument(format!("'{}': {}", spec, e)))?;
    }
    let config = PartialConfig::load(args.common.config.as_deref())?.merge_line_args(args)?;
    let structure = read_structure(args.input.as_deref())?;

    info!("Fitting line from {} to {}.", args.first, args.last);
    let result = workflows::line::run(&structure, &args.first, &args.last, &config)?;

    let rendered = render(&result)?;
    write_output(args.output.as_deref(), &rendered)
}

/// Line pseudo-atoms, then the zone atoms.
pub fn render(result: &LineResult) -> Result<Vec<u8>> {
    let mut writer = PdbWriter::new(Vec::new());
    writer.write_atoms(&result.line.atoms)?;
    writer.write_atoms(&result.zone.atoms)?;
    Ok(writer.finish()?)
}
