pub mod line;
pub mod symm;

use crate::error::{CliError, Result};
use pdbgeom::core::io::pdb::PdbFile;
use pdbgeom::core::io::traits::StructureFile;
use pdbgeom::core::models::structure::Structure;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Reads a PDB structure from `input`, or from stdin when no path is given.
pub fn read_structure(input: Option<&Path>) -> Result<Structure> {
    let structure = match input {
        Some(path) => {
            info!("Loading input structure from {:?}", path);
            PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?
        }
        None => {
            info!("Loading input structure from stdin");
            PdbFile::read_from(&mut io::stdin().lock())?
        }
    };
    info!(
        "Read {} atoms and {} header lines.",
        structure.len(),
        structure.header.len()
    );
    Ok(structure)
}

/// Writes an already rendered file to `output`, or to stdout.
pub fn write_output(output: Option<&Path>, rendered: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            info!("Writing output to {:?}", path);
            std::fs::write(path, rendered)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
