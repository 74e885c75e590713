use super::{read_structure, write_output};
use crate::cli::SymmCli;
use crate::config::PartialConfig;
use crate::error::Result;
use pdbgeom::core::io::pdb::PdbWriter;
use pdbgeom::core::models::atom::AtomRecord;
use pdbgeom::core::models::structure::Structure;
use pdbgeom::workflows::{self, symmetry::SymmetryResult};
use tracing::info;

pub fn run(args: &SymmCli) -> Result<()> {
    let config = PartialConfig::load(args.common.config.as_deref())?.merge_symmetry_args(args)?;
    let structure = read_structure(args.input.as_deref())?;

    let result = workflows::symmetry::run(&structure, &config)?;
    if !result.warnings.is_empty() {
        info!("{} warning(s) raised while applying symmetry.", result.warnings.len());
    }

    let rendered = render(&structure, &result)?;
    write_output(args.output.as_deref(), &rendered)
}

/// Header lines, the input atoms, then every generated chain.
pub fn render(structure: &Structure, result: &SymmetryResult) -> Result<Vec<u8>> {
    let copies: Vec<AtomRecord> = result.copy_atoms().cloned().collect();
    let mut writer = PdbWriter::new(Vec::new());
    writer.write_header(&structure.header)?;
    writer.write_atoms(&structure.atoms)?;
    writer.write_atoms(&copies)?;
    Ok(writer.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pdbgeom::core::io::pdb::PdbFile;
    use pdbgeom::core::io::traits::StructureFile;
    use std::ffi::OsStr;
    use std::fs;

    const ASSEMBLY: &str = "\
HEADER    SYMMETRY TEST
REMARK 350 APPLY THE FOLLOWING TO CHAINS: A, B
REMARK 350   BIOMT1   1  1.000000  0.000000  0.000000        0.00000
REMARK 350   BIOMT2   1  0.000000  1.000000  0.000000        0.00000
REMARK 350   BIOMT3   1  0.000000  0.000000  1.000000        0.00000
REMARK 350   BIOMT1   2  1.000000  0.000000  0.000000        0.00000
REMARK 350   BIOMT2   2  0.000000  1.000000  0.000000        0.00000
REMARK 350   BIOMT3   2  0.000000  0.000000 -1.000000       10.00000
ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C
TER
ATOM      2  CA  GLY B   1       0.000   0.000  -4.000  1.00  0.00           C
TER
END
";

    #[test]
    fn appends_relabeled_copies_after_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        fs::write(&input, ASSEMBLY).unwrap();

        let args = SymmCli::parse_from([OsStr::new("pdbsymm"), input.as_os_str(), output.as_os_str()]);
        run(&args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let records: Vec<&str> = written.lines().collect();
        assert_eq!(records[0], "HEADER    SYMMETRY TEST");
        assert_eq!(records.iter().filter(|r| r.starts_with("REMARK 350")).count(), 7);

        let atoms: Vec<&str> = records.iter().copied().filter(|r| r.starts_with("ATOM")).collect();
        assert_eq!(atoms.len(), 4);
        assert!(atoms[2].starts_with("ATOM      3  CA  ALA 1   1       1.000   2.000   7.000"));
        assert!(atoms[3].starts_with("ATOM      4  CA  GLY 2   1       0.000   0.000  14.000"));
        assert_eq!(records.iter().filter(|r| **r == "TER").count(), 4);
        assert_eq!(records.last(), Some(&"END"));
    }

    #[test]
    fn structure_without_operators_gets_no_copies() {
        let text = "ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C\n";
        let structure = PdbFile::read_from(&mut text.as_bytes()).unwrap();
        let result = workflows::symmetry::run(&structure, &Default::default()).unwrap();
        assert!(result.copies.is_empty());

        let rendered = String::from_utf8(render(&structure, &result).unwrap()).unwrap();
        assert_eq!(rendered, format!("{}TER\nEND\n", text));
    }
}
