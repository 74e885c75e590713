use crate::core::io::columns::{FixedColumns, MalformedLine, slice_and_trim};
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::{AtomOrigin, AtomRecord, ParseRecordTypeError, RecordType, pad_name};
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use phf::{Set, phf_set};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Coordinates end in column 54; anything shorter cannot be an atom record.
const MIN_ATOM_LINE_LEN: usize = 54;

static COORDINATE_RECORDS: Set<&'static str> = phf_set! { "ATOM", "HETATM" };

static DROPPED_RECORDS: Set<&'static str> = phf_set! {
    "TER", "END", "CONECT", "MASTER", "ANISOU", "SIGATM", "SIGUIJ",
};

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("No ATOM/HETATM records found")]
    NoAtoms,
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Malformed record: {0}")]
    Malformed(#[from] MalformedLine),
    #[error(transparent)]
    RecordType(#[from] ParseRecordTypeError),
}

fn parse_int<T: FromStr>(
    cols: &FixedColumns<'_>,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<T, PdbParseErrorKind> {
    let value = cols.field(start, end)?;
    if value.is_empty() {
        return Err(PdbParseErrorKind::MissingRequiredField { columns });
    }
    value.parse().map_err(|_| PdbParseErrorKind::InvalidInt {
        columns,
        value: value.to_string(),
    })
}

fn parse_float(
    cols: &FixedColumns<'_>,
    start: usize,
    end: usize,
    columns: &'static str,
    default: Option<f64>,
) -> Result<f64, PdbParseErrorKind> {
    let value = cols.field(start, end)?;
    match (value.is_empty(), default) {
        (true, Some(default)) => Ok(default),
        (true, None) => Err(PdbParseErrorKind::MissingRequiredField { columns }),
        (false, _) => value.parse().map_err(|_| PdbParseErrorKind::InvalidFloat {
            columns,
            value: value.to_string(),
        }),
    }
}

/// Parses one `ATOM`/`HETATM` line.
pub fn parse_atom_line(line: &str) -> Result<AtomRecord, PdbParseErrorKind> {
    let cols = FixedColumns::new(line, MIN_ATOM_LINE_LEN)?;

    let record_type = RecordType::from_str(cols.field(0, 6)?)?;
    let serial: usize = parse_int(&cols, 6, 11, "7-11")?;
    let name = cols.raw(12, 16)?;
    if name.trim().is_empty() {
        return Err(PdbParseErrorKind::MissingRequiredField { columns: "13-16" });
    }
    let chain = match cols.char_at(21)? {
        ' ' => String::new(),
        c => c.to_string(),
    };
    let res_seq: isize = parse_int(&cols, 22, 26, "23-26")?;
    let x = parse_float(&cols, 30, 38, "31-38", None)?;
    let y = parse_float(&cols, 38, 46, "39-46", None)?;
    let z = parse_float(&cols, 46, 54, "47-54", None)?;
    let occupancy = parse_float(&cols, 54, 60, "55-60", Some(1.0))?;
    let temp_factor = parse_float(&cols, 60, 66, "61-66", Some(0.0))?;

    Ok(AtomRecord {
        record_type,
        serial,
        name: pad_name(name),
        alt_loc: cols.char_at(16)?,
        res_name: cols.field(17, 21)?.to_string(),
        chain,
        res_seq,
        insertion: cols.char_at(26)?,
        position: Point3::new(x, y, z),
        occupancy,
        temp_factor,
        element: cols.field(76, 78)?.to_string(),
        origin: AtomOrigin::Observed,
    })
}

const SERIAL_MODULUS: usize = 100_000;
const RES_SEQ_WIDTH: usize = 4;

fn fits_width(value: isize, width: usize) -> bool {
    value.to_string().len() <= width
}

/// Formats one coordinate record in the PDB fixed-column layout.
///
/// Only the first character of multi-character chain labels fits the chain
/// column. Serials above 99999 wrap around; residue numbers outside
/// -999..=9999 overflow their field. Both are logged as warnings.
pub fn format_atom_line(atom: &AtomRecord) -> String {
    let chain = atom.chain.chars().next().unwrap_or(' ');
    let record = atom.record_type.to_string();
    let serial = atom.serial % SERIAL_MODULUS;
    if serial != atom.serial {
        warn!(
            "Atom serial {} does not fit columns 7-11, written as {}.",
            atom.serial, serial
        );
    }
    if !fits_width(atom.res_seq, RES_SEQ_WIDTH) {
        warn!(
            "Residue number {} of atom {} does not fit columns 23-26; the rest of the record is shifted.",
            atom.res_seq, atom.serial
        );
    }
    format!(
        "{:<6}{:>5} {}{}{}{}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
        record,
        serial,
        pad_name(&atom.name),
        atom.alt_loc,
        pad_name(&atom.res_name),
        chain,
        atom.res_seq,
        atom.insertion,
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.temp_factor,
        atom.element,
    )
}

/// Streaming PDB writer.
///
/// Several atom groups (an input structure followed by generated records) can
/// be written into one file; a `TER` record closes each chain and
/// [`PdbWriter::finish`] appends the final `END`.
pub struct PdbWriter<W: Write> {
    writer: W,
}

impl<W: Write> PdbWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_header(&mut self, header: &[String]) -> io::Result<()> {
        for line in header {
            writeln!(self.writer, "{}", line)?;
        }
        Ok(())
    }

    pub fn write_atoms(&mut self, atoms: &[AtomRecord]) -> io::Result<()> {
        let mut previous_chain: Option<&str> = None;
        for atom in atoms {
            if previous_chain.is_some_and(|chain| chain != atom.chain) {
                writeln!(self.writer, "TER")?;
            }
            writeln!(self.writer, "{}", format_atom_line(atom))?;
            previous_chain = Some(atom.chain.as_str());
        }
        if previous_chain.is_some() {
            writeln!(self.writer, "TER")?;
        }
        Ok(())
    }

    /// Writes the `END` record, flushes, and hands back the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.writer, "END")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut structure = Structure::new();
        let mut models_seen = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let raw = line_res?;
            let line = raw.trim_end_matches('\r');
            let line_num = line_num + 1;

            let record_type = slice_and_trim(line, 0, 6);
            if record_type.is_empty() {
                continue;
            }

            match record_type {
                "MODEL" => {
                    models_seen += 1;
                    if models_seen > 1 {
                        break;
                    }
                }
                "ENDMDL" => break,
                r if COORDINATE_RECORDS.contains(r) => {
                    let atom = parse_atom_line(line).map_err(|kind| PdbError::Parse {
                        line: line_num,
                        kind,
                    })?;
                    structure.atoms.push(atom);
                }
                r if DROPPED_RECORDS.contains(r) => {}
                _ => structure.header.push(line.to_string()),
            }
        }

        if structure.atoms.is_empty() {
            return Err(PdbError::NoAtoms);
        }
        Ok(structure)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut pdb_writer = PdbWriter::new(writer);
        pdb_writer.write_header(&structure.header)?;
        pdb_writer.write_atoms(&structure.atoms)?;
        pdb_writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
HEADER    TEST STRUCTURE                          01-JAN-00   1ABC
REMARK 350 APPLY THE FOLLOWING TO CHAINS: A
ATOM      1  N   ALA A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  ALA A   1      11.639   6.071  -5.147  1.00 12.50           C
ATOM      3  CA  GLY A   2A     12.000   7.000  -4.000  0.50  3.00           C
TER
HETATM    4 CA    CA B 101       1.000   2.000   3.000  1.00  0.00          CA
END
";

    fn read(text: &str) -> Result<Structure, PdbError> {
        PdbFile::read_from(&mut Cursor::new(text))
    }

    #[test]
    fn reads_atoms_and_header_lines_in_order() {
        let structure = read(SAMPLE).unwrap();
        assert_eq!(structure.header.len(), 2);
        assert!(structure.header[1].starts_with("REMARK 350 APPLY"));
        assert_eq!(structure.atoms.len(), 4);

        let ca = &structure.atoms[1];
        assert_eq!(ca.serial, 2);
        assert_eq!(ca.name, " CA ");
        assert_eq!(ca.res_name, "ALA");
        assert_eq!(ca.chain, "A");
        assert_eq!(ca.res_seq, 1);
        assert_eq!(ca.position, Point3::new(11.639, 6.071, -5.147));
        assert_eq!(ca.temp_factor, 12.5);
        assert_eq!(ca.element, "C");
    }

    #[test]
    fn reads_insertion_codes_and_hetatm_records() {
        let structure = read(SAMPLE).unwrap();
        assert_eq!(structure.atoms[2].insertion, 'A');
        assert_eq!(structure.atoms[2].occupancy, 0.5);

        let calcium = &structure.atoms[3];
        assert_eq!(calcium.record_type, RecordType::Hetatm);
        assert_eq!(calcium.name, "CA  ");
        assert_eq!(calcium.padded_name(), "CA  ");
        assert_eq!(calcium.chain, "B");
    }

    #[test]
    fn short_atom_line_is_a_parse_error_not_a_panic() {
        let err = read("ATOM      1  N   ALA A   1      11.104\n").unwrap_err();
        assert!(matches!(
            err,
            PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::Malformed(MalformedLine::TooShort { .. })
            }
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_reported_with_columns() {
        let line = "ATOM      1  N   ALA A   1      11.104   abcde  -6.504  1.00  0.00           N\n";
        match read(line).unwrap_err() {
            PdbError::Parse {
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
                ..
            } => {
                assert_eq!(columns, "39-46");
                assert_eq!(value, "abcde");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn file_without_atoms_is_rejected() {
        assert!(matches!(read("HEADER    EMPTY\nEND\n"), Err(PdbError::NoAtoms)));
    }

    #[test]
    fn only_the_first_model_is_read() {
        let text = "\
MODEL        1
ATOM      1  CA  ALA A   1       1.000   1.000   1.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  ALA A   1       9.000   9.000   9.000  1.00  0.00           C
ENDMDL
";
        let structure = read(text).unwrap();
        assert_eq!(structure.atoms.len(), 1);
        assert_eq!(structure.atoms[0].position.x, 1.0);
    }

    #[test]
    fn formatted_atom_line_keeps_fixed_columns() {
        let structure = read(SAMPLE).unwrap();
        let line = format_atom_line(&structure.atoms[2]);
        assert_eq!(&line[0..6], "ATOM  ");
        assert_eq!(&line[6..11], "    3");
        assert_eq!(&line[12..16], " CA ");
        assert_eq!(&line[17..21], "GLY ");
        assert_eq!(&line[21..22], "A");
        assert_eq!(&line[22..26], "   2");
        assert_eq!(&line[26..27], "A");
        assert_eq!(&line[30..38], "  12.000");
        assert_eq!(&line[46..54], "  -4.000");
        assert_eq!(&line[54..60], "  0.50");
        assert_eq!(&line[60..66], "  3.00");
        assert_eq!(&line[76..78], " C");
    }

    #[test]
    fn record_tag_is_parsed_into_the_record_type() {
        let line = "ATOM      1  CA  ALA A   1       1.000   2.000   3.000  1.00  0.00           C";
        assert_eq!(parse_atom_line(line).unwrap().record_type, RecordType::Atom);
        assert!(matches!(
            parse_atom_line(&line.replacen("ATOM  ", "ANISOU", 1)),
            Err(PdbParseErrorKind::RecordType(ParseRecordTypeError(tag))) if tag == "ANISOU"
        ));
    }

    #[test]
    fn oversized_serials_wrap_and_keep_the_layout() {
        let mut atom = read(SAMPLE).unwrap().atoms[0].clone();
        atom.serial = 123_456;
        let line = format_atom_line(&atom);
        assert_eq!(&line[6..11], "23456");
        assert_eq!(line.len(), 78);
    }

    #[test]
    fn residue_number_width_check() {
        assert!(fits_width(9999, RES_SEQ_WIDTH));
        assert!(fits_width(-999, RES_SEQ_WIDTH));
        assert!(!fits_width(10000, RES_SEQ_WIDTH));
        assert!(!fits_width(-1000, RES_SEQ_WIDTH));
    }

    #[test]
    fn written_structure_reads_back_identically() {
        let structure = read(SAMPLE).unwrap();
        let mut buffer = Vec::new();
        PdbFile::write_to(&structure, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with("END\n"));
        assert_eq!(text.matches("TER").count(), 2);

        let reread = read(&text).unwrap();
        assert_eq!(reread, structure);
    }

    #[test]
    fn path_round_trip_uses_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdb");
        let structure = read(SAMPLE).unwrap();

        PdbFile::write_to_path(&structure, &path).unwrap();
        let reread = PdbFile::read_from_path(&path).unwrap();
        assert_eq!(reread.atoms, structure.atoms);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("absent.pdb"));
        assert!(matches!(result, Err(PdbError::Io(_))));
    }
}
