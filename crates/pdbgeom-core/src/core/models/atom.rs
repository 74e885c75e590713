use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width of the fixed-column atom and residue name fields.
pub const NAME_WIDTH: usize = 4;

/// The coordinate record tag of an atom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordType {
    #[default]
    Atom,
    Hetatm,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown coordinate record type '{0}'")]
pub struct ParseRecordTypeError(pub String);

impl FromStr for RecordType {
    type Err = ParseRecordTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ATOM" => Ok(RecordType::Atom),
            "HETATM" => Ok(RecordType::Hetatm),
            other => Err(ParseRecordTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RecordType::Atom => "ATOM",
                RecordType::Hetatm => "HETATM",
            }
        )
    }
}

/// Where an atom record came from.
///
/// Observed atoms were read from an input file; the other variants mark records
/// synthesized by this crate and carry no physical counterpart of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AtomOrigin {
    #[default]
    Observed,
    /// A point on a fitted best-fit line.
    LinePoint,
    /// A copy of an observed atom generated by a symmetry operator.
    SymmetryCopy,
}

/// A single coordinate record from a PDB file.
///
/// Names are kept as their raw fixed-width fields so that re-serialization
/// preserves the column alignment of the input (e.g. `" CA "` vs `"CA  "`).
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// `ATOM` or `HETATM`.
    pub record_type: RecordType,
    /// Atom serial number.
    pub serial: usize,
    /// The raw 4-column atom name field.
    pub name: String,
    /// Alternate location indicator (`' '` when absent).
    pub alt_loc: char,
    /// Residue name, trimmed.
    pub res_name: String,
    /// Chain label (`""` when blank in the file).
    pub chain: String,
    /// Residue sequence number.
    pub res_seq: isize,
    /// Insertion code (`' '` when absent).
    pub insertion: char,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    pub occupancy: f64,
    /// Temperature (B) factor.
    pub temp_factor: f64,
    /// Element symbol, trimmed; may be empty for old files.
    pub element: String,
    pub origin: AtomOrigin,
}

impl AtomRecord {
    /// Creates an observed `ATOM` record with blank optional fields.
    ///
    /// # Arguments
    ///
    /// * `serial` - The atom serial number.
    /// * `name` - The atom name; short names are aligned the way PDB files
    ///   align single-letter elements (`"CA"` becomes `" CA "`).
    /// * `res_name` - The residue name.
    /// * `chain` - The chain label.
    /// * `res_seq` - The residue number.
    /// * `position` - The atom coordinates.
    pub fn new(
        serial: usize,
        name: &str,
        res_name: &str,
        chain: &str,
        res_seq: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            record_type: RecordType::Atom,
            serial,
            name: align_atom_name(name),
            alt_loc: ' ',
            res_name: res_name.trim().to_string(),
            chain: chain.to_string(),
            res_seq,
            insertion: ' ',
            position,
            occupancy: 1.0,
            temp_factor: 0.0,
            element: String::new(),
            origin: AtomOrigin::Observed,
        }
    }

    /// The atom name with surrounding blanks removed.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// The atom name left-justified and padded (or truncated) to 4 characters.
    ///
    /// This is the form used for name matching, so `" CA "` and `"CA  "` both
    /// compare equal to `"CA  "`.
    pub fn padded_name(&self) -> String {
        pad_name(self.name.trim_start())
    }

    /// Identity of the residue this atom belongs to.
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey {
            chain: self.chain.clone(),
            res_seq: self.res_seq,
            insertion: self.insertion,
        }
    }
}

/// (chain, residue number, insertion code) triple identifying one residue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResidueKey {
    pub chain: String,
    pub res_seq: isize,
    pub insertion: char,
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.chain, self.res_seq)?;
        if self.insertion != ' ' {
            write!(f, "{}", self.insertion)?;
        }
        Ok(())
    }
}

/// Left-justifies `name` in a 4-character field, truncating longer names.
pub fn pad_name(name: &str) -> String {
    let truncated: String = name.chars().take(NAME_WIDTH).collect();
    format!("{:<width$}", truncated, width = NAME_WIDTH)
}

/// Places a bare atom name into the 4-column PDB name field.
///
/// Names shorter than four characters start in the second column, matching
/// the convention for single-letter element symbols.
pub fn align_atom_name(name: &str) -> String {
    let name = name.trim();
    if name.chars().count() >= NAME_WIDTH {
        pad_name(name)
    } else {
        format!(" {:<3}", name)
    }
}
