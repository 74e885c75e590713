use super::atom::AtomRecord;
use std::collections::HashSet;

/// A parsed structure: header text lines followed by coordinate records.
///
/// Both sequences keep file order. Every record is owned by the structure;
/// the copy helpers below return fresh records that share nothing with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// Non-coordinate records (`HEADER`, `REMARK`, `SEQRES`, ...), verbatim.
    pub header: Vec<String>,
    /// Coordinate records in file order.
    pub atoms: Vec<AtomRecord>,
}

impl Structure {
    /// Creates an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header-less structure holding `atoms`.
    pub fn from_atoms(atoms: Vec<AtomRecord>) -> Self {
        Self {
            header: Vec::new(),
            atoms,
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Distinct chain labels in order of first appearance.
    pub fn chain_labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.atoms
            .iter()
            .filter(|atom| seen.insert(atom.chain.as_str()))
            .map(|atom| atom.chain.clone())
            .collect()
    }

    /// Copies every atom of chain `chain`, in file order.
    ///
    /// # Return
    ///
    /// Returns `None` if the structure holds no atom with that label.
    pub fn chain_copy(&self, chain: &str) -> Option<Vec<AtomRecord>> {
        let copy: Vec<AtomRecord> = self
            .atoms
            .iter()
            .filter(|atom| atom.chain == chain)
            .cloned()
            .collect();
        if copy.is_empty() { None } else { Some(copy) }
    }

    /// Atoms whose 4-character padded name equals `padded_name`.
    pub fn atoms_named<'a>(&'a self, padded_name: &'a str) -> impl Iterator<Item = &'a AtomRecord> {
        self.atoms
            .iter()
            .filter(move |atom| atom.padded_name() == padded_name)
    }

    /// The largest serial number in use, or 0 for an empty structure.
    pub fn max_serial(&self) -> usize {
        self.atoms.iter().map(|atom| atom.serial).max().unwrap_or(0)
    }
}
