use pdbgeom::core::utils::labels::DEFAULT_CURSOR;
use pdbgeom::engine::config::{DEFAULT_LINE_ATOM_NAME, DEFAULT_LINE_CHAIN, DEFAULT_LINE_RESIDUE_NAME};

/// Values used when neither the command line nor the config file sets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsConfig {
    pub residue_name: String,
    pub atom_name: String,
    pub chain_label: String,
    pub start_after: char,
    pub avoid_existing_labels: bool,
    pub skip_degraded: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            residue_name: DEFAULT_LINE_RESIDUE_NAME.to_string(),
            atom_name: DEFAULT_LINE_ATOM_NAME.to_string(),
            chain_label: DEFAULT_LINE_CHAIN.to_string(),
            start_after: DEFAULT_CURSOR,
            avoid_existing_labels: true,
            skip_degraded: false,
        }
    }
}
