use crate::core::models::atom::NAME_WIDTH;
use crate::core::models::spec::MAX_CHAIN_LABEL_LEN;
use crate::core::utils::labels::{DEFAULT_CURSOR, is_chain_label};
use thiserror::Error;

pub const DEFAULT_LINE_RESIDUE_NAME: &str = "LIN";
pub const DEFAULT_LINE_ATOM_NAME: &str = "X";
pub const DEFAULT_LINE_CHAIN: &str = "X";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Naming applied to every pseudo-atom of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStyle {
    pub residue_name: String,
    pub atom_name: String,
    pub chain: String,
}

impl LineStyle {
    /// Upper-cases both names and truncates them to the 4-column field width.
    pub fn new(residue_name: &str, atom_name: &str, chain: &str) -> Self {
        Self {
            residue_name: normalize_name(residue_name),
            atom_name: normalize_name(atom_name),
            chain: chain.to_string(),
        }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(
            DEFAULT_LINE_RESIDUE_NAME,
            DEFAULT_LINE_ATOM_NAME,
            DEFAULT_LINE_CHAIN,
        )
    }
}

fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .take(NAME_WIDTH)
        .collect::<String>()
        .to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineConfig {
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryConfig {
    /// Cursor position of the chain-label sequence; the first copy gets the
    /// label after it.
    pub label_cursor: char,
    /// Skip labels already used by chains of the input structure.
    pub avoid_existing_labels: bool,
    /// Skip operators whose BIOMT rows could not all be read instead of
    /// applying them with the unreadable rows zero-filled.
    pub skip_degraded: bool,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            label_cursor: DEFAULT_CURSOR,
            avoid_existing_labels: true,
            skip_degraded: false,
        }
    }
}

#[derive(Default)]
pub struct LineConfigBuilder {
    residue_name: Option<String>,
    atom_name: Option<String>,
    chain: Option<String>,
}

impl LineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn residue_name(mut self, name: impl Into<String>) -> Self {
        self.residue_name = Some(name.into());
        self
    }
    pub fn atom_name(mut self, name: impl Into<String>) -> Self {
        self.atom_name = Some(name.into());
        self
    }
    pub fn chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn build(self) -> Result<LineConfig, ConfigError> {
        let residue_name = self
            .residue_name
            .unwrap_or_else(|| DEFAULT_LINE_RESIDUE_NAME.to_string());
        let atom_name = self
            .atom_name
            .unwrap_or_else(|| DEFAULT_LINE_ATOM_NAME.to_string());
        let chain = self.chain.unwrap_or_else(|| DEFAULT_LINE_CHAIN.to_string());

        if residue_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "residue_name",
                reason: "must not be empty".into(),
            });
        }
        if atom_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "atom_name",
                reason: "must not be empty".into(),
            });
        }
        let chain_len = chain.chars().count();
        if chain_len == 0 || chain_len > MAX_CHAIN_LABEL_LEN {
            return Err(ConfigError::InvalidValue {
                parameter: "chain",
                reason: format!("must be 1 to {} characters, got '{}'", MAX_CHAIN_LABEL_LEN, chain),
            });
        }

        Ok(LineConfig {
            style: LineStyle::new(&residue_name, &atom_name, &chain),
        })
    }
}

#[derive(Default)]
pub struct SymmetryConfigBuilder {
    label_cursor: Option<char>,
    avoid_existing_labels: Option<bool>,
    skip_degraded: Option<bool>,
}

impl SymmetryConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label_cursor(mut self, label: char) -> Self {
        self.label_cursor = Some(label);
        self
    }
    pub fn avoid_existing_labels(mut self, avoid: bool) -> Self {
        self.avoid_existing_labels = Some(avoid);
        self
    }
    pub fn skip_degraded(mut self, skip: bool) -> Self {
        self.skip_degraded = Some(skip);
        self
    }

    pub fn build(self) -> Result<SymmetryConfig, ConfigError> {
        let defaults = SymmetryConfig::default();
        let label_cursor = self.label_cursor.unwrap_or(defaults.label_cursor);
        if !is_chain_label(label_cursor) {
            return Err(ConfigError::InvalidValue {
                parameter: "label_cursor",
                reason: format!("'{}' is not one of A-Z, 1-9, a-z", label_cursor),
            });
        }
        Ok(SymmetryConfig {
            label_cursor,
            avoid_existing_labels: self
                .avoid_existing_labels
                .unwrap_or(defaults.avoid_existing_labels),
            skip_degraded: self.skip_degraded.unwrap_or(defaults.skip_degraded),
        })
    }
}
