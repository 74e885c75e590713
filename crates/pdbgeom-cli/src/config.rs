pub mod defaults;

use self::defaults::DefaultsConfig;
use crate::cli::{LineCli, SymmCli};
use crate::error::{CliError, Result};
use pdbgeom::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLineConfig {
    #[serde(rename = "residue-name")]
    residue_name: Option<String>,
    #[serde(rename = "atom-name")]
    atom_name: Option<String>,
    #[serde(rename = "chain-label")]
    chain_label: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSymmetryConfig {
    #[serde(rename = "start-after")]
    start_after: Option<char>,
    #[serde(rename = "avoid-existing-labels")]
    avoid_existing_labels: Option<bool>,
    #[serde(rename = "skip-degraded")]
    skip_degraded: Option<bool>,
}

/// Settings read from a TOML file; every key is optional.
///
/// ```toml
/// [line]
/// residue-name = "AXS"
/// atom-name = "P"
/// chain-label = "X"
///
/// [symmetry]
/// start-after = "Z"
/// avoid-existing-labels = true
/// skip-degraded = false
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    line: Option<PartialLineConfig>,
    symmetry: Option<PartialSymmetryConfig>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Command-line flags override file values, which override the defaults.
    pub fn merge_line_args(self, args: &LineCli) -> Result<core_config::LineConfig> {
        let defaults = DefaultsConfig::default();
        let file = self.line.unwrap_or_default();

        core_config::LineConfigBuilder::new()
            .residue_name(
                args.residue_name
                    .clone()
                    .or(file.residue_name)
                    .unwrap_or(defaults.residue_name),
            )
            .atom_name(
                args.atom_name
                    .clone()
                    .or(file.atom_name)
                    .unwrap_or(defaults.atom_name),
            )
            .chain(
                args.chain
                    .clone()
                    .or(file.chain_label)
                    .unwrap_or(defaults.chain_label),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_symmetry_args(self, args: &SymmCli) -> Result<core_config::SymmetryConfig> {
        let defaults = DefaultsConfig::default();
        let file = self.symmetry.unwrap_or_default();

        let avoid_existing_labels = if args.reuse_labels {
            false
        } else {
            file.avoid_existing_labels
                .unwrap_or(defaults.avoid_existing_labels)
        };
        let skip_degraded = args.skip_degraded || file.skip_degraded.unwrap_or(defaults.skip_degraded);

        core_config::SymmetryConfigBuilder::new()
            .label_cursor(
                args.start_after
                    .or(file.start_after)
                    .unwrap_or(defaults.start_after),
            )
            .avoid_existing_labels(avoid_existing_labels)
            .skip_degraded(skip_degraded)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}
