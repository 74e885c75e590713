use super::config::ConfigError;
use super::line::LineError;
use super::zone::ZoneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Line(#[from] LineError),
}
