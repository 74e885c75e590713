pub mod config;
pub mod coords;
pub mod error;
pub mod line;
pub mod symmetry;
pub mod zone;
