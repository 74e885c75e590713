//! Shared implementation of the `pdbline` and `pdbsymm` command-line tools.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
