//! REMARK 350 biological-assembly operators and their application.
//!
//! [`parser`] walks the header lines and yields one operator at a time;
//! [`expander`] applies an operator to the chains it names. Problems found
//! on the way are reported as [`SymmetryWarning`]s and never abort a run.

pub mod expander;
pub mod parser;

use crate::core::utils::labels::LabelsExhausted;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SymmetryWarning {
    #[error("Unreadable BIOMT{row} record at header line {line}, using zeros: {reason}")]
    MalformedRow {
        line: usize,
        row: usize,
        reason: String,
    },

    #[error("Symmetry operator starting at header line {line} has only {rows} of 3 BIOMT rows")]
    TruncatedOperator { line: usize, rows: usize },

    #[error("BIOMT{row} at header line {line} belongs to operator {found}, expected {expected}")]
    InstanceMismatch {
        line: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Chain '{chain}' listed twice at header line {line}")]
    DuplicateChain { line: usize, chain: String },

    #[error("Chain label '{chain}' at header line {line} is longer than 4 characters, ignored")]
    ChainLabelTooLong { line: usize, chain: String },

    #[error("Chain '{chain}' named by symmetry operator {instance} is not in the structure")]
    UnknownChain { chain: String, instance: usize },

    #[error(transparent)]
    LabelsExhausted(#[from] LabelsExhausted),

    #[error("Skipping symmetry operator {instance}: its matrix could not be read completely")]
    DegradedOperatorSkipped { instance: usize },
}

/// Logs `warning` and keeps it for the caller.
pub(crate) fn record_warning(warnings: &mut Vec<SymmetryWarning>, warning: SymmetryWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}
