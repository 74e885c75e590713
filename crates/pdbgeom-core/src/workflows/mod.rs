//! # Workflows Module
//!
//! Top-level entry points, one per tool:
//!
//! - **Line Workflow** ([`line`]) - zone extraction, CA table, best-fit line.
//! - **Symmetry Workflow** ([`symmetry`]) - BIOMT operators applied to the
//!   chains they name.

pub mod line;
pub mod symmetry;
