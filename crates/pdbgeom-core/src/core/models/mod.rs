//! Data models for parsed structures.
//!
//! - [`atom`] - a single coordinate record and its fixed-width name helpers
//! - [`structure`] - the ordered atom list plus header lines of one file
//! - [`spec`] - residue specifiers used to delimit zones

pub mod atom;
pub mod spec;
pub mod structure;
