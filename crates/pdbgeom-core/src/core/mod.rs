//! # Core Module
//!
//! Stateless building blocks shared by both pipelines.
//!
//! - **Structure Representation** ([`models`]) - atom records, structures, residue specifiers
//! - **File I/O** ([`io`]) - fixed-column slicing and PDB reading/writing
//! - **Utilities** ([`utils`]) - line fitting, affine transforms, and the chain-label sequence

pub mod io;
pub mod models;
pub mod utils;
