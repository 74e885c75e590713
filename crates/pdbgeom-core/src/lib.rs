//! # pdbgeom Core Library
//!
//! Geometric post-processing of PDB coordinate files: fitting a best-fit line
//! through the alpha carbons of a residue zone, and expanding a structure into
//! its biological assembly from the `REMARK 350` BIOMT operators.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Atom records and structures, fixed-column PDB
//!   reading and writing, and the geometric primitives (line fit, affine
//!   transform, chain-label sequence).
//!
//! - **[`engine`]: The Logic Core.** Zone extraction, the CA coordinate table,
//!   the line renderer, and the BIOMT operator parser and expander.
//!
//! - **[`workflows`]: The Public API.** End-to-end pipelines that take a parsed
//!   [`core::models::structure::Structure`] and return everything the
//!   command-line tools write out.

pub mod core;
pub mod engine;
pub mod workflows;
