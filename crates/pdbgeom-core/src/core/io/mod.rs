//! Provides input/output functionality for structure files.
//!
//! This module contains the fixed-column slicing helpers shared by every record
//! parser in the crate, the [`traits::StructureFile`] interface, and the PDB
//! implementation of it.

pub mod columns;
pub mod pdb;
pub mod traits;
