use crate::core::models::spec::{ResidueSpecifier, SpecError};
use crate::core::models::structure::Structure;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Invalid residue specifier: {0}")]
    InvalidSpec(#[from] SpecError),

    /// Both specifiers carry explicit chains and they differ.
    #[error("Residue specifiers {first} and {last} name different chains")]
    InconsistentChains {
        first: ResidueSpecifier,
        last: ResidueSpecifier,
    },

    #[error("Zone {first} to {last} not found in structure")]
    ZoneNotFound {
        first: ResidueSpecifier,
        last: ResidueSpecifier,
    },
}

/// Parses two `[chain]resnum[insert]` strings and extracts the zone between them.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidSpec`] for malformed specifiers, otherwise see
/// [`extract_zone_by_spec`].
pub fn extract_zone(structure: &Structure, first: &str, last: &str) -> Result<Structure, ZoneError> {
    let first: ResidueSpecifier = first.parse()?;
    let last: ResidueSpecifier = last.parse()?;
    extract_zone_by_spec(structure, &first, &last)
}

/// Copies every atom from the first atom of residue `first` through the last
/// atom of residue `last`, in file order.
///
/// A chain given on only one specifier applies to both; with no chain at all
/// the zone is confined to the chain in which `first` is found. The returned
/// structure has no header lines and shares nothing with `structure`.
///
/// # Errors
///
/// * [`ZoneError::InconsistentChains`] - the specifiers name two chains.
/// * [`ZoneError::ZoneNotFound`] - `first` is absent, or `last` does not
///   occur at or after it in the same chain.
pub fn extract_zone_by_spec(
    structure: &Structure,
    first: &ResidueSpecifier,
    last: &ResidueSpecifier,
) -> Result<Structure, ZoneError> {
    let (first, mut last) = match (&first.chain, &last.chain) {
        (Some(a), Some(b)) if a != b => {
            return Err(ZoneError::InconsistentChains {
                first: first.clone(),
                last: last.clone(),
            });
        }
        (None, Some(chain)) => (
            ResidueSpecifier {
                chain: Some(chain.clone()),
                ..first.clone()
            },
            last.clone(),
        ),
        _ => (first.clone(), last.clone()),
    };

    let not_found = |first: &ResidueSpecifier, last: &ResidueSpecifier| ZoneError::ZoneNotFound {
        first: first.clone(),
        last: last.clone(),
    };

    let atoms = &structure.atoms;
    let start = atoms
        .iter()
        .position(|atom| first.matches(atom))
        .ok_or_else(|| not_found(&first, &last))?;
    last.chain = Some(atoms[start].chain.clone());

    let end_residue = start
        + atoms[start..]
            .iter()
            .position(|atom| last.matches(atom))
            .ok_or_else(|| not_found(&first, &last))?;
    let end = end_residue
        + atoms[end_residue..]
            .iter()
            .take_while(|atom| last.matches(atom))
            .count();

    debug!(
        "Extracted zone {} to {}: {} atom(s).",
        first,
        last,
        end - start
    );
    Ok(Structure::from_atoms(atoms[start..end].to_vec()))
}
