use super::parser::SymmetryOperator;
use super::{SymmetryWarning, record_warning};
use crate::core::models::atom::{AtomOrigin, AtomRecord};
use crate::core::models::structure::Structure;
use crate::core::utils::labels::{ChainLabelSequence, LABEL_SPACE};
use crate::engine::config::SymmetryConfig;
use std::collections::HashSet;
use tracing::debug;

/// A transformed copy of one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainCopy {
    pub source_chain: String,
    pub label: char,
    pub atoms: Vec<AtomRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expansion {
    pub copies: Vec<ChainCopy>,
    pub warnings: Vec<SymmetryWarning>,
}

impl Expansion {
    pub fn atom_count(&self) -> usize {
        self.copies.iter().map(|copy| copy.atoms.len()).sum()
    }
}

/// Applies `operator` to every chain it names.
///
/// Each copy is relabeled with the next label from `labels`. With
/// [`SymmetryConfig::avoid_existing_labels`] set, labels already used by
/// `structure` are passed over. Identity operators produce nothing, since
/// their copies would coincide with the originals.
pub fn expand(
    structure: &Structure,
    operator: &SymmetryOperator,
    labels: &mut ChainLabelSequence,
    config: &SymmetryConfig,
) -> Expansion {
    let mut expansion = Expansion::default();
    if operator.is_identity() {
        debug!("Operator {} is the identity, no copies made.", operator.instance);
        return expansion;
    }

    let occupied: HashSet<String> = if config.avoid_existing_labels {
        structure.chain_labels().into_iter().collect()
    } else {
        HashSet::new()
    };

    for chain in &operator.chains {
        let Some(mut atoms) = structure.chain_copy(chain) else {
            record_warning(
                &mut expansion.warnings,
                SymmetryWarning::UnknownChain {
                    chain: chain.clone(),
                    instance: operator.instance,
                },
            );
            continue;
        };

        let label = next_free_label(labels, &occupied, &mut expansion.warnings);
        for atom in &mut atoms {
            atom.position = operator.transform.apply(&atom.position);
            atom.chain = label.to_string();
            atom.origin = AtomOrigin::SymmetryCopy;
        }
        debug!(
            "Operator {}: chain '{}' copied as '{}' ({} atoms).",
            operator.instance,
            chain,
            label,
            atoms.len()
        );
        expansion.copies.push(ChainCopy {
            source_chain: chain.clone(),
            label,
            atoms,
        });
    }
    expansion
}

fn next_free_label(
    labels: &mut ChainLabelSequence,
    occupied: &HashSet<String>,
    warnings: &mut Vec<SymmetryWarning>,
) -> char {
    for _ in 0..LABEL_SPACE {
        let label = match labels.advance() {
            Ok(label) => label,
            Err(exhausted) => {
                record_warning(warnings, exhausted.into());
                exhausted.reused
            }
        };
        if !occupied.contains(&label.to_string()) {
            return label;
        }
    }
    // Every label is taken by the input; reuse whatever the cursor is on.
    labels.current()
}
