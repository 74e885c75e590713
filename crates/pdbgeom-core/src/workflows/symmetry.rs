use crate::core::models::atom::AtomRecord;
use crate::core::models::structure::Structure;
use crate::core::utils::labels::ChainLabelSequence;
use crate::engine::config::{ConfigError, SymmetryConfig};
use crate::engine::error::EngineError;
use crate::engine::symmetry::expander::{ChainCopy, expand};
use crate::engine::symmetry::parser::operators;
use crate::engine::symmetry::{SymmetryWarning, record_warning};
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymmetryResult {
    /// Generated chains in operator order, serials continuing after the input.
    pub copies: Vec<ChainCopy>,
    pub warnings: Vec<SymmetryWarning>,
    pub operators_applied: usize,
    pub identity_operators: usize,
    pub degraded_skipped: usize,
}

impl SymmetryResult {
    pub fn copy_atoms(&self) -> impl Iterator<Item = &AtomRecord> {
        self.copies.iter().flat_map(|copy| copy.atoms.iter())
    }
}

/// Applies every BIOMT operator in the header of `structure`.
///
/// One chain-label sequence is shared by all operators, so each generated
/// chain gets its own label. Warnings never stop the run.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if the configured label cursor is not a
/// chain label.
#[instrument(skip_all, name = "symmetry_workflow")]
pub fn run(structure: &Structure, config: &SymmetryConfig) -> Result<SymmetryResult, EngineError> {
    let mut labels =
        ChainLabelSequence::starting_at(config.label_cursor).map_err(|e| ConfigError::InvalidValue {
            parameter: "label_cursor",
            reason: e.to_string(),
        })?;
    let mut result = SymmetryResult::default();
    let mut next_serial = structure.max_serial() + 1;

    for parsed in operators(&structure.header) {
        result.warnings.extend(parsed.warnings);
        let operator = parsed.operator;

        if operator.degraded && config.skip_degraded {
            record_warning(
                &mut result.warnings,
                SymmetryWarning::DegradedOperatorSkipped {
                    instance: operator.instance,
                },
            );
            result.degraded_skipped += 1;
            continue;
        }
        if operator.is_identity() {
            result.identity_operators += 1;
            continue;
        }

        let expansion = expand(structure, &operator, &mut labels, config);
        result.warnings.extend(expansion.warnings);
        for mut copy in expansion.copies {
            for atom in &mut copy.atoms {
                atom.serial = next_serial;
                next_serial += 1;
            }
            result.copies.push(copy);
        }
        result.operators_applied += 1;
    }

    info!(
        "Applied {} symmetry operator(s), {} identity, {} skipped; {} chain(s) generated.",
        result.operators_applied,
        result.identity_operators,
        result.degraded_skipped,
        result.copies.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::SymmetryConfigBuilder;
    use nalgebra::Point3;

    const EXAMPLE_GROUP: [&str; 4] = [
        "REMARK 350 APPLY THE FOLLOWING TO CHAINS: A, B",
        "REMARK 350   BIOMT1   1  1.000000  0.000000  0.000000        0.00000",
        "REMARK 350   BIOMT2   1  0.000000  1.000000  0.000000        0.00000",
        "REMARK 350   BIOMT3   1  0.000000  0.000000 -1.000000       10.00000",
    ];
    const IDENTITY_GROUP: [&str; 4] = [
        "REMARK 350 APPLY THE FOLLOWING TO CHAINS: A, B",
        "REMARK 350   BIOMT1   1  1.000000  0.000000  0.000000        0.00000",
        "REMARK 350   BIOMT2   1  0.000000  1.000000  0.000000        0.00000",
        "REMARK 350   BIOMT3   1  0.000000  0.000000  1.000000        0.00000",
    ];

    fn structure(groups: &[&[&str]]) -> Structure {
        Structure {
            header: groups.iter().flat_map(|g| g.iter().map(|l| l.to_string())).collect(),
            atoms: vec![
                AtomRecord::new(10, "CA", "ALA", "A", 1, Point3::new(1.0, 2.0, 3.0)),
                AtomRecord::new(11, "CA", "GLY", "B", 1, Point3::new(0.0, 0.0, -4.0)),
            ],
        }
    }

    #[test]
    fn example_operator_generates_two_relabeled_chains() {
        let result = run(&structure(&[&IDENTITY_GROUP, &EXAMPLE_GROUP]), &SymmetryConfig::default()).unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(result.identity_operators, 1);
        assert_eq!(result.operators_applied, 1);
        let labels: Vec<char> = result.copies.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!['1', '2']);

        let atoms: Vec<&AtomRecord> = result.copy_atoms().collect();
        assert_eq!(atoms[0].position, Point3::new(1.0, 2.0, 7.0));
        assert_eq!(atoms[1].position, Point3::new(0.0, 0.0, 14.0));
        assert_eq!(atoms[0].serial, 12);
        assert_eq!(atoms[1].serial, 13);
    }

    #[test]
    fn label_sequence_is_shared_across_operators() {
        let result = run(&structure(&[&EXAMPLE_GROUP, &EXAMPLE_GROUP]), &SymmetryConfig::default()).unwrap();
        let labels: Vec<char> = result.copies.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!['1', '2', '3', '4']);
    }

    #[test]
    fn degraded_operators_are_applied_with_zero_filled_rows() {
        let mut group = EXAMPLE_GROUP;
        group[2] = "REMARK 350   BIOMT2   1  ???";
        let result = run(&structure(&[&group]), &SymmetryConfig::default()).unwrap();

        assert_eq!(result.operators_applied, 1);
        assert_eq!(result.degraded_skipped, 0);
        assert_eq!(result.copies.len(), 2);
        assert_eq!(result.copies[0].atoms[0].position, Point3::new(1.0, 0.0, 7.0));
        assert!(matches!(
            result.warnings.as_slice(),
            [SymmetryWarning::MalformedRow { row: 2, .. }]
        ));
    }

    #[test]
    fn degraded_operators_are_skipped_on_request() {
        let mut group = EXAMPLE_GROUP;
        group[2] = "REMARK 350   BIOMT2   1  ???";
        let config = SymmetryConfigBuilder::new().skip_degraded(true).build().unwrap();
        let result = run(&structure(&[&group, &EXAMPLE_GROUP]), &config).unwrap();

        assert_eq!(result.degraded_skipped, 1);
        assert_eq!(result.operators_applied, 1);
        assert_eq!(result.copies.len(), 2);
        assert_eq!(result.copies[0].atoms[0].position, Point3::new(1.0, 2.0, 7.0));
        assert!(result
            .warnings
            .iter()
            .any(|w| matches!(w, SymmetryWarning::DegradedOperatorSkipped { instance: 1 })));
    }

    #[test]
    fn structure_without_operators_yields_nothing() {
        let result = run(&structure(&[]), &SymmetryConfig::default()).unwrap();
        assert_eq!(result, SymmetryResult::default());
    }

    #[test]
    fn invalid_label_cursor_is_a_config_error() {
        let config = SymmetryConfig {
            label_cursor: '#',
            ..SymmetryConfig::default()
        };
        assert!(matches!(
            run(&structure(&[]), &config),
            Err(EngineError::Config(_))
        ));
    }
}
