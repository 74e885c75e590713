use crate::core::models::atom::AtomRecord;
use crate::core::models::structure::Structure;
use crate::engine::config::LineConfig;
use crate::engine::coords::build_ca_coords;
use crate::engine::error::EngineError;
use crate::engine::line::{FittedLine, LineError, fit_and_render};
use crate::engine::zone::extract_zone;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct LineResult {
    /// The selected residues, copied out of the input.
    pub zone: Structure,
    pub ca_count: usize,
    pub line: FittedLine,
}

impl LineResult {
    /// Line pseudo-atoms followed by the zone atoms, the order they are written in.
    pub fn output_atoms(&self) -> impl Iterator<Item = &AtomRecord> {
        self.line.atoms.iter().chain(self.zone.atoms.iter())
    }
}

/// Fits a line through the CA atoms between residues `first` and `last`.
///
/// # Errors
///
/// Fails on malformed specifiers, a zone absent from `structure`, or a zone
/// with fewer than two CA atoms. Nothing is produced in those cases.
#[instrument(skip_all, name = "line_workflow")]
pub fn run(
    structure: &Structure,
    first: &str,
    last: &str,
    config: &LineConfig,
) -> Result<LineResult, EngineError> {
    let zone = extract_zone(structure, first, last)?;
    info!("Zone {} to {} holds {} atoms.", first, last, zone.len());

    let coords = build_ca_coords(&zone);
    if coords.is_empty() {
        return Err(LineError::NoCaAtoms.into());
    }
    let line = fit_and_render(&coords, &config.style)?;
    info!(
        "Fitted line through {} CA atoms; {} points written.",
        coords.len(),
        line.atoms.len()
    );

    Ok(LineResult {
        zone,
        ca_count: coords.len(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomOrigin;
    use crate::engine::zone::ZoneError;
    use nalgebra::Point3;

    fn helix_like() -> Structure {
        let mut atoms = Vec::new();
        for i in 0..6 {
            let x = i as f64 * 1.5;
            atoms.push(AtomRecord::new(2 * i + 1, "N", "ALA", "A", i as isize + 1, Point3::new(x, 1.0, 0.0)));
            atoms.push(AtomRecord::new(2 * i + 2, "CA", "ALA", "A", i as isize + 1, Point3::new(x, 0.0, 0.0)));
        }
        Structure::from_atoms(atoms)
    }

    #[test]
    fn line_atoms_precede_zone_atoms() {
        let result = run(&helix_like(), "A2", "A5", &LineConfig::default()).unwrap();
        assert_eq!(result.ca_count, 4);
        assert_eq!(result.zone.len(), 8);

        let origins: Vec<AtomOrigin> = result.output_atoms().map(|a| a.origin).collect();
        let split = result.line.atoms.len();
        assert!(origins[..split].iter().all(|o| *o == AtomOrigin::LinePoint));
        assert!(origins[split..].iter().all(|o| *o == AtomOrigin::Observed));
        assert!(result.line.points().all(|p| p.y.abs() < 1e-6 && p.z.abs() < 1e-6));
    }

    #[test]
    fn zone_without_ca_atoms_is_an_error() {
        let mut structure = helix_like();
        structure.atoms.retain(|a| a.trimmed_name() != "CA");
        assert!(matches!(
            run(&structure, "A1", "A3", &LineConfig::default()),
            Err(EngineError::Line(LineError::NoCaAtoms))
        ));
    }

    #[test]
    fn single_residue_zone_has_too_few_points() {
        assert!(matches!(
            run(&helix_like(), "A3", "A3", &LineConfig::default()),
            Err(EngineError::Line(LineError::InsufficientPoints { found: 1 }))
        ));
    }

    #[test]
    fn missing_zone_propagates_zone_error() {
        assert!(matches!(
            run(&helix_like(), "A7", "A9", &LineConfig::default()),
            Err(EngineError::Zone(ZoneError::ZoneNotFound { .. }))
        ));
    }
}
