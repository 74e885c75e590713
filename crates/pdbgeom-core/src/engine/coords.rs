use crate::core::models::atom::ResidueKey;
use crate::core::models::structure::Structure;
use nalgebra::Point3;

/// Padded name of the alpha-carbon atom.
pub const CA_ATOM_NAME: &str = "CA  ";

/// Alpha-carbon positions of a zone, one per `CA` record, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaCoordinates {
    points: Vec<Point3<f64>>,
    residues: Vec<ResidueKey>,
}

impl CaCoordinates {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// The residue each point was taken from.
    pub fn residues(&self) -> &[ResidueKey] {
        &self.residues
    }

    /// Smallest and largest coordinate along `axis` (0 = x, 1 = y, 2 = z).
    pub fn extent(&self, axis: usize) -> Option<(f64, f64)> {
        let mut values = self.points.iter().map(|p| p[axis]);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Collects the `CA` atoms of `zone`. Alternate locations each contribute.
pub fn build_ca_coords(zone: &Structure) -> CaCoordinates {
    let (points, residues) = zone
        .atoms_named(CA_ATOM_NAME)
        .map(|atom| (atom.position, atom.residue_key()))
        .unzip();
    CaCoordinates { points, residues }
}
