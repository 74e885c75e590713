use nalgebra::{Matrix3, Point3, Unit, Vector3};

/// Tolerance used when deciding whether an operator leaves coordinates unchanged.
pub const IDENTITY_TOLERANCE: f64 = 1e-6;

/// A straight line through a point cloud: its centroid and a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub centroid: Point3<f64>,
    pub direction: Unit<Vector3<f64>>,
}

impl LineFit {
    /// The point `centroid + k * direction`.
    pub fn point_at(&self, k: f64) -> Point3<f64> {
        self.centroid + self.direction.into_inner() * k
    }

    /// Perpendicular distance from `point` to the line.
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        let direction = self.direction.into_inner();
        let offset = point - self.centroid;
        (offset - direction * offset.dot(&direction)).norm()
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Orthogonal regression line through `points`.
///
/// The direction is the eigenvector belonging to the largest eigenvalue of the
/// scatter matrix, i.e. the first principal component. Its sign is arbitrary.
///
/// # Return
///
/// Returns `None` for an empty slice.
pub fn fit_line(points: &[Point3<f64>]) -> Option<LineFit> {
    let centroid = centroid(points)?;

    let scatter = points.iter().fold(Matrix3::zeros(), |acc, p| {
        let d = p - centroid;
        acc + d * d.transpose()
    });

    let eigen = scatter.symmetric_eigen();
    let principal = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let direction = Unit::new_normalize(eigen.eigenvectors.column(principal).into_owned());

    Some(LineFit {
        centroid,
        direction,
    })
}

/// A rotation/translation pair applied as `rotation * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * point.coords + self.translation)
    }

    /// Returns `true` if the matrix is the identity and the translation is zero,
    /// element-wise within `tolerance`.
    pub fn is_identity(&self, tolerance: f64) -> bool {
        let matrix_ok = (self.rotation - Matrix3::identity())
            .iter()
            .all(|v| v.abs() <= tolerance);
        matrix_ok && self.translation.iter().all(|v| v.abs() <= tolerance)
    }
}
