use super::config::LineStyle;
use super::coords::CaCoordinates;
use crate::core::models::atom::{AtomOrigin, AtomRecord, RecordType, align_atom_name};
use crate::core::utils::geometry::{LineFit, fit_line};
use nalgebra::Point3;
use thiserror::Error;
use tracing::debug;

/// Below this magnitude the x component of the direction is too small to
/// parametrize along x, and the dominant axis is used instead.
pub const MIN_PARAMETRIZING_COMPONENT: f64 = 0.1;

/// B-factor written on every line pseudo-atom.
pub const LINE_TEMP_FACTOR: f64 = 1.0;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    #[error("No CA atoms found in the selected zone")]
    NoCaAtoms,
    #[error("At least 2 CA atoms are needed to fit a line, found {found}")]
    InsufficientPoints { found: usize },
}

/// A fitted line sampled at unit steps along its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLine {
    /// The fit, with its direction oriented so the parametrizing component is positive.
    pub fit: LineFit,
    /// Coordinate axis used to bound the samples (0 = x, 1 = y, 2 = z).
    pub axis: usize,
    pub k_min: i64,
    pub k_max: i64,
    /// One pseudo-atom per integer `k` in `k_min..=k_max`.
    pub atoms: Vec<AtomRecord>,
}

impl FittedLine {
    pub fn points(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.atoms.iter().map(|atom| atom.position)
    }
}

/// Fits the best line through `coords` and renders it as pseudo-atoms.
///
/// # Errors
///
/// Returns [`LineError::NoCaAtoms`] for an empty table and
/// [`LineError::InsufficientPoints`] when only one point is available.
pub fn fit_and_render(coords: &CaCoordinates, style: &LineStyle) -> Result<FittedLine, LineError> {
    check_point_count(coords)?;
    let fit = fit_line(coords.points()).ok_or(LineError::NoCaAtoms)?;
    render_line(coords, fit, style)
}

/// Samples `fit` at every integer step whose projection on the parametrizing
/// axis falls within the extent of `coords` on that axis.
///
/// The parametrizing axis is x unless the direction is nearly perpendicular
/// to it, in which case the axis of the largest direction component is used.
/// The direction is flipped if needed so that component is positive, which
/// keeps `k_min <= 0 <= k_max` and the samples ordered along the axis.
pub fn render_line(coords: &CaCoordinates, fit: LineFit, style: &LineStyle) -> Result<FittedLine, LineError> {
    check_point_count(coords)?;

    let axis = parametrizing_axis(&fit);
    let direction = if fit.direction[axis] < 0.0 {
        -fit.direction
    } else {
        fit.direction
    };
    let fit = LineFit {
        centroid: fit.centroid,
        direction,
    };

    let (min, max) = coords.extent(axis).ok_or(LineError::NoCaAtoms)?;
    let origin = fit.centroid[axis];
    let step = fit.direction[axis];
    let k_min = ((min - origin) / step).floor() as i64;
    let k_max = ((max - origin) / step).floor() as i64;

    debug!(
        "Line through {} CA atom(s): axis {}, k from {} to {}.",
        coords.len(),
        axis,
        k_min,
        k_max
    );

    let atoms = (k_min..=k_max)
        .zip(1..)
        .map(|(k, index)| line_atom(index, fit.point_at(k as f64), style))
        .collect();

    Ok(FittedLine {
        fit,
        axis,
        k_min,
        k_max,
        atoms,
    })
}

fn check_point_count(coords: &CaCoordinates) -> Result<(), LineError> {
    match coords.len() {
        0 => Err(LineError::NoCaAtoms),
        1 => Err(LineError::InsufficientPoints { found: 1 }),
        _ => Ok(()),
    }
}

fn parametrizing_axis(fit: &LineFit) -> usize {
    let d = fit.direction;
    if d.x.abs() >= MIN_PARAMETRIZING_COMPONENT {
        return 0;
    }
    if d.y.abs() >= d.z.abs() { 1 } else { 2 }
}

fn line_atom(index: usize, position: Point3<f64>, style: &LineStyle) -> AtomRecord {
    AtomRecord {
        record_type: RecordType::Atom,
        serial: index,
        name: align_atom_name(&style.atom_name),
        alt_loc: ' ',
        res_name: style.residue_name.clone(),
        chain: style.chain.clone(),
        res_seq: index as isize,
        insertion: ' ',
        position,
        occupancy: 1.0,
        temp_factor: LINE_TEMP_FACTOR,
        element: String::new(),
        origin: AtomOrigin::LinePoint,
    }
}
