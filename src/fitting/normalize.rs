//! Point cleaning ahead of the windowed scan.

use crate::config::{float_cmp, DUPLICATE_EPS};
use crate::error::{ArcFitError, Result};
use crate::model::Point3D;

/// Coerce a 2- or 3-component point into a [`Point3D`].
///
/// Missing Z is padded with 0.0 and extra components are ignored. NaN and
/// infinite components are rejected.
pub fn normalize_point(index: usize, components: &[f64]) -> Result<Point3D> {
    if let Some(&value) = components.iter().take(3).find(|v| !v.is_finite()) {
        return Err(ArcFitError::NonFinite { index, value });
    }
    match *components {
        [x, y] => Ok(Point3D::new(x, y, 0.0)),
        [x, y, z, ..] => Ok(Point3D::new(x, y, z)),
        _ => Err(ArcFitError::InvalidPoint {
            index,
            components: components.len(),
        }),
    }
}

/// Drop points that repeat the last kept point on every axis.
pub fn remove_consecutive_duplicates(points: &[Point3D]) -> Vec<Point3D> {
    let mut cleaned: Vec<Point3D> = Vec::with_capacity(points.len());
    for &point in points {
        if let Some(prev) = cleaned.last() {
            if float_cmp::all_within(&prev.to_array(), &point.to_array(), DUPLICATE_EPS) {
                continue;
            }
        }
        cleaned.push(point);
    }
    cleaned
}

/// Normalize and de-duplicate a raw toolpath.
///
/// Any point with fewer than two components or a non-finite coordinate fails
/// the whole call.
pub fn normalize_points<P: AsRef<[f64]>>(points: &[P]) -> Result<Vec<Point3D>> {
    let normalized = points
        .iter()
        .enumerate()
        .map(|(i, p)| normalize_point(i, p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(remove_consecutive_duplicates(&normalized))
}
