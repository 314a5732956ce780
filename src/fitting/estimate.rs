//! Cheap three-point radius estimate used to pre-filter candidate windows.

use tracing::trace;

use super::circle::fit_circle;
use crate::model::Point3D;

/// Estimate the radius of a run from its first, middle and last points.
///
/// Returns `None` for runs shorter than three points or a degenerate sample.
pub fn estimate_radius(points: &[Point3D]) -> Option<f64> {
    if points.len() < 3 {
        return None;
    }
    let sample = [
        points[0],
        points[points.len() / 2],
        points[points.len() - 1],
    ];
    match fit_circle(&sample) {
        Ok(circle) => Some(circle.radius),
        Err(err) => {
            trace!("radius estimate unavailable: {}", err);
            None
        }
    }
}
