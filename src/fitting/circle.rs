//! Algebraic least-squares circle fitting.

use nalgebra::{DMatrix, DVector};

use crate::error::{ArcFitError, Result};
use crate::model::Point3D;

/// Singular values below this fraction of the largest count as zero.
const RANK_RCOND: f64 = 1e-12;

/// Iteration cap for the SVD; a 3-column system converges in a handful.
const SVD_MAX_ITERATIONS: usize = 1000;

/// A circle in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Circle {
    /// Absolute radial distance of a point from the circumference.
    #[inline]
    pub fn deviation(&self, point: &Point3D) -> f64 {
        ((point.x - self.cx).hypot(point.y - self.cy) - self.radius).abs()
    }

    /// Polar angle of a point around the center, in radians.
    #[inline]
    pub fn angle_of(&self, point: &Point3D) -> f64 {
        (point.y - self.cy).atan2(point.x - self.cx)
    }
}

/// Fit a circle to the XY projection of `points` (Kåsa method).
///
/// Solves `[2x 2y 1] · (cx, cy, c) = x² + y²` in the least-squares sense; the
/// radius is `sqrt(cx² + cy² + c)`. The fit is algebraic, so deviations are
/// measured afterwards rather than minimized.
pub fn fit_circle(points: &[Point3D]) -> Result<Circle> {
    let n = points.len();
    if n < 3 {
        return Err(ArcFitError::DegenerateFit {
            reason: "fewer than three points",
        });
    }

    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(ArcFitError::DegenerateFit {
            reason: "non-finite coordinates",
        });
    }

    let design = DMatrix::from_fn(n, 3, |r, c| match c {
        0 => 2.0 * points[r].x,
        1 => 2.0 * points[r].y,
        _ => 1.0,
    });
    let target = DVector::from_iterator(n, points.iter().map(|p| p.x * p.x + p.y * p.y));

    let svd = design
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or(ArcFitError::DegenerateFit {
            reason: "SVD did not converge",
        })?;
    let sigma_max = svd.singular_values.iter().copied().fold(0.0, f64::max);
    let cutoff = RANK_RCOND * sigma_max;

    if svd.rank(cutoff) < 3 {
        return Err(ArcFitError::DegenerateFit {
            reason: "rank deficient",
        });
    }

    let solution = svd
        .solve(&target, cutoff)
        .map_err(|reason| ArcFitError::DegenerateFit { reason })?;
    let (cx, cy, c) = (solution[0], solution[1], solution[2]);

    let radius_sq = cx * cx + cy * cy + c;
    if radius_sq <= 0.0 {
        return Err(ArcFitError::DegenerateFit {
            reason: "non-positive radius",
        });
    }

    Ok(Circle {
        cx,
        cy,
        radius: radius_sq.sqrt(),
    })
}
