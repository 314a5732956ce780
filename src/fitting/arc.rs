//! Full accept/reject test for a candidate arc run.

use thiserror::Error;
use tracing::trace;

use super::circle::fit_circle;
use crate::config::{angle, float_cmp, ArcTolerance};
use crate::model::{ArcDirection, ArcSegment, Point3D};

/// Why a candidate run is not an arc.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("run has {0} points, need at least 3")]
    TooFewPoints(usize),

    #[error("run is a closed loop")]
    ClosedLoop,

    #[error("{0}")]
    Degenerate(String),

    #[error("fitted radius {fitted} is outside the band around hint {hint}")]
    HintMismatch { fitted: f64, hint: f64 },

    #[error("max deviation {deviation} exceeds tolerance {limit}")]
    Deviation { deviation: f64, limit: f64 },

    #[error("sweep {degrees} degrees is too small")]
    SmallSweep { degrees: f64 },
}

/// Validate a run of points as a single arc.
///
/// `hint_radius` is the expected radius from a matched design hint; when set,
/// it both bounds the fitted radius and scales the deviation tolerance.
pub fn check_arc(
    points: &[Point3D],
    hint_radius: Option<f64>,
    tolerance: &ArcTolerance,
) -> Result<ArcSegment, Rejection> {
    if points.len() < 3 {
        return Err(Rejection::TooFewPoints(points.len()));
    }

    let first = points[0];
    let last = points[points.len() - 1];
    if float_cmp::is_close(first.x, last.x) && float_cmp::is_close(first.y, last.y) {
        return Err(Rejection::ClosedLoop);
    }

    let circle = fit_circle(points).map_err(|err| Rejection::Degenerate(err.to_string()))?;
    if !circle.radius.is_finite() || circle.radius <= 0.0 {
        return Err(Rejection::Degenerate(format!(
            "unusable radius {}",
            circle.radius
        )));
    }

    let expected_radius = match hint_radius {
        Some(hint) => {
            if (circle.radius - hint).abs() > tolerance.hint_limit(hint) {
                return Err(Rejection::HintMismatch {
                    fitted: circle.radius,
                    hint,
                });
            }
            hint
        }
        None => circle.radius,
    };

    let max_deviation = points
        .iter()
        .map(|p| circle.deviation(p))
        .fold(0.0, f64::max);
    let limit = tolerance.deviation_limit(expected_radius);
    if max_deviation > limit {
        return Err(Rejection::Deviation {
            deviation: max_deviation,
            limit,
        });
    }

    let raw: Vec<f64> = points.iter().map(|p| circle.angle_of(p)).collect();
    let angles = angle::unwrap(&raw);
    let start_angle = angles[0];
    let end_angle = angles[angles.len() - 1];
    let sweep = end_angle - start_angle;
    if sweep.abs() < tolerance.min_sweep_degrees.to_radians() {
        return Err(Rejection::SmallSweep {
            degrees: sweep.to_degrees(),
        });
    }

    Ok(ArcSegment {
        start: first,
        end: last,
        center: Point3D::new(circle.cx, circle.cy, first.z),
        radius: circle.radius,
        direction: ArcDirection::from_sweep(sweep),
        start_angle: start_angle.to_degrees(),
        end_angle: end_angle.to_degrees(),
        max_deviation,
    })
}

/// Validate a run, discarding the rejection reason.
pub fn fit_arc(
    points: &[Point3D],
    hint_radius: Option<f64>,
    tolerance: &ArcTolerance,
) -> Option<ArcSegment> {
    match check_arc(points, hint_radius, tolerance) {
        Ok(arc) => Some(arc),
        Err(reason) => {
            trace!("window of {} points rejected: {}", points.len(), reason);
            None
        }
    }
}
