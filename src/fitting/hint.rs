//! Radius hint matching against known design arcs.

use crate::config::HintTolerance;
use crate::model::ArcHint;

/// Looks up an expected radius for an estimated one.
///
/// The scanner takes the matcher by reference, so callers can swap the
/// tolerance policy without touching the scan.
pub trait RadiusMatcher {
    /// Expected radius for `estimate`, or `None` when nothing fits.
    fn match_radius(&self, estimate: Option<f64>) -> Option<f64>;
}

/// Matcher for toolpaths without design geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

impl RadiusMatcher for NoHints {
    fn match_radius(&self, _estimate: Option<f64>) -> Option<f64> {
        None
    }
}

/// Picks the hint whose radius is closest to the estimate.
#[derive(Debug, Clone)]
pub struct NearestHint<'a> {
    hints: &'a [ArcHint],
    tolerance: HintTolerance,
}

impl<'a> NearestHint<'a> {
    /// Create a matcher over `hints` with the default tolerance band.
    pub fn new(hints: &'a [ArcHint]) -> Self {
        Self::with_tolerance(hints, HintTolerance::default())
    }

    /// Create a matcher with an explicit tolerance band.
    pub fn with_tolerance(hints: &'a [ArcHint], tolerance: HintTolerance) -> Self {
        Self { hints, tolerance }
    }

    /// Closest hint to `estimate` within tolerance.
    pub fn select(&self, estimate: f64) -> Option<&'a ArcHint> {
        let mut best: Option<(&ArcHint, f64)> = None;
        for hint in self.hints {
            let Some(radius) = hint.radius else {
                continue;
            };
            let diff = (radius - estimate).abs();
            // Strict comparison keeps the first of equally close hints.
            if best.map_or(true, |(_, best_diff)| diff < best_diff) {
                best = Some((hint, diff));
            }
        }

        let (hint, diff) = best?;
        if diff > self.tolerance.limit(estimate) {
            return None;
        }
        Some(hint)
    }
}

impl RadiusMatcher for NearestHint<'_> {
    fn match_radius(&self, estimate: Option<f64>) -> Option<f64> {
        if self.hints.is_empty() {
            return None;
        }
        self.select(estimate?).and_then(|h| h.radius)
    }
}
