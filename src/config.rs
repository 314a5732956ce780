//! Configuration constants and settings for arc fitting and G-code output.

/// Per-axis epsilon for collapsing consecutive duplicate points.
pub const DUPLICATE_EPS: f64 = 1e-6;

/// Minimum unwrapped angular sweep for an accepted arc, in degrees.
pub const MIN_SWEEP_DEGREES: f64 = 5.0;

/// Minimum number of points in a candidate window.
pub const MIN_WINDOW: usize = 3;

/// Maximum number of points in a candidate window.
pub const MAX_WINDOW: usize = 18;

/// Relative band for accepting a hint against an estimated radius.
pub const HINT_MATCH_FACTOR: f64 = 0.10;

/// Absolute floor of the hint acceptance band.
pub const HINT_MATCH_FLOOR: f64 = 1.0;

/// Relative band between fitted radius and a matched hint radius.
pub const HINT_RADIUS_FACTOR: f64 = 0.05;

/// Absolute floor of the fitted-versus-hint band.
pub const HINT_RADIUS_FLOOR: f64 = 0.5;

/// Relative deviation tolerance against the expected radius.
pub const DEVIATION_FACTOR: f64 = 0.01;

/// Absolute floor of the deviation tolerance.
pub const DEVIATION_FLOOR: f64 = 0.05;

/// Slack when re-checking a sweep that was converted to degrees.
pub const EPS_DEGREES: f64 = 1e-9;

/// XY distance under which the emitter considers the tool already in place.
pub const POSITION_EPS: f64 = 1e-4;

/// Tolerances used by the arc validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcTolerance {
    /// Relative band between fitted and hint radius.
    pub hint_factor: f64,
    /// Absolute floor for the hint band.
    pub hint_floor: f64,
    /// Relative deviation tolerance.
    pub deviation_factor: f64,
    /// Absolute floor for the deviation tolerance.
    pub deviation_floor: f64,
    /// Minimum angular sweep in degrees.
    pub min_sweep_degrees: f64,
}

impl Default for ArcTolerance {
    fn default() -> Self {
        Self {
            hint_factor: HINT_RADIUS_FACTOR,
            hint_floor: HINT_RADIUS_FLOOR,
            deviation_factor: DEVIATION_FACTOR,
            deviation_floor: DEVIATION_FLOOR,
            min_sweep_degrees: MIN_SWEEP_DEGREES,
        }
    }
}

impl ArcTolerance {
    /// Maximum allowed point deviation for a given expected radius.
    #[inline]
    pub fn deviation_limit(&self, expected_radius: f64) -> f64 {
        (expected_radius * self.deviation_factor).max(self.deviation_floor)
    }

    /// Maximum allowed difference between a fitted radius and a hint radius.
    #[inline]
    pub fn hint_limit(&self, hint_radius: f64) -> f64 {
        (hint_radius * self.hint_factor).max(self.hint_floor)
    }
}

/// Acceptance band for matching a hint to an estimated radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HintTolerance {
    pub factor: f64,
    pub floor: f64,
}

impl Default for HintTolerance {
    fn default() -> Self {
        Self {
            factor: HINT_MATCH_FACTOR,
            floor: HINT_MATCH_FLOOR,
        }
    }
}

impl HintTolerance {
    /// Largest accepted radius difference for an estimate.
    #[inline]
    pub fn limit(&self, estimate: f64) -> f64 {
        (estimate * self.factor).max(self.floor)
    }
}

/// Windowed scan configuration.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Candidate window length bounds.
    pub window: WindowBounds,
    /// Validator tolerances.
    pub arc: ArcTolerance,
}

/// Inclusive bounds on candidate window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            min: MIN_WINDOW,
            max: MAX_WINDOW,
        }
    }
}

/// G-code program settings.
#[derive(Debug, Clone)]
pub struct GcodeConfig {
    /// Cutting feed rate in mm/min. Plunges use half of it.
    pub feed_rate: f64,
    /// Retract height.
    pub safe_z: f64,
    /// Cutting depth.
    pub step_down: f64,
    /// Spindle speed in rpm.
    pub spindle_speed: u32,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            feed_rate: 500.0,
            safe_z: 5.0,
            step_down: -1.0,
            spindle_speed: 1000,
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::DUPLICATE_EPS;

    /// Check if every pair of components differs by less than `eps`.
    #[inline]
    pub fn all_within(a: &[f64], b: &[f64], eps: f64) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < eps)
    }

    /// Check if any pair of components differs by more than [`DUPLICATE_EPS`].
    #[inline]
    pub fn any_apart(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).any(|(x, y)| (x - y).abs() > DUPLICATE_EPS)
    }

    /// Relative-plus-absolute closeness, `|a - b| <= atol + rtol * |b|`.
    #[inline]
    pub fn is_close(a: f64, b: f64) -> bool {
        const RTOL: f64 = 1e-5;
        const ATOL: f64 = 1e-8;
        (a - b).abs() <= ATOL + RTOL * b.abs()
    }
}

/// Utility functions for angle operations.
pub mod angle {
    use std::f64::consts::{PI, TAU};

    /// Unwrap a sequence of radian angles so no step jumps by more than pi.
    pub fn unwrap(angles: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(angles.len());
        let mut correction = 0.0;
        for (k, &a) in angles.iter().enumerate() {
            if k > 0 {
                let step = a - angles[k - 1];
                if step.abs() >= PI {
                    let mut wrapped = (step + PI).rem_euclid(TAU) - PI;
                    if wrapped == -PI && step > 0.0 {
                        wrapped = PI;
                    }
                    correction += wrapped - step;
                }
            }
            out.push(a + correction);
        }
        out
    }
}
