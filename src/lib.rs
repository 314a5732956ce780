//! arcfit - Recover circular arcs from dense linearized toolpaths.
//!
//! CAM and DXF pipelines often hand a controller thousands of tiny straight
//! moves where the design had a handful of arcs. This crate walks such a
//! polyline, fits circles to short runs of points and replaces every run that
//! validates with a single arc segment, so the G-code can use G02/G03.
//!
//! # Example
//!
//! ```
//! use arcfit::{find_arc_segments, Segment};
//!
//! let points: Vec<[f64; 3]> = (0..10)
//!     .map(|k| {
//!         let a = (k as f64 * 10.0).to_radians();
//!         [10.0 * a.cos(), 10.0 * a.sin(), 0.0]
//!     })
//!     .collect();
//! let segments = find_arc_segments(&points, &[]).unwrap();
//! assert!(matches!(segments.as_slice(), [Segment::Arc(_)]));
//! ```

pub mod config;
pub mod error;
pub mod fitting;
pub mod generator;
pub mod model;
pub mod parser;
pub mod validation;

// Re-exports for convenience
pub use config::{ArcTolerance, GcodeConfig, HintTolerance, ScanConfig};
pub use error::{ArcFitError, Result};
pub use fitting::{find_arc_segments, normalize_points, NearestHint, RadiusMatcher, Scanner};
pub use generator::generate_gcode;
pub use model::{ArcDirection, ArcHint, ArcSegment, Point3D, Segment};
pub use parser::{parse_hints, parse_toolpath};
pub use validation::{validate_segments, ValidationResult};

/// Output of [`fit_toolpath`].
#[derive(Debug)]
pub struct FitReport {
    /// Normalized, de-duplicated input points.
    pub cleaned: Vec<Point3D>,
    /// Line and arc partition of `cleaned`.
    pub segments: Vec<Segment>,
    /// Structural checks on `segments`.
    pub validation: ValidationResult,
}

/// Normalize, scan and validate a raw toolpath.
///
/// This is the high-level pipeline used by the command-line tool:
/// 1. Normalize points and drop consecutive duplicates
/// 2. Scan for arcs, matching radii against `hints`
/// 3. Validate the resulting partition
pub fn fit_toolpath<P: AsRef<[f64]>>(
    points: &[P],
    hints: &[ArcHint],
    config: &ScanConfig,
) -> Result<FitReport> {
    let cleaned = normalize_points(points)?;
    tracing::debug!(
        "normalized {} point(s) to {}",
        points.len(),
        cleaned.len()
    );

    let matcher = NearestHint::new(hints);
    let segments = Scanner::with_config(&matcher, config.clone()).scan(&cleaned);
    let validation = validate_segments(&cleaned, &segments, &config.arc);

    Ok(FitReport {
        cleaned,
        segments,
        validation,
    })
}
