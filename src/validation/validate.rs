//! Structural checks on a finished segment list.

use crate::config::{ArcTolerance, EPS_DEGREES};
use crate::model::{Point3D, Segment};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate segments produced from `cleaned` against the partition invariants.
pub fn validate_segments(
    cleaned: &[Point3D],
    segments: &[Segment],
    tolerance: &ArcTolerance,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, segment) in segments.iter().enumerate() {
        result.merge(validate_segment(segment, idx + 1, tolerance));
    }

    for (idx, pair) in segments.windows(2).enumerate() {
        if pair[0].is_line() && pair[1].is_line() {
            result.add_error(format!(
                "Segments {} and {}: Adjacent line segments were not merged",
                idx + 1,
                idx + 2
            ));
        }
    }

    result.merge(validate_coverage(cleaned, segments));

    if !segments.is_empty() && !segments.iter().any(Segment::is_arc) {
        result.add_warning("No arcs recovered");
    }

    result
}

/// Validate a single segment.
pub fn validate_segment(
    segment: &Segment,
    segment_num: usize,
    tolerance: &ArcTolerance,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    match segment {
        Segment::Line { points } => {
            if points.len() < 2 {
                result.add_error(format!(
                    "Segment {}: Line has {} point(s)",
                    segment_num,
                    points.len()
                ));
            }
        }
        Segment::Arc(arc) => {
            if !arc.radius.is_finite() || arc.radius <= 0.0 {
                result.add_error(format!(
                    "Segment {}: Invalid arc radius {}",
                    segment_num, arc.radius
                ));
            }
            if arc.sweep_degrees().abs() < tolerance.min_sweep_degrees - EPS_DEGREES {
                result.add_error(format!(
                    "Segment {}: Arc sweep {:.3} degrees is below {}",
                    segment_num,
                    arc.sweep_degrees(),
                    tolerance.min_sweep_degrees
                ));
            }
            // The accepting tolerance may have used a hint radius within a few
            // percent of this one, so exceeding the fitted-radius limit is a warning.
            let limit = tolerance.deviation_limit(arc.radius);
            if arc.max_deviation > limit {
                result.add_warning(format!(
                    "Segment {}: Arc deviation {} exceeds {}",
                    segment_num, arc.max_deviation, limit
                ));
            }
        }
    }

    result
}

/// Check that the segments walk `cleaned` from start to end without gaps.
///
/// Line points must match the polyline one-for-one; an arc may skip interior
/// points but its endpoints must be polyline points in order.
pub fn validate_coverage(cleaned: &[Point3D], segments: &[Segment]) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if cleaned.len() < 2 {
        if !segments.is_empty() {
            result.add_error(format!(
                "Expected no segments for {} point(s), got {}",
                cleaned.len(),
                segments.len()
            ));
        }
        return result;
    }
    if segments.is_empty() {
        result.add_error("No segments produced");
        return result;
    }

    let mut cursor = 0usize;
    for (idx, segment) in segments.iter().enumerate() {
        let segment_num = idx + 1;
        if segment.start() != Some(cleaned[cursor]) {
            result.add_error(format!(
                "Segment {}: Does not start at polyline point {}",
                segment_num, cursor
            ));
            return result;
        }

        match segment {
            Segment::Line { points } => {
                for point in &points[1..] {
                    cursor += 1;
                    if cleaned.get(cursor) != Some(point) {
                        result.add_error(format!(
                            "Segment {}: Line diverges from polyline at point {}",
                            segment_num, cursor
                        ));
                        return result;
                    }
                }
            }
            Segment::Arc(arc) => {
                match cleaned[cursor + 1..].iter().position(|p| *p == arc.end) {
                    Some(offset) => cursor += offset + 1,
                    None => {
                        result.add_error(format!(
                            "Segment {}: Arc end is not a later polyline point",
                            segment_num
                        ));
                        return result;
                    }
                }
            }
        }
    }

    if cursor != cleaned.len() - 1 {
        result.add_error(format!(
            "Segments end at polyline point {} of {}",
            cursor,
            cleaned.len() - 1
        ));
    }

    result
}
