//! Greedy windowed scan that partitions a polyline into lines and arcs.
//!
//! At each cursor position the scanner grows a window of 3 to 18 points and
//! keeps the longest run that validates as an arc, preferring the smaller
//! deviation on equal length. Once a window has validated, the first failing
//! window ends the search for that cursor. This is a single-pass heuristic:
//! it never backtracks, so a window that would validate again after one bad
//! sample is not found.

use tracing::debug;

use super::arc::fit_arc;
use super::estimate::estimate_radius;
use super::hint::{NearestHint, RadiusMatcher};
use super::normalize::normalize_points;
use crate::config::{float_cmp, ScanConfig};
use crate::error::Result;
use crate::model::{ArcHint, ArcSegment, Point3D, Segment};

/// Accumulates output segments, merging consecutive line steps.
#[derive(Debug, Default)]
pub struct SegmentBuilder {
    segments: Vec<Segment>,
}

impl SegmentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arc segment.
    pub fn push_arc(&mut self, arc: ArcSegment) {
        self.segments.push(Segment::Arc(arc));
    }

    /// Append a straight step, extending a trailing line when there is one.
    pub fn push_line_step(&mut self, start: Point3D, end: Point3D) {
        if let Some(Segment::Line { points }) = self.segments.last_mut() {
            let joined = points
                .last()
                .is_some_and(|last| !float_cmp::any_apart(&last.to_array(), &start.to_array()));
            if !joined {
                points.push(start);
            }
            points.push(end);
            return;
        }
        self.segments.push(Segment::Line {
            points: vec![start, end],
        });
    }

    /// Number of segments so far.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if no segment has been emitted.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Take the finished segment list.
    pub fn finish(self) -> Vec<Segment> {
        self.segments
    }
}

/// Windowed arc scanner.
pub struct Scanner<'m, M: RadiusMatcher + ?Sized> {
    matcher: &'m M,
    config: ScanConfig,
}

impl<'m, M: RadiusMatcher + ?Sized> Scanner<'m, M> {
    /// Create a scanner with the default configuration.
    pub fn new(matcher: &'m M) -> Self {
        Self::with_config(matcher, ScanConfig::default())
    }

    /// Create a scanner with an explicit configuration.
    pub fn with_config(matcher: &'m M, config: ScanConfig) -> Self {
        Self { matcher, config }
    }

    /// Partition a cleaned polyline into line and arc segments.
    pub fn scan(&self, points: &[Point3D]) -> Vec<Segment> {
        let count = points.len();
        let mut builder = SegmentBuilder::new();
        if count < 2 {
            return builder.finish();
        }

        let mut arcs = 0usize;
        let mut i = 0;
        while i < count - 1 {
            match self.best_arc_at(points, i) {
                Some((end, arc)) => {
                    debug!(
                        "arc {}..={} r={:.4} {} dev={:.5}",
                        i, end, arc.radius, arc.direction, arc.max_deviation
                    );
                    builder.push_arc(arc);
                    arcs += 1;
                    i = end;
                }
                None => {
                    builder.push_line_step(points[i], points[i + 1]);
                    i += 1;
                }
            }
        }

        debug!(
            "scanned {} points into {} segment(s), {} arc(s)",
            count,
            builder.len(),
            arcs
        );
        builder.finish()
    }

    /// Best validated arc starting at cursor `i`, with its end index.
    fn best_arc_at(&self, points: &[Point3D], i: usize) -> Option<(usize, ArcSegment)> {
        let window = self.config.window;
        let first_end = i + window.min.max(1) - 1;
        let last_end = (points.len() - 1).min(i + window.max.max(1) - 1);

        let mut best: Option<(usize, ArcSegment)> = None;
        for j in first_end..=last_end {
            let run = &points[i..=j];
            let expected = self.matcher.match_radius(estimate_radius(run));
            let Some(arc) = fit_arc(run, expected, &self.config.arc) else {
                if best.is_some() {
                    break;
                }
                continue;
            };

            let better = match &best {
                None => true,
                Some((best_end, best_arc)) => {
                    j > *best_end || (j == *best_end && arc.max_deviation < best_arc.max_deviation)
                }
            };
            if better {
                best = Some((j, arc));
            }
        }
        best
    }
}

/// Scan a cleaned polyline with the given matcher and configuration.
pub fn scan_segments<M: RadiusMatcher + ?Sized>(
    points: &[Point3D],
    matcher: &M,
    config: ScanConfig,
) -> Vec<Segment> {
    Scanner::with_config(matcher, config).scan(points)
}

/// Normalize a raw toolpath and split it into line and arc segments.
///
/// Fails only on malformed points; geometric rejections fall back to lines.
pub fn find_arc_segments<P: AsRef<[f64]>>(points: &[P], hints: &[ArcHint]) -> Result<Vec<Segment>> {
    let cleaned = normalize_points(points)?;
    let matcher = NearestHint::new(hints);
    Ok(Scanner::new(&matcher).scan(&cleaned))
}
