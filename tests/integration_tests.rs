//! Integration tests for toolpath arc recovery.
//!
//! These exercise the public pipeline end to end: JSON input, normalization,
//! the windowed scan, partition validation and G-code output.

use arcfit::fitting::{check_arc, NoHints, Scanner};
use arcfit::parser::{read_hints_file, read_toolpath_file};
use arcfit::{
    find_arc_segments, fit_toolpath, generate_gcode, normalize_points, parse_hints,
    parse_toolpath, validate_segments, ArcDirection, ArcFitError, ArcTolerance, GcodeConfig,
    Point3D, ScanConfig, Segment,
};
use std::io::Write;

// ==================== Fixtures ====================

/// Points on a circle at evenly spaced angles from `from` to `to` (degrees).
fn circle_points(cx: f64, cy: f64, r: f64, from: f64, to: f64, n: usize) -> Vec<[f64; 3]> {
    (0..n)
        .map(|k| {
            let a = (from + (to - from) * k as f64 / (n - 1) as f64).to_radians();
            [cx + r * a.cos(), cy + r * a.sin(), 0.0]
        })
        .collect()
}

/// Small deterministic jitter source.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) - 0.5
    }
}

/// A slot-like profile: straight, half circle, straight.
fn slot_profile() -> Vec<[f64; 3]> {
    let mut points: Vec<[f64; 3]> = (0..6).map(|k| [k as f64 * 4.0, 0.0, -2.0]).collect();
    for k in 1..=18 {
        let a = (-90.0 + 10.0 * k as f64).to_radians();
        points.push([20.0 + 10.0 * a.cos(), 10.0 + 10.0 * a.sin(), -2.0]);
    }
    for k in 1..=5 {
        points.push([20.0 - k as f64 * 4.0, 20.0, -2.0]);
    }
    points
}

/// Reconstruct the polyline points touched by a segment list.
fn covered_points(segments: &[Segment]) -> Vec<Point3D> {
    let mut out: Vec<Point3D> = Vec::new();
    for segment in segments {
        let points = segment.points();
        let skip = usize::from(out.last() == points.first());
        out.extend_from_slice(&points[skip..]);
    }
    out
}

// ==================== Scenarios ====================

#[test]
fn test_quarter_circle_scenario() {
    let points = circle_points(0.0, 0.0, 10.0, 0.0, 90.0, 10);
    let segments = find_arc_segments(&points, &[]).unwrap();

    assert_eq!(segments.len(), 1);
    let Segment::Arc(arc) = &segments[0] else {
        panic!("expected an arc, got {:?}", segments[0]);
    };
    assert!((arc.radius - 10.0).abs() <= 0.1);
    assert_eq!(arc.direction, ArcDirection::Ccw);
    assert!((arc.start.x - 10.0).abs() < 1e-9 && arc.start.y.abs() < 1e-9);
    assert!(arc.end.x.abs() < 1e-9 && (arc.end.y - 10.0).abs() < 1e-9);
}

#[test]
fn test_straight_line_scenario() {
    let points: Vec<[f64; 3]> = (0..5).map(|k| [2.5 * k as f64, 0.0, 0.0]).collect();
    let segments = find_arc_segments(&points, &[]).unwrap();

    assert_eq!(segments.len(), 1);
    let Segment::Line { points: line } = &segments[0] else {
        panic!("expected a line");
    };
    let expected: Vec<Point3D> = points.iter().map(|&p| Point3D::from(p)).collect();
    assert_eq!(line, &expected);
}

#[test]
fn test_duplicate_points_scenario() {
    let points = vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![2.0, 0.0, 0.0],
    ];
    let segments = find_arc_segments(&points, &[]).unwrap();
    assert_eq!(
        segments,
        vec![Segment::Line {
            points: vec![
                Point3D::new(0.0, 0.0, 0.0),
                Point3D::new(1.0, 0.0, 0.0),
                Point3D::new(2.0, 0.0, 0.0),
            ]
        }]
    );
}

#[test]
fn test_slot_profile_mixed_segments() {
    let points = slot_profile();
    let report = fit_toolpath(&points, &[], &ScanConfig::default()).unwrap();

    assert!(report.validation.passed, "{:?}", report.validation.errors);
    assert!(report.segments.last().unwrap().is_line());

    // The greedy scan may absorb the lead-in straight into a wide arc, but the
    // round end itself must come back as one radius-10 arc.
    let round_end = report
        .segments
        .iter()
        .filter_map(|s| match s {
            Segment::Arc(arc) => Some(arc),
            Segment::Line { .. } => None,
        })
        .find(|arc| (arc.radius - 10.0).abs() < 0.1)
        .expect("round end recovered as an arc");
    assert!(round_end.sweep_degrees() > 90.0);
    assert_eq!(round_end.direction, ArcDirection::Ccw);
    assert_eq!(round_end.center.z, -2.0);
    assert!((round_end.center.x - 20.0).abs() < 1e-6);
    assert!((round_end.center.y - 10.0).abs() < 1e-6);
}

// ==================== Properties ====================

#[test]
fn test_coverage_property() {
    let inputs = vec![
        slot_profile(),
        circle_points(3.0, 4.0, 50.0, 10.0, 200.0, 40),
        circle_points(0.0, 0.0, 5.0, 90.0, -30.0, 25),
        (0..12).map(|k| [k as f64, (k % 3) as f64, 0.0]).collect(),
    ];

    for raw in inputs {
        let cleaned = normalize_points(&raw).unwrap();
        let segments = Scanner::new(&NoHints).scan(&cleaned);

        let result = validate_segments(&cleaned, &segments, &ArcTolerance::default());
        assert!(result.passed, "{:?}", result.errors);

        // Endpoints of the covered points must be the polyline endpoints and
        // every covered point must come from the polyline, in order.
        let covered = covered_points(&segments);
        assert_eq!(covered.first(), cleaned.first());
        assert_eq!(covered.last(), cleaned.last());
        let mut cursor = 0;
        for point in &covered {
            let offset = cleaned[cursor..].iter().position(|p| p == point).unwrap();
            cursor += offset;
        }

        for pair in segments.windows(2) {
            assert!(!(pair[0].is_line() && pair[1].is_line()));
        }
    }
}

#[test]
fn test_determinism() {
    let mut rng = Lcg(7);
    let raw: Vec<[f64; 3]> = circle_points(0.0, 0.0, 30.0, 0.0, 300.0, 80)
        .into_iter()
        .map(|[x, y, z]| [x + 0.02 * rng.next_unit(), y + 0.02 * rng.next_unit(), z])
        .collect();

    let first = find_arc_segments(&raw, &[]).unwrap();
    let second = find_arc_segments(&raw, &[]).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_collinear_never_arcs() {
    let directions = [(1.0, 0.0), (0.0, 1.0), (0.3, 0.7), (-2.0, 5.0), (1e3, -1e-3)];
    let mut rng = Lcg(42);
    for (dx, dy) in directions {
        let mut t = 0.0;
        let raw: Vec<[f64; 3]> = (0..30)
            .map(|_| {
                t += 0.6 + rng.next_unit();
                [1.0 + dx * t, -4.0 + dy * t, 0.0]
            })
            .collect();
        let segments = find_arc_segments(&raw, &[]).unwrap();
        assert!(segments.iter().all(Segment::is_line), "arc on {:?}", (dx, dy));
        assert_eq!(segments.len(), 1);
    }
}

#[test]
fn test_exact_circle_recovery() {
    let cases = [
        (0.0, 0.0, 1.0, 12.0),
        (100.0, -50.0, 7.5, 5.5),
        (-20.0, 30.0, 250.0, 40.0),
    ];
    for (cx, cy, r, span) in cases {
        for n in [3usize, 7, 18] {
            let points: Vec<Point3D> = circle_points(cx, cy, r, 15.0, 15.0 + span, n)
                .into_iter()
                .map(Point3D::from)
                .collect();
            let arc = check_arc(&points, None, &ArcTolerance::default())
                .unwrap_or_else(|e| panic!("r={} span={} n={}: {}", r, span, n, e));
            assert!((arc.radius - r).abs() <= (r * 0.01).max(0.05));
        }
    }
}

#[test]
fn test_direction_convention() {
    let ccw: Vec<Point3D> = circle_points(1.0, 1.0, 12.0, 200.0, 260.0, 8)
        .into_iter()
        .map(Point3D::from)
        .collect();
    let cw: Vec<Point3D> = ccw.iter().rev().copied().collect();

    let tol = ArcTolerance::default();
    assert_eq!(check_arc(&ccw, None, &tol).unwrap().direction, ArcDirection::Ccw);
    assert_eq!(check_arc(&cw, None, &tol).unwrap().direction, ArcDirection::Cw);
}

#[test]
fn test_angular_extent_boundary() {
    let narrow = circle_points(0.0, 0.0, 20.0, 30.0, 34.9, 3);
    let segments = find_arc_segments(&narrow, &[]).unwrap();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_line());

    let wide = circle_points(0.0, 0.0, 20.0, 30.0, 35.1, 3);
    let segments = find_arc_segments(&wide, &[]).unwrap();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_arc());
}

// ==================== Hints ====================

#[test]
fn test_hints_from_json() {
    let points = circle_points(0.0, 0.0, 10.0, 0.0, 60.0, 7);
    let hints = parse_hints(r#"[{"radius": 10.0, "layer": "contour"}, {"type": "line"}]"#).unwrap();
    let segments = find_arc_segments(&points, &hints).unwrap();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_arc());
}

#[test]
fn test_inconsistent_hint_forces_lines() {
    // Estimate ~10 matches hint 10.9 (band 1.0), but the fitted radius is
    // outside the validator band of max(0.545, 0.5).
    let points = circle_points(0.0, 0.0, 10.0, 0.0, 60.0, 7);
    let hints = parse_hints(r#"[{"radius": 10.9}]"#).unwrap();
    let segments = find_arc_segments(&points, &hints).unwrap();
    assert!(segments.iter().all(Segment::is_line));
}

// ==================== Input handling ====================

#[test]
fn test_json_file_pipeline() {
    let mut toolpath = tempfile::NamedTempFile::new().unwrap();
    let raw = serde_json::to_string(&circle_points(0.0, 0.0, 10.0, 0.0, 90.0, 10)).unwrap();
    toolpath.write_all(raw.as_bytes()).unwrap();

    let mut hints = tempfile::NamedTempFile::new().unwrap();
    hints.write_all(br#"[{"radius": 10}]"#).unwrap();

    let points = read_toolpath_file(toolpath.path()).unwrap();
    let hints = read_hints_file(hints.path()).unwrap();
    let report = fit_toolpath(&points, &hints, &ScanConfig::default()).unwrap();
    assert_eq!(report.cleaned.len(), 10);
    assert_eq!(report.segments.len(), 1);
    assert!(report.validation.passed);
}

#[test]
fn test_empty_file_rejected() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert!(read_toolpath_file(file.path()).is_err());
}

#[test]
fn test_two_component_points() {
    let points = parse_toolpath("[[10, 0], [9.848, 1.736], [9.397, 3.420], [8.660, 5.0]]").unwrap();
    let segments = find_arc_segments(&points, &[]).unwrap();
    assert_eq!(segments.len(), 1);
    let Segment::Arc(arc) = &segments[0] else {
        panic!("expected an arc");
    };
    assert_eq!(arc.start.z, 0.0);
}

#[test]
fn test_short_point_fails_whole_call() {
    let points = parse_toolpath("[[0, 0], [1], [2, 2]]").unwrap();
    assert!(find_arc_segments(&points, &[]).is_err());
}

#[test]
fn test_non_finite_point_fails_whole_call() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut points = circle_points(0.0, 0.0, 10.0, 0.0, 90.0, 10);
        points[4] = [bad, 1.0, 0.0];
        let err = find_arc_segments(&points, &[]).unwrap_err();
        assert!(
            matches!(err, ArcFitError::NonFinite { index: 4, .. }),
            "unexpected error for {}: {}",
            bad,
            err
        );
    }

    assert!(find_arc_segments(&[[0.0, 0.0], [f64::NAN, 1.0], [2.0, 2.0]], &[]).is_err());
    assert!(fit_toolpath(&[[0.0, 0.0, f64::NAN]], &[], &ScanConfig::default()).is_err());
}

#[test]
fn test_degenerate_inputs() {
    let empty: Vec<Vec<f64>> = Vec::new();
    assert!(find_arc_segments(&empty, &[]).unwrap().is_empty());
    assert!(find_arc_segments(&[[1.0, 2.0]], &[]).unwrap().is_empty());
    assert!(find_arc_segments(&[[1.0, 2.0], [1.0, 2.0]], &[])
        .unwrap()
        .is_empty());
}

// ==================== Output ====================

#[test]
fn test_json_arcs_carry_endpoints_as_points() {
    let points = circle_points(0.0, 0.0, 10.0, 0.0, 90.0, 10);
    let segments = find_arc_segments(&points, &[]).unwrap();
    let value = serde_json::to_value(&segments).unwrap();

    let arc = &value[0];
    assert_eq!(arc["type"], "arc");
    assert_eq!(arc["points"], serde_json::json!([arc["start"], arc["end"]]));

    // Consumers keyed on `points` see the arc and round-trip it unchanged.
    let back: Vec<Segment> = serde_json::from_value(value).unwrap();
    assert_eq!(back, segments);
}

// ==================== G-code ====================

#[test]
fn test_gcode_uses_arc_moves() {
    let points = slot_profile();
    let segments = find_arc_segments(&points, &[]).unwrap();
    let gcode = generate_gcode(&segments, &GcodeConfig::default());

    let arc_moves = gcode.lines().filter(|l| l.starts_with("G03")).count();
    let arcs = segments.iter().filter(|s| s.is_arc()).count();
    assert_eq!(arc_moves, arcs);
    assert!(arc_moves >= 1);
    // One plunge: the segments are continuous.
    assert_eq!(gcode.lines().filter(|l| l.starts_with("G01 Z")).count(), 1);
    assert!(gcode.lines().count() < points.len() + 12);
}
