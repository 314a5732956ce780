//! Output segments: straight polylines and recovered circular arcs.

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use super::Point3D;

/// Travel direction around an arc center, viewed from +Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    /// Clockwise (G02).
    Cw,
    /// Counter-clockwise (G03).
    Ccw,
}

impl ArcDirection {
    /// Direction from the sign of an unwrapped sweep angle.
    pub fn from_sweep(sweep: f64) -> Self {
        if sweep > 0.0 {
            ArcDirection::Ccw
        } else {
            ArcDirection::Cw
        }
    }

    /// Motion word for this direction.
    pub fn gcode(&self) -> &'static str {
        match self {
            ArcDirection::Cw => "G02",
            ArcDirection::Ccw => "G03",
        }
    }
}

impl std::fmt::Display for ArcDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArcDirection::Cw => write!(f, "cw"),
            ArcDirection::Ccw => write!(f, "ccw"),
        }
    }
}

/// A circular arc recovered from a run of toolpath points.
///
/// Serialized with an extra `points: [start, end]` entry so arcs share the
/// `points` key with lines; it is ignored when reading back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArcSegment {
    /// First input point of the run, unmodified.
    pub start: Point3D,
    /// Last input point of the run, unmodified.
    pub end: Point3D,
    /// Fitted center; Z is taken from `start`.
    pub center: Point3D,
    /// Fitted radius.
    pub radius: f64,
    pub direction: ArcDirection,
    /// Unwrapped angle of `start` around `center`, in degrees.
    pub start_angle: f64,
    /// Unwrapped angle of `end` around `center`, in degrees.
    pub end_angle: f64,
    /// Largest radial distance of any run point from the fitted circle.
    pub max_deviation: f64,
}

impl ArcSegment {
    /// Signed sweep in degrees (positive for CCW).
    pub fn sweep_degrees(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Center offset from the start point, as used by `I`/`J` words.
    pub fn center_offset(&self) -> (f64, f64) {
        (self.center.x - self.start.x, self.center.y - self.start.y)
    }

    /// Length along the arc in the XY plane.
    pub fn length(&self) -> f64 {
        self.radius * self.sweep_degrees().abs().to_radians()
    }
}

impl Serialize for ArcSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ArcSegment", 9)?;
        state.serialize_field("points", &[self.start, self.end])?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("center", &self.center)?;
        state.serialize_field("radius", &self.radius)?;
        state.serialize_field("direction", &self.direction)?;
        state.serialize_field("start_angle", &self.start_angle)?;
        state.serialize_field("end_angle", &self.end_angle)?;
        state.serialize_field("max_deviation", &self.max_deviation)?;
        state.end()
    }
}

/// One unit of the line/arc partition of a toolpath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    /// Straight moves through every point in order.
    Line { points: Vec<Point3D> },
    /// A single arc move.
    Arc(ArcSegment),
}

impl Segment {
    /// Check if this is a line segment.
    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line { .. })
    }

    /// Check if this is an arc segment.
    pub fn is_arc(&self) -> bool {
        matches!(self, Segment::Arc(_))
    }

    /// First point of the segment.
    pub fn start(&self) -> Option<Point3D> {
        match self {
            Segment::Line { points } => points.first().copied(),
            Segment::Arc(arc) => Some(arc.start),
        }
    }

    /// Last point of the segment.
    pub fn end(&self) -> Option<Point3D> {
        match self {
            Segment::Line { points } => points.last().copied(),
            Segment::Arc(arc) => Some(arc.end),
        }
    }

    /// Points this segment passes through explicitly.
    ///
    /// Arcs only contribute their endpoints.
    pub fn points(&self) -> Vec<Point3D> {
        match self {
            Segment::Line { points } => points.clone(),
            Segment::Arc(arc) => vec![arc.start, arc.end],
        }
    }

    /// Path length in the XY plane.
    pub fn length(&self) -> f64 {
        match self {
            Segment::Line { points } => points
                .windows(2)
                .map(|w| w[0].distance_xy(&w[1]))
                .sum(),
            Segment::Arc(arc) => arc.length(),
        }
    }
}
