//! Arc recovery: point cleaning, circle fitting, hint matching, validation
//! and the windowed scan.

mod arc;
mod circle;
mod estimate;
mod hint;
mod normalize;
mod scan;

pub use arc::{check_arc, fit_arc, Rejection};
pub use circle::{fit_circle, Circle};
pub use estimate::estimate_radius;
pub use hint::{NearestHint, NoHints, RadiusMatcher};
pub use normalize::{normalize_point, normalize_points, remove_consecutive_duplicates};
pub use scan::{find_arc_segments, scan_segments, Scanner, SegmentBuilder};
