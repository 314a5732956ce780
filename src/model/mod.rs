//! Data model types for toolpath arc fitting.

mod hint;
mod point;
mod segment;

pub use hint::ArcHint;
pub use point::Point3D;
pub use segment::{ArcDirection, ArcSegment, Segment};
