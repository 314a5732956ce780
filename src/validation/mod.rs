//! Validation of generated segment lists.

mod validate;

pub use validate::{validate_coverage, validate_segment, validate_segments, ValidationResult};
