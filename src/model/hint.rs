//! Arc hints taken from the source drawing geometry.

use serde::{Deserialize, Serialize};

/// A known arc from the source drawing.
///
/// Only the radius is used; any other fields in the hint JSON are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcHint {
    #[serde(default)]
    pub radius: Option<f64>,
}

impl ArcHint {
    /// Create a hint with a known radius.
    pub fn new(radius: f64) -> Self {
        Self {
            radius: Some(radius),
        }
    }
}
