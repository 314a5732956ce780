//! JSON toolpath and hint input.

use serde_json::Value;
use std::path::Path;

use crate::error::{ArcFitError, Result};
use crate::model::ArcHint;

/// Parse a toolpath: a JSON array of `[x, y]` or `[x, y, z]` arrays.
///
/// Component counts are not checked here; the normalizer rejects short points.
pub fn parse_toolpath(content: &str) -> Result<Vec<Vec<f64>>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(ArcFitError::NotAnArray { what: "points" });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<Vec<f64>> {
            let Value::Array(components) = item else {
                return Err(ArcFitError::InvalidValue {
                    index,
                    value: item.to_string(),
                });
            };
            components
                .iter()
                .map(|c| {
                    c.as_f64().ok_or_else(|| ArcFitError::InvalidValue {
                        index,
                        value: c.to_string(),
                    })
                })
                .collect()
        })
        .collect()
}

/// Parse hint arcs: a JSON array of objects with an optional `radius`.
pub fn parse_hints(content: &str) -> Result<Vec<ArcHint>> {
    let value: Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(ArcFitError::NotAnArray { what: "hint objects" });
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a toolpath file.
pub fn read_toolpath_file(path: &Path) -> Result<Vec<Vec<f64>>> {
    parse_toolpath(&read_non_empty(path)?)
}

/// Read and parse a hint file.
pub fn read_hints_file(path: &Path) -> Result<Vec<ArcHint>> {
    parse_hints(&read_non_empty(path)?)
}

fn read_non_empty(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ArcFitError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(content)
}
