//! Input parsing for toolpaths and arc hints.

mod toolpath;

pub use toolpath::{parse_hints, parse_toolpath, read_hints_file, read_toolpath_file};
