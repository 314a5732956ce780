//! G-code program generation.

mod gcode;

pub use gcode::{format_coord, generate_gcode, write_program, GcodeWriter};
