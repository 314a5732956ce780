//! G-code generation utilities.

use std::fmt::Write;

use crate::config::{GcodeConfig, POSITION_EPS};
use crate::model::{ArcDirection, Point3D, Segment};

/// G-code writer with optional line numbering.
pub struct GcodeWriter {
    /// Next line number, when numbering is enabled.
    line_number: Option<u32>,
    /// Line number increment.
    increment: u32,
    /// Output buffer.
    buffer: String,
}

impl GcodeWriter {
    /// Create an unnumbered writer.
    pub fn new() -> Self {
        Self {
            line_number: None,
            increment: 10,
            buffer: String::new(),
        }
    }

    /// Create a writer that prefixes blocks with `N` words.
    pub fn numbered(start: u32, increment: u32) -> Self {
        Self {
            line_number: Some(start),
            increment,
            buffer: String::new(),
        }
    }

    /// Take the generated G-code.
    pub fn take_output(self) -> String {
        self.buffer
    }

    /// Write a block, numbered if enabled.
    pub fn write_line(&mut self, content: &str) {
        match self.line_number.as_mut() {
            Some(n) => {
                writeln!(self.buffer, "N{} {}", n, content).unwrap();
                *n += self.increment;
            }
            None => {
                writeln!(self.buffer, "{}", content).unwrap();
            }
        }
    }

    /// Write a line without numbering.
    pub fn write_raw(&mut self, content: &str) {
        writeln!(self.buffer, "{}", content).unwrap();
    }

    /// Write a program delimiter.
    pub fn write_terminator(&mut self) {
        self.write_raw("%");
    }

    // === Program setup ===

    /// Program number (O word).
    pub fn program_number(&mut self, number: u32) {
        self.write_raw(&format!("O{:04}", number));
    }

    /// Absolute coordinates, millimeters, XY plane.
    pub fn modal_setup(&mut self) {
        self.write_line("G90 G21 G17");
    }

    /// Spindle on clockwise.
    pub fn spindle_on(&mut self, speed: u32) {
        self.write_line(&format!("M03 S{}", speed));
    }

    /// Spindle stop.
    pub fn spindle_off(&mut self) {
        self.write_line("M05");
    }

    /// Program end.
    pub fn program_end(&mut self) {
        self.write_line("M30");
    }

    // === Movement commands ===

    /// Rapid move in Z (G00).
    pub fn rapid_z(&mut self, z: f64) {
        self.write_line(&format!("G00 Z{}", format_coord(z)));
    }

    /// Rapid move in XY (G00).
    pub fn rapid_move(&mut self, x: f64, y: f64) {
        self.write_line(&format!("G00 X{} Y{}", format_coord(x), format_coord(y)));
    }

    /// Feed move in Z (G01).
    pub fn plunge(&mut self, z: f64, feed: f64) {
        self.write_line(&format!(
            "G01 Z{} F{}",
            format_coord(z),
            format_coord(feed)
        ));
    }

    /// Linear interpolation (G01).
    pub fn linear_move(&mut self, x: f64, y: f64, feed: f64) {
        self.write_line(&format!(
            "G01 X{} Y{} F{}",
            format_coord(x),
            format_coord(y),
            format_coord(feed)
        ));
    }

    /// Circular interpolation (G02/G03) with center offsets `i`, `j`.
    pub fn arc_move(&mut self, direction: ArcDirection, x: f64, y: f64, i: f64, j: f64, feed: f64) {
        self.write_line(&format!(
            "{} X{} Y{} I{} J{} F{}",
            direction.gcode(),
            format_coord(x),
            format_coord(y),
            format_coord(i),
            format_coord(j),
            format_coord(feed)
        ));
    }
}

impl Default for GcodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a coordinate value with three decimals.
pub fn format_coord(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    if formatted == "-0.000" {
        "0.000".to_string()
    } else {
        formatted
    }
}

fn same_xy(a: &Point3D, b: &Point3D) -> bool {
    (a.x - b.x).abs() < POSITION_EPS && (a.y - b.y).abs() < POSITION_EPS
}

/// Render segments as a single-depth milling program.
///
/// Each discontinuity retracts to `safe_z`, rapids to the next segment start
/// and plunges at half feed. Line segments become G01 moves; arc segments
/// become one G02/G03 move with `I`/`J` relative to the arc start.
pub fn generate_gcode(segments: &[Segment], config: &GcodeConfig) -> String {
    let mut writer = GcodeWriter::new();
    write_program(&mut writer, segments, config);
    writer.take_output()
}

/// Write a full program for `segments` into `writer`.
pub fn write_program(writer: &mut GcodeWriter, segments: &[Segment], config: &GcodeConfig) {
    writer.write_terminator();
    writer.program_number(1);
    writer.modal_setup();
    writer.spindle_on(config.spindle_speed);
    writer.rapid_z(config.safe_z);

    let mut current: Option<Point3D> = None;
    let mut cutting = false;

    for segment in segments {
        let Some(start) = segment.start() else {
            continue;
        };

        if current.map_or(true, |c| !same_xy(&c, &start)) {
            if cutting {
                writer.rapid_z(config.safe_z);
            }
            writer.rapid_move(start.x, start.y);
            writer.plunge(config.step_down, config.feed_rate / 2.0);
            cutting = true;
        } else if !cutting {
            writer.plunge(config.step_down, config.feed_rate / 2.0);
            cutting = true;
        }

        match segment {
            Segment::Line { points } => {
                for point in &points[1..] {
                    writer.linear_move(point.x, point.y, config.feed_rate);
                    current = Some(*point);
                }
            }
            Segment::Arc(arc) => {
                let (i, j) = arc.center_offset();
                writer.arc_move(arc.direction, arc.end.x, arc.end.y, i, j, config.feed_rate);
                current = Some(arc.end);
            }
        }
    }

    if cutting {
        writer.rapid_z(config.safe_z);
    }
    writer.spindle_off();
    writer.program_end();
    writer.write_terminator();
}
