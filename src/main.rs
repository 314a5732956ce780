//! arcfit - CLI tool to replace linearized curves in a toolpath with arcs.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use arcfit::generator::{write_program, GcodeWriter};
use arcfit::parser::{read_hints_file, read_toolpath_file};
use arcfit::{fit_toolpath, GcodeConfig, ScanConfig};

/// Recover circular arcs from a dense JSON toolpath.
#[derive(Parser, Debug)]
#[command(name = "arcfit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input toolpath JSON file (array of [x, y] or [x, y, z] points)
    #[arg(short, long)]
    input: PathBuf,

    /// Hint arcs JSON file (array of objects with a radius)
    #[arg(long)]
    hints: Option<PathBuf>,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit a G-code program instead of JSON segments
    #[arg(long)]
    gcode: bool,

    /// Cutting feed rate (mm/min)
    #[arg(long, default_value_t = 500.0)]
    feed_rate: f64,

    /// Retract height
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    safe_z: f64,

    /// Cutting depth
    #[arg(long, default_value_t = -1.0, allow_negative_numbers = true)]
    step_down: f64,

    /// Spindle speed (rpm)
    #[arg(long, default_value_t = 1000)]
    spindle_speed: u32,

    /// Prefix G-code blocks with N line numbers
    #[arg(long)]
    line_numbers: bool,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args) {
        error!("{:#}", err);
        if !args.gcode {
            println!("{}", json!({"status": "error", "message": format!("{:#}", err)}));
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    info!("Processing: {}", args.input.display());

    let points = read_toolpath_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let hints = match &args.hints {
        Some(path) => read_hints_file(path)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        None => Vec::new(),
    };

    info!("Read {} point(s), {} hint(s)", points.len(), hints.len());

    let report = fit_toolpath(&points, &hints, &ScanConfig::default())?;

    let arcs = report.segments.iter().filter(|s| s.is_arc()).count();
    let path_length: f64 = report.segments.iter().map(|s| s.length()).sum();
    info!(
        "Recovered {} arc(s) in {} segment(s), path length {:.3}",
        arcs,
        report.segments.len(),
        path_length
    );

    for warning in &report.validation.warnings {
        warn!("{}", warning);
    }
    for err in &report.validation.errors {
        warn!("{}", err);
    }

    // Validate-only mode
    if args.validate {
        if !report.validation.passed {
            anyhow::bail!("Validation failed");
        }
        info!("Validation passed");
        return Ok(());
    }

    let content = if args.gcode {
        let config = GcodeConfig {
            feed_rate: args.feed_rate,
            safe_z: args.safe_z,
            step_down: args.step_down,
            spindle_speed: args.spindle_speed,
        };
        let mut writer = if args.line_numbers {
            GcodeWriter::numbered(10, 10)
        } else {
            GcodeWriter::new()
        };
        write_program(&mut writer, &report.segments, &config);
        writer.take_output()
    } else {
        let envelope = json!({
            "status": "success",
            "toolpath_segments": report.segments,
        });
        format!("{}\n", serde_json::to_string_pretty(&envelope)?)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}
