//! Sensor extrinsics decomposer
//!
//! Reads a vehicle calibration file, normalizes every sensor transform to
//! vehicle-from-sensor and writes translation plus roll/pitch/yaw per sensor.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use extrinsics_core::{run, DecomposeConfig, ValidationMode, DEFAULT_VEHICLE_ID};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_OUTPUT: &str = "calibration_AudiQ8_xyzrpy.json";

#[derive(Parser, Debug)]
#[command(name = "extrinsics")]
#[command(about = "Decompose sensor extrinsics into x/y/z/roll/pitch/yaw", long_about = None)]
#[command(version)]
struct Args {
    /// Calibration file (JSON, or YAML by .yaml/.yml extension)
    input: PathBuf,

    /// Report file to write (overwritten if present)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Top-level identifier in the report
    #[arg(long, default_value = DEFAULT_VEHICLE_ID)]
    vehicle: String,

    /// Skip rigidity checks on the input transforms
    #[arg(long)]
    unchecked: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn to_config(&self) -> DecomposeConfig {
        let validation = if self.unchecked {
            ValidationMode::Unchecked
        } else {
            ValidationMode::Checked
        };

        DecomposeConfig::new(&self.input, &self.output)
            .with_vehicle_id(self.vehicle.clone())
            .with_validation(validation)
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        "extrinsics_cli=debug,extrinsics_core=debug"
    } else {
        "extrinsics_cli=info,extrinsics_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(&args) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn execute(args: &Args) -> Result<()> {
    let config = args.to_config();
    debug!("{:?}", config);

    let report = run(&config).with_context(|| {
        format!(
            "failed to decompose '{}' into '{}'",
            config.input_path.display(),
            config.output_path.display()
        )
    })?;

    println!(
        "{} Done writing to file: {} ({} records)",
        "✓".green(),
        config.output_path.display(),
        report.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["extrinsics", "calibration_AudiQ8.json"]).unwrap();
        let config = args.to_config();

        assert_eq!(config.input_path, PathBuf::from("calibration_AudiQ8.json"));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.vehicle_id, DEFAULT_VEHICLE_ID);
        assert_eq!(config.validation, ValidationMode::Checked);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "extrinsics",
            "calib.yaml",
            "-o",
            "out.json",
            "--vehicle",
            "Rig",
            "--unchecked",
            "-v",
        ])
        .unwrap();
        let config = args.to_config();

        assert_eq!(config.output_path, PathBuf::from("out.json"));
        assert_eq!(config.vehicle_id, "Rig");
        assert_eq!(config.validation, ValidationMode::Unchecked);
        assert!(args.verbose);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["extrinsics"]).is_err());
    }
}
