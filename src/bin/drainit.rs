//! Thin `clap` front end over the capacity workflow (C12, §6.3/§10.5).
//!
//! Three subcommands: `ingest` (NAACC-only validation/hydration, no
//! delineation), `rainfall-config` (checks a pre-built rainfall-raster
//! configuration, since the fetch itself is an out-of-scope collaborator),
//! and `run` (the full capacity workflow). A run that produces partial
//! results with per-row errors still exits 0 -- those errors are reported
//! in the output columns, not the exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use drainit::error::WorkflowError;
use drainit::geoprocessing::stub::StubBackend;
use drainit::io::write_enriched_points_csv;
use drainit::model::rainfall::RainfallRasterConfig;
use drainit::naacc::{ingest_naacc_csv, split_valid_invalid};
use drainit::workflow::Workflow;

#[derive(Parser)]
#[command(name = "drainit")]
#[command(version = "0.1.0")]
#[command(about = "NAACC culvert capacity and TR-55 peak-flow analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a NAACC survey CSV: validate, cross-walk, derive capacity
    /// parameters, and compute single-barrel culvert capacity. No
    /// watershed delineation is performed.
    Ingest {
        /// NAACC-compliant source CSV.
        #[arg(long, value_name = "FILE")]
        source: PathBuf,
        /// Destination prefix; writes `<prefix>_naacc_valid.csv` and
        /// `<prefix>_naacc_invalid.csv`.
        #[arg(long, value_name = "PREFIX")]
        output: PathBuf,
        /// Coordinate reference system WKID of the lat/lng columns.
        #[arg(long, default_value_t = 4326)]
        wkid: i32,
    },

    /// Check a rainfall-raster configuration JSON for structural
    /// validity. Does not fetch rainfall data -- remote acquisition is an
    /// out-of-scope collaborator (§1); this command only validates a
    /// pre-built configuration file.
    RainfallConfig {
        /// Path to the rainfall raster configuration JSON (§6.1).
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Run the full capacity workflow: NAACC ingest, per-point watershed
    /// delineation and zonal statistics, analytics, crossing aggregation,
    /// and output writing.
    Run {
        /// Workflow configuration JSON (§3 `WorkflowConfig`).
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Ingest { source, output, wkid } => run_ingest(&source, &output, wkid),
        Command::RainfallConfig { config } => run_rainfall_config_check(&config),
        Command::Run { config } => run_workflow(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_ingest(source: &PathBuf, output_prefix: &PathBuf, wkid: i32) -> Result<(), WorkflowError> {
    let points = ingest_naacc_csv(source, wkid)?;
    let (valid, invalid): (Vec<_>, Vec<_>) = {
        let (v, i) = split_valid_invalid(&points);
        (v.into_iter().cloned().collect(), i.into_iter().cloned().collect())
    };

    let valid_path = with_suffix(output_prefix, "_naacc_valid.csv");
    let invalid_path = with_suffix(output_prefix, "_naacc_invalid.csv");

    let frequencies = drainit::model::config::STANDARD_FREQUENCIES;
    write_enriched_points_csv(&valid, &frequencies, &valid_path)?;
    write_enriched_points_csv(&invalid, &frequencies, &invalid_path)?;

    println!(
        "ingested {} rows: {} valid, {} invalid",
        points.len(),
        valid.len(),
        invalid.len()
    );
    println!("wrote {}", valid_path.display());
    println!("wrote {}", invalid_path.display());
    Ok(())
}

fn run_rainfall_config_check(config_path: &PathBuf) -> Result<(), WorkflowError> {
    let config = RainfallRasterConfig::load(config_path)?;
    if config.rasters.is_empty() {
        return Err(WorkflowError::InvalidRainfallConfig {
            path: config_path.clone(),
            reason: "no rasters declared".to_string(),
        });
    }
    println!(
        "rainfall configuration at {} is valid: {} raster(s) under {}",
        config_path.display(),
        config.rasters.len(),
        config.root
    );
    for raster in config.rasters_by_frequency() {
        println!("  {}-year: {}", raster.freq, config.absolute_path(raster).display());
    }
    Ok(())
}

fn run_workflow(config_path: &PathBuf) -> Result<(), WorkflowError> {
    let workflow = Workflow::from_json_file(config_path)?;
    // This binary ships only the in-memory stub backend (§6.2 names the
    // capability set; no external-engine-backed implementation ships
    // with this crate per SPEC_FULL.md §9). A production deployment
    // swaps in a real `GeoprocessingBackend` here.
    let backend = StubBackend::new();
    let outcome = workflow.run(&backend)?;
    println!("analyzed {} points", outcome.points.len());
    Ok(())
}

fn with_suffix(prefix: &PathBuf, suffix: &str) -> PathBuf {
    let mut s = prefix.to_string_lossy().into_owned();
    s.push_str(suffix);
    PathBuf::from(s)
}
