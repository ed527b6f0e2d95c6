//! Workflow-level error model (§7 kind 2 / §10.2)
//!
//! Per-row data errors (missing fields, bad geometry, etc.) are never
//! exceptions: they live in `Point::validation_errors`. This enum is
//! reserved for failures that abort a `run()` before or during
//! orchestration -- bad config, an unreadable source table, a missing
//! raster, or a backend that can't do what it's asked.

use std::path::PathBuf;
use thiserror::Error;

/// Workflow-level failure. Carries enough context to name the offending
/// input; never used to represent a per-row validation error.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("required input not found: {0}")]
    MissingInput(PathBuf),

    #[error("could not read NAACC source table {path}: {source}")]
    NaaccReadFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("malformed configuration JSON at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("workflow config is missing required field: {0}")]
    MissingConfigField(&'static str),

    #[error("geoprocessing backend does not support capability: {0}")]
    BackendCapabilityUnavailable(&'static str),

    #[error("rainfall raster configuration at {path} is invalid: {reason}")]
    InvalidRainfallConfig { path: PathBuf, reason: String },

    #[error(
        "rain ratio method 2 does not have coefficients for frequency {0}; \
         method 2 only covers the 9 standard return periods excluding 1000"
    )]
    UnsupportedRainRatioFrequency(i32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
