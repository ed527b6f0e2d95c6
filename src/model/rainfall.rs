//! Rainfall depth samples and the rainfall-raster configuration (§3
//! `Rainfall`, §6.1 rainfall raster configuration JSON).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WorkflowError, WorkflowResult};

/// NOAA Atlas 14 raw values arrive in thousandths of an inch.
pub const DEFAULT_RAINFALL_UNITS: &str = "inches/1000";

/// One depth sample for a given storm frequency/duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rainfall {
    /// Storm return period, years.
    pub freq: i32,
    /// Storm duration label (e.g. "24h"), as declared by the rainfall source.
    pub dur: String,
    /// Raw rainfall depth, in `units`.
    pub value: f64,
    /// Units `value` is expressed in; see [`rainfall_value_to_cm`].
    #[serde(default = "default_rainfall_units")]
    pub units: String,
}

fn default_rainfall_units() -> String {
    DEFAULT_RAINFALL_UNITS.to_string()
}

/// Convert a raw rainfall value + its declared units into centimetres.
/// The only units this crate round-trips are thousandths-of-an-inch
/// (the NOAA Atlas 14 raw format), plain inches, and plain centimetres --
/// anything else is treated as already-centimetres with the value passed
/// through, since the rainfall-raster set is an out-of-scope collaborator
/// input whose units are declared by its own configuration.
pub fn rainfall_value_to_cm(value: f64, units: &str) -> f64 {
    match units {
        "inches/1000" => (value / 1000.0) * 2.54,
        "inches" | "in" => value * 2.54,
        "cm" => value,
        _ => value,
    }
}

/// A reference to one rainfall raster on disk, as declared in the
/// rainfall raster configuration JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainfallRaster {
    /// Path to this raster, relative to `RainfallRasterConfig.root`.
    pub path: String,
    /// Storm return period, years.
    pub freq: i32,
    /// File extension (e.g. "tif"), kept separate from `path` so backends
    /// can derive sidecar filenames.
    pub ext: String,
    /// Units the raster's cell values are expressed in.
    #[serde(default = "default_rainfall_units")]
    pub units: String,
}

/// Rainfall raster set configuration: a root directory plus the list of
/// per-frequency rasters relative to it (§6.1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RainfallRasterConfig {
    /// Root directory every `RainfallRaster.path` is relative to.
    pub root: String,
    /// The declared rasters, one per modeled frequency.
    #[serde(default)]
    pub rasters: Vec<RainfallRaster>,
}

impl RainfallRasterConfig {
    /// Load from a JSON file on disk (§6.1).
    pub fn load(path: impl AsRef<Path>) -> WorkflowResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| WorkflowError::NaaccReadFailure {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        serde_json::from_str(&text).map_err(|source| WorkflowError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Absolute path to a given raster entry.
    pub fn absolute_path(&self, raster: &RainfallRaster) -> PathBuf {
        Path::new(&self.root).join(&raster.path)
    }

    /// Return rasters sorted by ascending frequency.
    pub fn rasters_by_frequency(&self) -> Vec<&RainfallRaster> {
        let mut rs: Vec<&RainfallRaster> = self.rasters.iter().collect();
        rs.sort_by_key(|r| r.freq);
        rs
    }
}
