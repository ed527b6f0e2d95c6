//! Workflow configuration (§3 `WorkflowConfig`), loadable from / dumpable
//! to JSON with a round-trip guarantee (§10.3 / §8).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculators::METHOD2_FREQUENCIES;
use crate::error::{WorkflowError, WorkflowResult};

pub use crate::calculators::RainRatioMethod;

pub const DEFAULT_POINTS_ID_FIELDNAME: &str = "Naacc_Culvert_Id";
pub const DEFAULT_POINTS_GROUP_FIELDNAME: &str = "Survey_Id";
pub const DEFAULT_POINTS_SPATIAL_REF_CODE: i32 = 4326;
pub const DEFAULT_AREA_CONV_FACTOR: f64 = 1.0;
pub const DEFAULT_LENGTH_CONV_FACTOR: f64 = 1.0;

/// The ten standard storm return periods (years) this crate recognizes.
/// Method 2's coefficient table only covers the first nine of these --
/// see [`RainRatioMethod::Method2`] and [`METHOD2_FREQUENCIES`].
pub const STANDARD_FREQUENCIES: [i32; 10] = [1, 2, 5, 10, 25, 50, 100, 200, 500, 1000];

fn default_points_id_fieldname() -> String {
    DEFAULT_POINTS_ID_FIELDNAME.to_string()
}
fn default_points_group_fieldname() -> String {
    DEFAULT_POINTS_GROUP_FIELDNAME.to_string()
}
fn default_points_spatial_ref_code() -> i32 {
    DEFAULT_POINTS_SPATIAL_REF_CODE
}
fn default_area_conv_factor() -> f64 {
    DEFAULT_AREA_CONV_FACTOR
}
fn default_length_conv_factor() -> f64 {
    DEFAULT_LENGTH_CONV_FACTOR
}
fn default_sheds_simplify() -> bool {
    true
}
fn default_frequencies() -> Vec<i32> {
    STANDARD_FREQUENCIES.to_vec()
}
fn default_worker_count() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// All inputs, outputs, and tunables for one end-to-end capacity-workflow
/// run. Every field documented in the data model carries a `Default`
/// (§3, §10.3); JSON round-trip is unit-tested, not assumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowConfig {
    /// Path to the input NAACC CSV table.
    #[serde(rename = "pointsFilepath", skip_serializing_if = "Option::is_none")]
    pub points_filepath: Option<String>,

    /// Column holding each row's culvert identifier.
    #[serde(rename = "pointsIdFieldname", default = "default_points_id_fieldname")]
    pub points_id_fieldname: String,
    /// Column holding each row's crossing/group identifier.
    #[serde(rename = "pointsGroupFieldname", default = "default_points_group_fieldname")]
    pub points_group_fieldname: String,
    /// WKID the input points' coordinates are expressed in.
    #[serde(rename = "pointsSpatialRefCode", default = "default_points_spatial_ref_code")]
    pub points_spatial_ref_code: i32,

    /// Path to the flow-direction raster C6 delineates against. Required
    /// for delineation to run at all.
    #[serde(rename = "rasterFlowdirFilepath", skip_serializing_if = "Option::is_none")]
    pub raster_flowdir_filepath: Option<String>,
    /// Path to the slope raster for zonal statistics.
    #[serde(rename = "rasterSlopeFilepath", skip_serializing_if = "Option::is_none")]
    pub raster_slope_filepath: Option<String>,
    /// Path to the flow-length raster for zonal statistics.
    #[serde(rename = "rasterFlowlenFilepath", skip_serializing_if = "Option::is_none")]
    pub raster_flowlen_filepath: Option<String>,
    /// Path to the NRCS curve-number raster for zonal statistics.
    #[serde(rename = "rasterCurvenumberFilepath", skip_serializing_if = "Option::is_none")]
    pub raster_curvenumber_filepath: Option<String>,

    /// Path to the rainfall-raster configuration JSON (§6.1), if rainfall
    /// sampling is enabled for this run.
    #[serde(rename = "precipSrcConfigFilepath", skip_serializing_if = "Option::is_none")]
    pub precip_src_config_filepath: Option<String>,

    /// Path to write the enriched-points output CSV, if any.
    #[serde(rename = "outputPointsFilepath", skip_serializing_if = "Option::is_none")]
    pub output_points_filepath: Option<String>,
    /// Path to write the merged watershed-polygon output, if any.
    #[serde(rename = "outputShedsFilepath", skip_serializing_if = "Option::is_none")]
    pub output_sheds_filepath: Option<String>,

    /// Whether the backend should simplify watershed polygons before
    /// writing them.
    #[serde(rename = "shedsSimplify", default = "default_sheds_simplify")]
    pub sheds_simplify: bool,

    /// Multiplier applied to area-valued backend outputs.
    #[serde(rename = "areaConvFactor", default = "default_area_conv_factor")]
    pub area_conv_factor: f64,
    /// Multiplier applied to length-valued backend outputs.
    #[serde(rename = "lengConvFactor", default = "default_length_conv_factor")]
    pub leng_conv_factor: f64,

    /// Storm return periods to analyze, years.
    #[serde(rename = "frequencies", default = "default_frequencies")]
    pub frequencies: Vec<i32>,
    /// Which rain-ratio method (§4.2.3) to use for peak-flow derivation.
    #[serde(rename = "rainRatioMethod", default)]
    pub rain_ratio_method: RainRatioMethod,

    /// Directory the geoprocessing backend may use for intermediate files.
    #[serde(rename = "scratchWorkspace", skip_serializing_if = "Option::is_none")]
    pub scratch_workspace: Option<String>,
    /// Upper bound on concurrent per-point delineation tasks (§5).
    #[serde(rename = "workerCount", default = "default_worker_count")]
    pub worker_count: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            points_filepath: None,
            points_id_fieldname: default_points_id_fieldname(),
            points_group_fieldname: default_points_group_fieldname(),
            points_spatial_ref_code: default_points_spatial_ref_code(),
            raster_flowdir_filepath: None,
            raster_slope_filepath: None,
            raster_flowlen_filepath: None,
            raster_curvenumber_filepath: None,
            precip_src_config_filepath: None,
            output_points_filepath: None,
            output_sheds_filepath: None,
            sheds_simplify: default_sheds_simplify(),
            area_conv_factor: default_area_conv_factor(),
            leng_conv_factor: default_length_conv_factor(),
            frequencies: default_frequencies(),
            rain_ratio_method: RainRatioMethod::default(),
            scratch_workspace: None,
            worker_count: default_worker_count(),
        }
    }
}

impl WorkflowConfig {
    /// Load from a JSON file on disk.
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

    /// Write as JSON to disk.
    pub fn dump(&self, path: impl AsRef<Path>) -> WorkflowResult<()> {
        let text = serde_json::to_string_pretty(self).map_err(|source| WorkflowError::ConfigParse {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(WorkflowError::Io)
    }

    /// §4.2.5 workflow-level validity check: reject Method 2 combined
    /// with the 1000-year frequency, since Method 2's coefficient table
    /// doesn't cover it.
    pub fn validate_rain_ratio_combination(&self) -> WorkflowResult<()> {
        if self.rain_ratio_method == RainRatioMethod::Method2 {
            for freq in &self.frequencies {
                if !METHOD2_FREQUENCIES.contains(freq) {
                    return Err(WorkflowError::UnsupportedRainRatioFrequency(*freq));
                }
            }
        }
        Ok(())
    }
}
