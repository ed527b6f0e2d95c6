//! Geoprocessing backend abstraction (C5/C6.2): the capability set every
//! concrete raster/vector engine must provide, plus the one stub
//! implementation this crate ships. Production backends are expected to
//! implement [`GeoprocessingBackend`] against an external raster/GIS
//! library; none ships here (§1 scope boundary).

pub mod stub;

use crate::error::WorkflowResult;

/// Minimal raster metadata a backend must be able to report.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMeta {
    pub crs_wkid: i32,
    pub linear_unit_to_meters: f64,
    pub cell_size: f64,
    pub extent: (f64, f64, f64, f64),
    pub min: f64,
    pub max: f64,
}

/// A point feature submitted as a pour point for delineation.
#[derive(Debug, Clone, PartialEq)]
pub struct PourPoint {
    pub uid: String,
    pub group_id: String,
    pub lng: f64,
    pub lat: f64,
    pub spatial_ref_code: i32,
}

/// The result of delineating and summarizing one point's catchment
/// (§4.3 "Algorithm (one point)").
#[derive(Debug, Clone, PartialEq)]
pub struct DelineationResult {
    pub area_sqkm: f64,
    pub avg_slope_pct: f64,
    pub avg_cn: f64,
    pub max_fl_m: f64,
    /// Raw zonal-mean rainfall value per configured raster, paired with
    /// its declared units -- unconverted (§4.3 step 5 "Store the raw
    /// value and its declared units").
    pub avg_rainfall: Vec<(i32, f64, String)>,
    pub filepath_raster: Option<String>,
    pub filepath_vector: Option<String>,
}

/// The abstract capability set a geoprocessing engine must expose (§6.2).
/// Every method may block; callers run it off the calculators' pure-math
/// path (§5 "Suspension and blocking").
pub trait GeoprocessingBackend: Send + Sync {
    /// Read raster metadata (CRS, linear unit, cell size, extent, min/max).
    fn raster_meta(&self, path: &str) -> WorkflowResult<RasterMeta>;

    /// Delineate one point's catchment and summarize it against the
    /// configured rasters, per §4.3 steps 1-8.
    fn delineate_and_summarize(
        &self,
        point: &PourPoint,
        flowdir_raster: &str,
        slope_raster: &str,
        curvenumber_raster: &str,
        flowlen_raster: Option<&str>,
        rainfall_rasters: &[(i32, String, String)],
        scratch_workspace: &str,
    ) -> WorkflowResult<DelineationResult>;

    /// Persist a set of per-point watershed polygons into a single
    /// merged dataset keyed by `uid` (§4.3 step 9, §6.1 outputs).
    fn write_merged_sheds(&self, shed_vector_paths: &[(String, String)], output_path: &str) -> WorkflowResult<()>;
}
