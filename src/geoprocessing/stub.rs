//! In-memory/filesystem-light stub backend (§6.2): satisfies
//! [`GeoprocessingBackend`]'s contract without requiring an external
//! raster/GIS engine, so C6/C7/C8 can be exercised in unit and
//! integration tests. Test code registers raster metadata and, for any
//! point it cares about the exact numbers of, a canned
//! [`DelineationResult`]; points with no registered result fall back to
//! a single default, so large fixture tables don't need one entry per
//! point.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{DelineationResult, GeoprocessingBackend, PourPoint, RasterMeta};
use crate::error::{WorkflowError, WorkflowResult};

/// A deterministic stand-in geoprocessing backend, keyed by raster path
/// and point `uid`. Never touches the filesystem for raster content --
/// only `write_merged_sheds` writes anything, and that write is a plain
/// text manifest, not a real geodataset.
#[derive(Debug, Default)]
pub struct StubBackend {
    rasters: HashMap<String, RasterMeta>,
    point_results: HashMap<String, DelineationResult>,
    default_result: Option<DelineationResult>,
    written_manifests: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata returned by [`GeoprocessingBackend::raster_meta`]
    /// for a given path.
    pub fn with_raster(mut self, path: impl Into<String>, meta: RasterMeta) -> Self {
        self.rasters.insert(path.into(), meta);
        self
    }

    /// Register the exact delineation result to hand back for a given
    /// point `uid`.
    pub fn with_point_result(mut self, uid: impl Into<String>, result: DelineationResult) -> Self {
        self.point_results.insert(uid.into(), result);
        self
    }

    /// Set the fallback result used for any point not registered via
    /// [`Self::with_point_result`].
    pub fn with_default_result(mut self, result: DelineationResult) -> Self {
        self.default_result = Some(result);
        self
    }

    /// Paths passed to [`GeoprocessingBackend::write_merged_sheds`] during
    /// this backend's lifetime, for test assertions.
    pub fn written_manifests(&self) -> Vec<String> {
        self.written_manifests.lock().unwrap().clone()
    }
}

impl GeoprocessingBackend for StubBackend {
    fn raster_meta(&self, path: &str) -> WorkflowResult<RasterMeta> {
        self.rasters
            .get(path)
            .cloned()
            .ok_or_else(|| WorkflowError::MissingInput(path.into()))
    }

    fn delineate_and_summarize(
        &self,
        point: &PourPoint,
        _flowdir_raster: &str,
        _slope_raster: &str,
        _curvenumber_raster: &str,
        _flowlen_raster: Option<&str>,
        rainfall_rasters: &[(i32, String, String)],
        _scratch_workspace: &str,
    ) -> WorkflowResult<DelineationResult> {
        if let Some(result) = self.point_results.get(&point.uid) {
            return Ok(result.clone());
        }
        if let Some(default) = &self.default_result {
            let mut result = default.clone();
            if result.avg_rainfall.is_empty() {
                result.avg_rainfall = rainfall_rasters
                    .iter()
                    .map(|(freq, _path, units)| (*freq, 0.0, units.clone()))
                    .collect();
            }
            return Ok(result);
        }
        Err(WorkflowError::BackendCapabilityUnavailable(
            "no registered result for this point and no default result configured",
        ))
    }

    fn write_merged_sheds(&self, shed_vector_paths: &[(String, String)], output_path: &str) -> WorkflowResult<()> {
        let manifest = shed_vector_paths
            .iter()
            .map(|(uid, path)| format!("{uid}\t{path}"))
            .collect::<Vec<_>>()
            .join("\n");
        std::fs::write(output_path, manifest).map_err(WorkflowError::Io)?;
        self.written_manifests.lock().unwrap().push(output_path.to_string());
        Ok(())
    }
}
