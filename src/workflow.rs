//! Workflow manager (C8, §4.5). Owns the `WorkflowConfig`, composes the
//! capacity-workflow stages (C4 → C6 → C7 → C9), and is the single
//! writer of output datasets after every worker has completed (§5
//! "Shared resources").

use log::info;

use crate::cancellation::CancellationToken;
use crate::delineation::delineate_points;
use crate::error::{WorkflowError, WorkflowResult};
use crate::geoprocessing::GeoprocessingBackend;
use crate::io::write_enriched_points_csv;
use crate::model::config::WorkflowConfig;
use crate::model::point::Point;
use crate::model::rainfall::RainfallRasterConfig;
use crate::naacc::ingest_naacc_csv;

use crate::crossing::analyze_points;

/// The result of one `run()`: the fully-analyzed point sequence, sorted
/// by `uid` (§5 "Ordering": "not guaranteed unless the implementation
/// sorts by uid").
pub struct WorkflowOutcome {
    pub points: Vec<Point>,
}

/// Drives one end-to-end capacity-workflow run against a configured
/// backend: load points → C4 → C6 (parallel) → C7 → write outputs.
pub struct Workflow {
    pub config: WorkflowConfig,
}

impl Workflow {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> WorkflowResult<Self> {
        Ok(Self { config: WorkflowConfig::load(path)? })
    }

    /// Execute the full workflow: C4 ingest, C6 delineation, C7
    /// analytics/aggregation, and (if configured) C9 output writing.
    /// A single `run()` observes one consistent configuration snapshot.
    pub fn run(&self, backend: &dyn GeoprocessingBackend) -> WorkflowResult<WorkflowOutcome> {
        self.run_cancellable(backend, None)
    }

    /// As [`Self::run`], but accepts a [`CancellationToken`] honored
    /// between points in C6 and between crossings in C7's aggregation
    /// reduction (§5 "Cancellation"). Partial results already attached
    /// or written at the point of cancellation remain valid.
    pub fn run_cancellable(
        &self,
        backend: &dyn GeoprocessingBackend,
        cancel: Option<&CancellationToken>,
    ) -> WorkflowResult<WorkflowOutcome> {
        self.config.validate_rain_ratio_combination()?;

        let points_filepath = self
            .config
            .points_filepath
            .as_ref()
            .ok_or(WorkflowError::MissingConfigField("points_filepath"))?;

        info!("loading points from {points_filepath}");
        let mut points = ingest_naacc_csv(points_filepath, self.config.points_spatial_ref_code)?;
        info!("{} points loaded", points.len());

        let rainfall_config = match &self.config.precip_src_config_filepath {
            Some(path) => Some(RainfallRasterConfig::load(path)?),
            None => None,
        };

        info!("delineating catchments for included points");
        delineate_points(&mut points, &self.config, rainfall_config.as_ref(), backend, cancel);

        info!("running analytics and crossing aggregation");
        analyze_points(&mut points, self.config.rain_ratio_method, cancel);

        points.sort_by(|a, b| a.uid.cmp(&b.uid));

        if let Some(output_path) = &self.config.output_points_filepath {
            info!("writing enriched points to {output_path}");
            write_enriched_points_csv(&points, &self.config.frequencies, output_path)?;
        }

        if let Some(output_path) = &self.config.output_sheds_filepath {
            let shed_vector_paths: Vec<(String, String)> = points
                .iter()
                .filter_map(|p| p.shed.as_ref().and_then(|s| s.filepath_vector.clone()).map(|path| (p.uid.clone(), path)))
                .collect();
            if shed_vector_paths.is_empty() {
                info!("no watershed polygons to merge; skipping {output_path}");
            } else {
                info!("writing merged watershed polygons to {output_path}");
                backend.write_merged_sheds(&shed_vector_paths, output_path)?;
            }
        }

        info!("workflow complete");
        Ok(WorkflowOutcome { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geoprocessing::stub::StubBackend;
    use crate::geoprocessing::DelineationResult;
    use std::io::Write;

    fn write_sample_csv(path: &std::path::Path) {
        let mut f = std::fs::File::create(path).unwrap();
        writeln!(
            f,
            "Naacc_Culvert_Id,Survey_Id,GIS_Latitude,GIS_Longitude,Number_Of_Culverts,Material,Inlet_Type,Inlet_Structure_Type,Inlet_Width,Inlet_Height,Road_Fill_Height,Slope_Percent,Crossing_Structure_Length,Outlet_Structure_Type,Outlet_Width,Outlet_Height,Crossing_Type"
        )
        .unwrap();
        writeln!(f, "1,75158,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Culvert").unwrap();
    }

    #[test]
    fn run_end_to_end_against_stub_backend() {
        let dir = std::env::temp_dir();
        let input_path = dir.join("drainit_workflow_test_input.csv");
        let output_path = dir.join("drainit_workflow_test_output.csv");
        write_sample_csv(&input_path);

        let mut config = WorkflowConfig::default();
        config.points_filepath = Some(input_path.to_string_lossy().into_owned());
        config.raster_flowdir_filepath = Some("fd.tif".into());
        config.output_points_filepath = Some(output_path.to_string_lossy().into_owned());

        let default = DelineationResult {
            area_sqkm: 1.2,
            avg_slope_pct: 3.0,
            avg_cn: 68.0,
            max_fl_m: 250.0,
            avg_rainfall: vec![(100, 58000.0, "inches/1000".into())],
            filepath_raster: None,
            filepath_vector: None,
        };
        let backend = StubBackend::new().with_default_result(default);

        let workflow = Workflow::new(config);
        let outcome = workflow.run(&backend).unwrap();

        assert_eq!(outcome.points.len(), 1);
        assert!(outcome.points[0].capacity.culvert_capacity.is_some());
        assert!(output_path.exists());

        std::fs::remove_file(&input_path).ok();
        std::fs::remove_file(&output_path).ok();
    }

    #[test]
    fn run_without_points_filepath_is_a_config_error() {
        let config = WorkflowConfig::default();
        let backend = StubBackend::new();
        let workflow = Workflow::new(config);
        assert!(workflow.run(&backend).is_err());
    }

    #[test]
    fn pre_cancelled_token_still_completes_with_undelineated_points() {
        use crate::cancellation::CancellationToken;

        let dir = std::env::temp_dir();
        let input_path = dir.join("drainit_workflow_test_cancel_input.csv");
        write_sample_csv(&input_path);

        let mut config = WorkflowConfig::default();
        config.points_filepath = Some(input_path.to_string_lossy().into_owned());
        config.raster_flowdir_filepath = Some("fd.tif".into());

        let default = DelineationResult {
            area_sqkm: 1.2,
            avg_slope_pct: 3.0,
            avg_cn: 68.0,
            max_fl_m: 250.0,
            avg_rainfall: vec![(100, 58000.0, "inches/1000".into())],
            filepath_raster: None,
            filepath_vector: None,
        };
        let backend = StubBackend::new().with_default_result(default);
        let token = CancellationToken::new();
        token.cancel();

        let workflow = Workflow::new(config);
        let outcome = workflow.run_cancellable(&backend, Some(&token)).unwrap();

        assert_eq!(outcome.points.len(), 1);
        assert!(outcome.points[0].shed.is_none());

        std::fs::remove_file(&input_path).ok();
    }
}
