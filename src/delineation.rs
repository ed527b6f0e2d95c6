//! Per-point delineation & zonal analytics (C6, §4.3). Walks the
//! included points of a workflow, calling the geoprocessing backend
//! once per point to produce a [`Shed`], in parallel via `rayon` (§5
//! "parallel over points"), bounded by `config.worker_count` concurrent
//! tasks (§5 "upper bound on concurrent per-point delineation tasks").

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::cancellation::CancellationToken;
use crate::geoprocessing::{GeoprocessingBackend, PourPoint};
use crate::model::config::WorkflowConfig;
use crate::model::point::Point;
use crate::model::rainfall::RainfallRasterConfig;
use crate::model::shed::Shed;

/// Delineate and summarize every included point's catchment, attaching
/// the resulting `Shed` in place. Points already excluded by C4 are
/// skipped -- their `shed` stays `None`. A per-point delineation failure
/// is recorded as a validation error and does not abort the run (§4.3
/// "Failure semantics" / §5). `cancel`, if set, is checked between
/// points; once tripped, remaining points are left undelineated and any
/// sheds already attached are left valid (§5 "Cancellation").
pub fn delineate_points(
    points: &mut [Point],
    config: &WorkflowConfig,
    rainfall_config: Option<&RainfallRasterConfig>,
    backend: &dyn GeoprocessingBackend,
    cancel: Option<&CancellationToken>,
) {
    let Some(flowdir) = config.raster_flowdir_filepath.as_deref() else {
        warn!("no flow-direction raster configured; skipping delineation for all points");
        return;
    };
    let slope = config.raster_slope_filepath.as_deref().unwrap_or("");
    let curvenumber = config.raster_curvenumber_filepath.as_deref().unwrap_or("");
    let flowlen = config.raster_flowlen_filepath.as_deref();
    let scratch = config.scratch_workspace.as_deref().unwrap_or(".");

    let rainfall_rasters: Vec<(i32, String, String)> = rainfall_config
        .map(|rc| {
            rc.rasters_by_frequency()
                .into_iter()
                .map(|r| (r.freq, rc.absolute_path(r).to_string_lossy().into_owned(), r.units.clone()))
                .collect()
        })
        .unwrap_or_default();

    let delineate_all = || -> Vec<(usize, Option<Shed>, Option<String>)> {
        points
            .par_iter()
            .enumerate()
            .map(|(idx, point)| {
                if !point.include {
                    return (idx, None, None);
                }
                if cancel.is_some_and(|c| c.is_cancelled()) {
                    return (idx, None, None);
                }
                let pour_point = PourPoint {
                    uid: point.uid.clone(),
                    group_id: point.group_id.clone(),
                    lng: point.naacc.lng,
                    lat: point.naacc.lat,
                    spatial_ref_code: point.naacc.spatial_ref_code,
                };
                match backend.delineate_and_summarize(
                    &pour_point,
                    flowdir,
                    slope,
                    curvenumber,
                    flowlen,
                    &rainfall_rasters,
                    scratch,
                ) {
                    Ok(result) => {
                        let mut shed = Shed::from_delineation(&point.uid, &point.group_id, &result);
                        shed.calculate_tc();
                        (idx, Some(shed), None)
                    }
                    Err(err) => (idx, None, Some(err.to_string())),
                }
            })
            .collect()
    };

    // §5 "upper bound on concurrent per-point delineation tasks": a scoped
    // pool honors `config.worker_count` without disturbing any global pool
    // a caller embedding this crate may have already configured.
    let results: Vec<(usize, Option<Shed>, Option<String>)> =
        match rayon::ThreadPoolBuilder::new().num_threads(config.worker_count).build() {
            Ok(pool) => pool.install(delineate_all),
            Err(err) => {
                warn!("failed to build a {}-thread delineation pool ({err}); using the default pool", config.worker_count);
                delineate_all()
            }
        };

    if cancel.is_some_and(|c| c.is_cancelled()) {
        info!("delineation cancelled; partial results already computed are kept");
    }

    for (idx, shed, error) in results {
        match (shed, error) {
            (Some(shed), _) => {
                debug!("delineated shed for point {}", points[idx].uid);
                points[idx].shed = Some(shed);
            }
            (None, Some(message)) => {
                points[idx].add_validation_error("shed", message);
            }
            (None, None) => {}
        }
    }
}
