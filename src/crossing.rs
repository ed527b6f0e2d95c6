//! Analytics driver & crossing aggregation (C7, §4.4). Runs after C6
//! has attached a `Shed` to every included point: derives per-point
//! analytics, then folds multi-culvert crossings (points sharing
//! `group_id`) into shared crossing-level capacity and peak-flow
//! figures.

use std::collections::HashMap;

use log::info;

use crate::cancellation::CancellationToken;
use crate::model::config::RainRatioMethod;
use crate::model::point::Point;

/// Run the per-point analytics derivation (§4.4 steps 1-4), then the
/// crossing-aggregation reduction (§4.4 "Crossing aggregation") over
/// `group_id`-partitioned groups of size >= 2. `cancel`, if tripped,
/// stops the crossing-aggregation reduction between groups (§5
/// "Cancellation") -- per-point analytics already derived are kept.
pub fn analyze_points(points: &mut [Point], method: RainRatioMethod, cancel: Option<&CancellationToken>) {
    for point in points.iter_mut() {
        point.derive_rainfall_analytics(method);
    }
    aggregate_crossings(points, cancel);
}

/// Fold capacity and peak flow across members of each multi-culvert
/// crossing. Single-member groups are left as computed by
/// `derive_rainfall_analytics` (their crossing-level fields already
/// mirror the culvert-level ones).
fn aggregate_crossings(points: &mut [Point], cancel: Option<&CancellationToken>) {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, point) in points.iter().enumerate() {
        if point.include {
            groups.entry(point.group_id.clone()).or_default().push(idx);
        }
    }

    for (group_id, indices) in groups {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            info!("crossing aggregation cancelled; remaining crossings left unaggregated");
            break;
        }
        if indices.len() < 2 {
            continue;
        }
        info!("aggregating {} culverts in crossing {group_id}", indices.len());

        let crossing_capacity: f64 =
            indices.iter().filter_map(|&i| points[i].capacity.culvert_capacity).sum();
        let any_capacity = indices.iter().any(|&i| points[i].capacity.culvert_capacity.is_some());
        let crossing_capacity = any_capacity.then_some(crossing_capacity);

        let reference_idx = *indices
            .iter()
            .max_by(|&&a, &&b| {
                let shed_a = points[a].shed.as_ref();
                let shed_b = points[b].shed.as_ref();
                let area_a = shed_a.map(|s| s.area_sqkm).unwrap_or(0.0);
                let area_b = shed_b.map(|s| s.area_sqkm).unwrap_or(0.0);
                area_a
                    .partial_cmp(&area_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| {
                        let fl_a = shed_a.map(|s| s.max_fl).unwrap_or(0.0);
                        let fl_b = shed_b.map(|s| s.max_fl).unwrap_or(0.0);
                        fl_a.partial_cmp(&fl_b).unwrap_or(std::cmp::Ordering::Equal)
                    })
            })
            .expect("non-empty group");

        let reference_peakflows: HashMap<i32, Option<f64>> = points[reference_idx]
            .analytics
            .iter()
            .filter_map(|a| a.peakflow.map(|p| (a.frequency, p.culvert_peakflow_m3s)))
            .collect();

        for &idx in &indices {
            points[idx].capacity.crossing_capacity = crossing_capacity;
            for analytic in points[idx].analytics.iter_mut() {
                let crossing_peak = reference_peakflows.get(&analytic.frequency).copied().flatten();
                if let Some(peakflow) = analytic.peakflow.as_mut() {
                    peakflow.crossing_peakflow_m3s = crossing_peak;
                }
                let crossing_overflow = crate::calculators::culvert_overflow(crossing_capacity, crossing_peak);
                if let Some(overflow) = analytic.overflow.as_mut() {
                    overflow.crossing_overflow_m3s = crossing_overflow;
                }
            }
            let analytics_snapshot = points[idx].analytics.clone();
            points[idx].recompute_max_return_period(&analytics_snapshot);
        }
    }
}
