//! Enriched point output (§6.1 "Outputs"): NAACC fields, capacity
//! fields, shed fields (prefixed `shed_`), and one column per frequency
//! per analytic -- `y{freq}_ppf_m3s` (point/culvert peak flow),
//! `y{freq}_xpf_m3s` (crossing peak flow), `y{freq}_pof_m3s` (point
//! overflow), `y{freq}_xof_m3s` (crossing overflow).

use std::path::Path;

use csv::Writer;

use crate::error::{WorkflowError, WorkflowResult};
use crate::model::point::Point;

fn frequency_columns(frequencies: &[i32]) -> Vec<String> {
    let mut cols = Vec::with_capacity(frequencies.len() * 4);
    for freq in frequencies {
        cols.push(format!("y{freq}_ppf_m3s"));
        cols.push(format!("y{freq}_xpf_m3s"));
        cols.push(format!("y{freq}_pof_m3s"));
        cols.push(format!("y{freq}_xof_m3s"));
    }
    cols
}

fn opt_f64(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Flatten `points` into the enriched CSV output. Output row order
/// follows `points`' order; callers wanting the "sorted by `uid`"
/// guarantee (§5 "Ordering") should sort beforehand.
pub fn write_enriched_points_csv(points: &[Point], frequencies: &[i32], path: impl AsRef<Path>) -> WorkflowResult<()> {
    let path = path.as_ref();
    let mut writer = Writer::from_path(path).map_err(WorkflowError::Csv)?;

    let mut header = vec![
        "uid".to_string(),
        "group_id".to_string(),
        "naacc_id".to_string(),
        "survey_id".to_string(),
        "lat".to_string(),
        "lng".to_string(),
        "material".to_string(),
        "in_type".to_string(),
        "in_shape".to_string(),
        "culvert_area_sqm".to_string(),
        "culvert_depth_m".to_string(),
        "culvert_capacity".to_string(),
        "crossing_capacity".to_string(),
        "max_return_period".to_string(),
        "include".to_string(),
        "shed_area_sqkm".to_string(),
        "shed_avg_slope_pct".to_string(),
        "shed_avg_cn".to_string(),
        "shed_max_fl".to_string(),
        "shed_tc_hr".to_string(),
    ];
    header.extend(frequency_columns(frequencies));
    writer.write_record(&header).map_err(WorkflowError::Csv)?;

    for point in points {
        let mut row = vec![
            point.uid.clone(),
            point.group_id.clone(),
            point.naacc.naacc_id.clone(),
            point.naacc.survey_id.clone(),
            point.naacc.lat.to_string(),
            point.naacc.lng.to_string(),
            point.capacity.culv_mat.clone().unwrap_or_default(),
            point.capacity.in_type.clone().unwrap_or_default(),
            point.capacity.in_shape.clone().unwrap_or_default(),
            opt_f64(point.capacity.culvert_area_sqm),
            opt_f64(point.capacity.culvert_depth_m),
            opt_f64(point.capacity.culvert_capacity),
            opt_f64(point.capacity.crossing_capacity),
            point.capacity.max_return_period.map(|v| v.to_string()).unwrap_or_default(),
            point.include.to_string(),
            point.shed.as_ref().map(|s| s.area_sqkm.to_string()).unwrap_or_default(),
            point.shed.as_ref().map(|s| s.avg_slope_pct.to_string()).unwrap_or_default(),
            point.shed.as_ref().map(|s| s.avg_cn.to_string()).unwrap_or_default(),
            point.shed.as_ref().map(|s| s.max_fl.to_string()).unwrap_or_default(),
            point.shed.as_ref().and_then(|s| s.tc_hr).map(|v| v.to_string()).unwrap_or_default(),
        ];

        for freq in frequencies {
            let analytic = point.analytics.iter().find(|a| a.frequency == *freq);
            let peakflow = analytic.and_then(|a| a.peakflow);
            let overflow = analytic.and_then(|a| a.overflow);
            row.push(opt_f64(peakflow.and_then(|p| p.culvert_peakflow_m3s)));
            row.push(opt_f64(peakflow.and_then(|p| p.crossing_peakflow_m3s)));
            row.push(opt_f64(overflow.and_then(|o| o.culvert_overflow_m3s)));
            row.push(opt_f64(overflow.and_then(|o| o.crossing_overflow_m3s)));
        }

        writer.write_record(&row).map_err(WorkflowError::Csv)?;
    }

    writer.flush().map_err(WorkflowError::Io)?;
    Ok(())
}
