//! Catchment characteristics for a single point (§3 `Shed`).

use serde::{Deserialize, Serialize};

use super::rainfall::Rainfall;

/// The delineated contributing area for one surveyed point, and the
/// zonal statistics computed over it. `avg_rainfall` is kept ordered by
/// ascending frequency (I3).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shed {
    /// The owning point's `uid`.
    pub uid: String,
    /// The owning point's `group_id`.
    #[serde(rename = "groupId")]
    pub group_id: String,

    /// Contributing catchment area, square kilometres.
    #[serde(rename = "areaSqkm")]
    pub area_sqkm: f64,
    /// Catchment-average slope, percent.
    #[serde(rename = "avgSlopePct")]
    pub avg_slope_pct: f64,
    /// Catchment-average NRCS curve number.
    #[serde(rename = "avgCn")]
    pub avg_cn: f64,
    /// Longest flow path within the catchment, metres.
    #[serde(rename = "maxFl")]
    pub max_fl: f64,
    /// Per-frequency average rainfall depth samples, ascending by `freq` (I3).
    #[serde(rename = "avgRainfall")]
    pub avg_rainfall: Vec<Rainfall>,

    /// Time of concentration, hours (§4.2.1); cached by [`Shed::calculate_tc`].
    #[serde(rename = "tcHr", skip_serializing_if = "Option::is_none")]
    pub tc_hr: Option<f64>,

    /// Path to the backend-written catchment raster, if any.
    #[serde(rename = "filepathRaster", skip_serializing_if = "Option::is_none")]
    pub filepath_raster: Option<String>,
    /// Path to the backend-written catchment vector polygon, if any.
    #[serde(rename = "filepathVector", skip_serializing_if = "Option::is_none")]
    pub filepath_vector: Option<String>,
}

impl Shed {
    /// Build a `Shed` from one point's delineation result (§4.3 steps
    /// 1-8). `tc_hr` is left unset here -- the analytics driver (C7)
    /// computes and caches it via [`Shed::calculate_tc`].
    pub fn from_delineation(
        uid: impl Into<String>,
        group_id: impl Into<String>,
        result: &crate::geoprocessing::DelineationResult,
    ) -> Self {
        Self {
            uid: uid.into(),
            group_id: group_id.into(),
            area_sqkm: result.area_sqkm,
            avg_slope_pct: result.avg_slope_pct,
            avg_cn: result.avg_cn,
            max_fl: result.max_fl_m,
            avg_rainfall: result
                .avg_rainfall
                .iter()
                .map(|(freq, value, units)| Rainfall { freq: *freq, dur: "24hr".to_string(), value: *value, units: units.clone() })
                .collect(),
            tc_hr: None,
            filepath_raster: result.filepath_raster.clone(),
            filepath_vector: result.filepath_vector.clone(),
        }
    }

    pub fn new(uid: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            group_id: group_id.into(),
            area_sqkm: 0.0,
            avg_slope_pct: 0.0,
            avg_cn: 0.0,
            max_fl: 0.0,
            avg_rainfall: Vec::new(),
            tc_hr: None,
            filepath_raster: None,
            filepath_vector: None,
        }
    }

    /// Compute and cache time of concentration (§4.2.1) from the shed's
    /// own slope/flow-length scalars.
    pub fn calculate_tc(&mut self) -> f64 {
        let tc = crate::calculators::time_of_concentration_hr(self.max_fl, self.avg_slope_pct);
        self.tc_hr = Some(tc);
        tc
    }

    /// §8 soft invariant check: `0 <= avg_slope_pct <= 100`. Returns
    /// `false` to signal a `warn!`-worthy violation, never an error.
    pub fn slope_within_soft_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.avg_slope_pct)
    }

    /// §8 soft invariant check: `30 <= avg_cn <= 100`.
    pub fn cn_within_soft_bounds(&self) -> bool {
        (30.0..=100.0).contains(&self.avg_cn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_tc_caches_result() {
        let mut shed = Shed::new("u1", "g1");
        shed.max_fl = 500.0;
        shed.avg_slope_pct = 5.0;
        let tc = shed.calculate_tc();
        assert_eq!(shed.tc_hr, Some(tc));
    }

    #[test]
    fn soft_bound_checks() {
        let mut shed = Shed::new("u1", "g1");
        shed.avg_slope_pct = 150.0;
        shed.avg_cn = 20.0;
        assert!(!shed.slope_within_soft_bounds());
        assert!(!shed.cn_within_soft_bounds());
    }
}
