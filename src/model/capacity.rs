//! Derived culvert-hydraulics record (§3 `Capacity`).

use serde::{Deserialize, Serialize};

use crate::coefficients::{DEFAULT_C, DEFAULT_Y, K_S_DEFAULT};

/// Crosswalked + derived culvert-hydraulics parameters. `include` starts
/// `true` and becomes `false` the moment any validation error applies to
/// the owning `Point` (I4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Capacity {
    // ---- crosswalked short fields (copied from NaaccCulvert) ----
    /// Culvert material, copied verbatim from `NaaccCulvert.material`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culv_mat: Option<String>,
    /// Inlet type after the §4.1 stage-3 crosswalk to the coefficient
    /// table's categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_type: Option<String>,
    /// Inlet shape after the §4.1 stage-3 crosswalk (`Round`, `Box`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_shape: Option<String>,
    /// Inlet width or diameter, metres (converted from feet in stage 6).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_a: Option<f64>,
    /// Inlet height, metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_b: Option<f64>,
    /// Headwater depth (fill height), metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hw: Option<f64>,
    /// Barrel slope, percent, as surveyed (-1 denotes missing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slope: Option<f64>,
    /// Barrel length, metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Outlet shape after the §4.1 stage-3 crosswalk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_shape: Option<String>,
    /// Outlet width or diameter, metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_a: Option<f64>,
    /// Outlet height, metres.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_b: Option<f64>,
    /// Crossing structure type, lowercased for the §4.1 stage-5 geometry
    /// test against `OK_CROSSING_TYPES`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xing_type: Option<String>,

    // ---- derived attributes ----
    /// Inlet cross-sectional area, square metres (§4.1 stage 6).
    #[serde(rename = "culvertAreaSqm", skip_serializing_if = "Option::is_none")]
    pub culvert_area_sqm: Option<f64>,
    /// Inlet rise used as the capacity equation's depth term, metres.
    #[serde(rename = "culvertDepthM", skip_serializing_if = "Option::is_none")]
    pub culvert_depth_m: Option<f64>,

    /// FHWA HIF12026 Appendix A inlet-control coefficient `c`.
    #[serde(rename = "coefficientC")]
    pub coefficient_c: f64,
    /// FHWA HIF12026 Appendix A inlet-control coefficient `y`.
    #[serde(rename = "coefficientY")]
    pub coefficient_y: f64,
    /// FHWA HIF12026 Appendix A slope-correction coefficient `k_s`.
    #[serde(rename = "coefficientSlope")]
    pub coefficient_slope: f64,

    /// Slope expressed as a ratio (percent / 100), with the -1 sentinel
    /// substituted by 0.0 (§9 Open Question decision).
    #[serde(rename = "slopeRr", skip_serializing_if = "Option::is_none")]
    pub slope_rr: Option<f64>,
    /// `hw + culvert_depth_m`, the capacity equation's head term, metres.
    #[serde(rename = "headOverInvert", skip_serializing_if = "Option::is_none")]
    pub head_over_invert: Option<f64>,

    /// Accumulated informational notes (e.g. slope-substitution, coefficient
    /// lookup fallback); distinct from `validation_errors` on the owning
    /// `Point`, which gate `include`.
    pub comments: Vec<String>,
    /// Mirrors the owning `Point.include`; flipped in lockstep by
    /// `Point::add_validation_error` (I4).
    pub include: bool,

    // ---- analytics ----
    /// This culvert's own inlet-control capacity, cubic metres/second.
    #[serde(rename = "culvertCapacity", skip_serializing_if = "Option::is_none")]
    pub culvert_capacity: Option<f64>,
    /// Capacity summed across every member of this culvert's crossing
    /// (itself, for a single-culvert crossing); set by C7.
    #[serde(rename = "crossingCapacity", skip_serializing_if = "Option::is_none")]
    pub crossing_capacity: Option<f64>,
    /// Greatest return period this crossing can pass without overflow
    /// (§4.2.4); `None` if every modeled frequency overflows.
    #[serde(rename = "maxReturnPeriod", skip_serializing_if = "Option::is_none")]
    pub max_return_period: Option<i32>,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            culv_mat: None,
            in_type: None,
            in_shape: None,
            in_a: None,
            in_b: None,
            hw: None,
            slope: None,
            length: None,
            out_shape: None,
            out_a: None,
            out_b: None,
            xing_type: None,
            culvert_area_sqm: None,
            culvert_depth_m: None,
            coefficient_c: DEFAULT_C,
            coefficient_y: DEFAULT_Y,
            coefficient_slope: K_S_DEFAULT,
            slope_rr: None,
            head_over_invert: None,
            comments: Vec::new(),
            include: true,
            culvert_capacity: None,
            crossing_capacity: None,
            max_return_period: None,
        }
    }
}

impl Capacity {
    /// Compute `culvert_capacity` from the currently-populated derived
    /// fields, via §4.2.2. No-op (leaves `culvert_capacity` as `None`)
    /// if any required input is missing.
    pub fn calculate(&mut self) {
        let (Some(area), Some(depth), Some(head), Some(slope_rr)) =
            (self.culvert_area_sqm, self.culvert_depth_m, self.head_over_invert, self.slope_rr)
        else {
            return;
        };
        self.culvert_capacity = crate::calculators::culvert_capacity(
            area,
            head,
            depth,
            slope_rr,
            self.coefficient_c,
            self.coefficient_y,
            self.coefficient_slope,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_not_included_until_calculated_and_stays_includable() {
        let c = Capacity::default();
        assert!(c.include);
        assert_eq!(c.culvert_capacity, None);
    }

    #[test]
    fn calculate_is_noop_without_required_inputs() {
        let mut c = Capacity::default();
        c.calculate();
        assert_eq!(c.culvert_capacity, None);
    }
}
