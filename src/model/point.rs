//! The central per-crossing-member aggregate (§3 `Point`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::analytics::{Analytics, PeakFlowResult};
use super::capacity::Capacity;
use super::config::RainRatioMethod;
use super::naacc::NaaccCulvert;
use super::shed::Shed;

/// One surveyed culvert, its derived hydraulics, its delineated
/// catchment (once C6 has run), and its per-frequency results. A point
/// with `include = false` is retained in the output but skipped by every
/// analytical stage downstream of C4 (I4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    /// `{naacc_id}_{survey_id}`-derived identifier, unique per input row.
    pub uid: String,
    /// The `survey_id` this point's crossing is grouped under (§4.4).
    #[serde(rename = "groupId")]
    pub group_id: String,

    /// The raw surveyed record this point was built from.
    pub naacc: NaaccCulvert,
    /// Crosswalked and derived hydraulics (C4 stages 3-6).
    pub capacity: Capacity,

    /// The delineated catchment, once C6 has run; `None` if excluded or
    /// not yet delineated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shed: Option<Shed>,

    /// Per-frequency results, ascending order (I3); empty until C7 runs.
    #[serde(default)]
    pub analytics: Vec<Analytics>,

    /// `false` once any validation error has been recorded; downstream
    /// analytical stages then skip this point (I4).
    pub include: bool,
    /// Field name -> accumulated error messages; never causes the point
    /// itself to be dropped from the sequence.
    #[serde(rename = "validationErrors")]
    pub validation_errors: HashMap<String, Vec<String>>,
    /// Non-fatal informational notes distinct from `validation_errors`.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Point {
    pub fn new(uid: impl Into<String>, group_id: impl Into<String>, naacc: NaaccCulvert) -> Self {
        Self {
            uid: uid.into(),
            group_id: group_id.into(),
            naacc,
            capacity: Capacity::default(),
            shed: None,
            analytics: Vec::new(),
            include: true,
            validation_errors: HashMap::new(),
            notes: Vec::new(),
        }
    }

    /// Record a validation error against `field` (§4.1 "accumulate,
    /// never abort") and flip `include` to `false` (I4). Never removes
    /// the point from the sequence.
    pub fn add_validation_error(&mut self, field: &str, message: impl Into<String>) {
        self.validation_errors.entry(field.to_string()).or_default().push(message.into());
        self.include = false;
        self.capacity.include = false;
    }

    pub fn has_validation_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    /// Populate `analytics` (one slot per frequency, ascending, I3) from
    /// the shed's rainfall samples, running the peak-flow calculator
    /// (§4.2.3) per frequency using the configured method. No-op if
    /// `include` is false or no shed has been delineated yet.
    pub fn derive_rainfall_analytics(&mut self, method: RainRatioMethod) {
        if !self.include {
            return;
        }
        let Some(shed) = &self.shed else { return };

        self.capacity.crossing_capacity = self.capacity.culvert_capacity;

        let tc_hr = shed.tc_hr;
        let mut rainfall = shed.avg_rainfall.clone();
        rainfall.sort_by_key(|r| r.freq);

        let mut analytics: Vec<Analytics> = Vec::with_capacity(rainfall.len());
        for sample in &rainfall {
            let avg_rainfall_cm = crate::model::rainfall::rainfall_value_to_cm(sample.value, &sample.units);
            let outcome = crate::calculators::peak_flow(
                avg_rainfall_cm,
                shed.area_sqkm,
                Some(shed.avg_cn),
                tc_hr,
                shed.avg_slope_pct,
                shed.max_fl,
                method,
                sample.freq,
            );
            let mut a = Analytics::new(sample.freq);
            a.duration_hr = outcome.map(|o| o.tc_hr);
            a.avg_rainfall_cm = Some(avg_rainfall_cm);
            a.set_culvert_peakflow(outcome.and_then(|o| o.q_peak_m3s));
            a.derive_overflow(self.capacity.culvert_capacity);
            analytics.push(a);
        }
        self.recompute_max_return_period(&analytics);
        self.analytics = analytics;
    }

    /// §4.2.4 / §4.4: the greatest frequency whose `crossing_overflow_m3s`
    /// is non-negative, else `None`. Used both after single-point
    /// derivation and after crossing aggregation overwrites the
    /// crossing-level fields.
    pub fn recompute_max_return_period(&mut self, analytics: &[Analytics]) {
        let frequencies: Vec<i32> = analytics.iter().map(|a| a.frequency).collect();
        let values: Vec<Option<f64>> = analytics.iter().map(|a| a.overflow.and_then(|o| o.crossing_overflow_m3s)).collect();
        self.capacity.max_return_period = crate::calculators::max_return_period(&frequencies, &values);
    }

    /// The peak-flow list across this point's analytics, in
    /// ascending-frequency order -- a convenience for output writers (C9).
    pub fn peak_flows(&self) -> Vec<PeakFlowResult> {
        self.analytics.iter().filter_map(|a| a.peakflow).collect()
    }
}
