//! Per-frequency hydrologic/hydraulic results for a point (§3 `Analytics`,
//! §4.4). Each point carries one `Analytics` per analyzed frequency; the
//! crossing-level fields start out mirroring the single-point (culvert)
//! values and are only overwritten by the crossing-aggregation step
//! (C7) for multi-barrel crossings.

use serde::{Deserialize, Serialize};

/// Peak flow for one storm frequency, at both the single-culvert and
/// (tentatively, until crossing aggregation runs) crossing level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PeakFlowResult {
    /// Storm return period, years.
    pub freq: i32,
    /// This culvert's own peak flow, cubic metres/second.
    #[serde(rename = "culvertPeakflowM3s", skip_serializing_if = "Option::is_none")]
    pub culvert_peakflow_m3s: Option<f64>,
    /// The reference-point peak flow for this point's crossing, once C7
    /// has run (equal to `culvert_peakflow_m3s` until then).
    #[serde(rename = "crossingPeakflowM3s", skip_serializing_if = "Option::is_none")]
    pub crossing_peakflow_m3s: Option<f64>,
}

/// Overflow (peak flow less capacity) for one storm frequency, again at
/// both the culvert and crossing level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OverflowResult {
    /// Storm return period, years.
    pub freq: i32,
    /// `culvert_peakflow_m3s - culvert_capacity`; negative means no overflow.
    #[serde(rename = "culvertOverflowM3s", skip_serializing_if = "Option::is_none")]
    pub culvert_overflow_m3s: Option<f64>,
    /// The crossing-level equivalent, once C7 has run.
    #[serde(rename = "crossingOverflowM3s", skip_serializing_if = "Option::is_none")]
    pub crossing_overflow_m3s: Option<f64>,
}

/// The full set of per-frequency results computed for one point (§4.2.3,
/// §4.2.4), kept ascending by `frequency` for both the invariant (I3) and
/// the required output ordering (§5 "Ordering").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Analytics {
    /// Storm return period, years.
    pub frequency: i32,
    /// Time of concentration used for this frequency's rain-ratio lookup, hours.
    #[serde(rename = "durationHr", skip_serializing_if = "Option::is_none")]
    pub duration_hr: Option<f64>,
    /// Average rainfall depth over the catchment for this frequency, centimetres.
    #[serde(rename = "avgRainfallCm", skip_serializing_if = "Option::is_none")]
    pub avg_rainfall_cm: Option<f64>,
    /// Peak flow at this frequency, once derived.
    pub peakflow: Option<PeakFlowResult>,
    /// Overflow at this frequency, once derived.
    pub overflow: Option<OverflowResult>,
}

impl Analytics {
    pub fn new(frequency: i32) -> Self {
        Self { frequency, duration_hr: None, avg_rainfall_cm: None, peakflow: None, overflow: None }
    }

    /// Populate `peakflow` from a culvert-level outcome (§4.2.3), mirroring
    /// into the crossing-level slot tentatively (§4.4 step 2/4).
    pub fn set_culvert_peakflow(&mut self, q_peak_m3s: Option<f64>) {
        self.peakflow = Some(PeakFlowResult {
            freq: self.frequency,
            culvert_peakflow_m3s: q_peak_m3s,
            crossing_peakflow_m3s: q_peak_m3s,
        });
    }

    /// Derive `overflow` from the current `peakflow` and a culvert
    /// capacity value (§4.2.4), mirroring into the crossing-level slot.
    pub fn derive_overflow(&mut self, culvert_capacity_m3s: Option<f64>) {
        let culvert_peak = self.peakflow.and_then(|p| p.culvert_peakflow_m3s);
        let culvert_overflow = crate::calculators::culvert_overflow(culvert_capacity_m3s, culvert_peak);
        self.overflow = Some(OverflowResult {
            freq: self.frequency,
            culvert_overflow_m3s: culvert_overflow,
            crossing_overflow_m3s: culvert_overflow,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_culvert_peakflow_mirrors_to_crossing() {
        let mut a = Analytics::new(100);
        a.set_culvert_peakflow(Some(10.0));
        let pf = a.peakflow.unwrap();
        assert_eq!(pf.culvert_peakflow_m3s, Some(10.0));
        assert_eq!(pf.crossing_peakflow_m3s, Some(10.0));
    }

    #[test]
    fn derive_overflow_from_capacity_and_peakflow() {
        let mut a = Analytics::new(100);
        a.set_culvert_peakflow(Some(10.0));
        a.derive_overflow(Some(15.0));
        let of = a.overflow.unwrap();
        assert_eq!(of.culvert_overflow_m3s, Some(5.0));
        assert_eq!(of.crossing_overflow_m3s, Some(5.0));
    }
}
