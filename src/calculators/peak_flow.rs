//! TR-55 runoff depth and peak flow, with a selectable rain-ratio
//! formulation (§4.2.3). Method 1 is the unconditional default; Method 2
//! is opt-in and restricted to the nine standard return periods that the
//! discrete coefficient table actually covers (§4.2.5, §9 Open Question).

use super::time_of_concentration::time_of_concentration_hr;

/// Selects which rain-ratio / unit-peak-discharge formulation §4.2.3
/// step 6 uses. Never inferred or silently alternated mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
pub enum RainRatioMethod {
    /// Continuous formulation in `Ia/P`, clipped to `[0.1, 0.5]`. Works
    /// for any return period.
    #[default]
    Method1,
    /// Discrete 9-element coefficient table; only valid for the 9
    /// standard return periods excluding 1000.
    Method2,
}

/// The 9 return periods (years) Method 2's discrete coefficient table
/// covers -- the 10th standard frequency, 1000, has no entry.
pub const METHOD2_FREQUENCIES: [i32; 9] = [1, 2, 5, 10, 25, 50, 100, 200, 500];

fn method2_coefficients(frequency: i32) -> Option<(f64, f64)> {
    match frequency {
        1 => Some((2.798, 0.367)),
        2 => Some((2.798, 0.367)),
        5 => Some((3.225, 0.481)),
        10 => Some((3.529, 0.559)),
        25 => Some((3.932, 0.658)),
        50 => Some((4.244, 0.733)),
        100 => Some((4.57, 0.81)),
        200 => Some((4.914, 0.888)),
        500 => Some((5.403, 0.996)),
        _ => None,
    }
}

/// Unit peak discharge, Method 1 (continuous in `Ia/P`).
fn unit_peak_discharge_method1(initial_abstraction_cm: f64, avg_rainfall_cm: f64, tc_hr: f64) -> f64 {
    let r = (initial_abstraction_cm / avg_rainfall_cm).clamp(0.1, 0.5);
    let c0 = -2.2349 * r * r + 0.4759 * r + 2.5273;
    let c1 = 1.5555 * r * r - 0.7081 * r - 0.5584;
    let c2 = 0.6041 * r * r + 0.0437 * r - 0.1761;
    let log_tc = tc_hr.log10();
    10f64.powf(c0 + c1 * log_tc + c2 * log_tc * log_tc - 2.366)
}

/// Unit peak discharge, Method 2 (discrete 9-return-period table).
/// Returns `None` if `frequency` isn't one of [`METHOD2_FREQUENCIES`].
fn unit_peak_discharge_method2(tc_hr: f64, frequency: i32) -> Option<f64> {
    let (const0, const1) = method2_coefficients(frequency)?;
    Some(((const0 - const1 * tc_hr) / 8.64).max(0.14))
}

/// Peak flow + time of concentration for one point, one storm frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakFlowOutcome {
    pub q_peak_m3s: Option<f64>,
    pub tc_hr: f64,
}

/// Compute peak flow per §4.2.3. Returns `None` only when `avg_cn` is
/// null/zero (step 1) -- in every other case a result is returned, with
/// `q_peak_m3s` itself null where the radicand/effective-rainfall checks
/// fail.
///
/// `frequency` is required (and ignored) for Method 1; it is required
/// and must be one of [`METHOD2_FREQUENCIES`] for Method 2 -- callers
/// that select Method 2 over a frequency set including 1000 must reject
/// that combination at the workflow-configuration level (§4.2.5) rather
/// than call this function with an unsupported frequency.
#[allow(clippy::too_many_arguments)]
pub fn peak_flow(
    avg_rainfall_cm: f64,
    basin_area_sqkm: f64,
    avg_cn: Option<f64>,
    tc_hr: Option<f64>,
    mean_slope_pct: f64,
    max_flow_length_m: f64,
    method: RainRatioMethod,
    frequency: i32,
) -> Option<PeakFlowOutcome> {
    let avg_cn = match avg_cn {
        Some(cn) if cn != 0.0 => cn,
        _ => return None,
    };

    let tc_hr = tc_hr.unwrap_or_else(|| time_of_concentration_hr(max_flow_length_m, mean_slope_pct));

    let storage_cm = 0.1 * ((25400.0 / avg_cn) - 254.0);
    let initial_abstraction_cm = 0.2 * storage_cm;
    let effective_rainfall_cm = avg_rainfall_cm - initial_abstraction_cm;

    if effective_rainfall_cm < 0.0 {
        return Some(PeakFlowOutcome { q_peak_m3s: None, tc_hr });
    }

    let runoff_cm =
        effective_rainfall_cm * effective_rainfall_cm / (avg_rainfall_cm + storage_cm - initial_abstraction_cm);

    let unit_peak_discharge = match method {
        RainRatioMethod::Method1 => Some(unit_peak_discharge_method1(initial_abstraction_cm, avg_rainfall_cm, tc_hr)),
        RainRatioMethod::Method2 => unit_peak_discharge_method2(tc_hr, frequency),
    };

    let q_peak_m3s = unit_peak_discharge.map(|qu| runoff_cm * qu * basin_area_sqkm);

    Some(PeakFlowOutcome { q_peak_m3s, tc_hr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn scenario_one_method1() {
        let outcome = peak_flow(
            58.3362007,
            27.2290001,
            Some(68.4257965),
            Some(0.0149833),
            0.0,
            0.0,
            RainRatioMethod::Method1,
            100,
        )
        .unwrap();
        let q = outcome.q_peak_m3s.expect("finite peak flow");
        assert_relative_eq!(q, 7.045, max_relative = 0.01);
    }

    #[test]
    fn scenario_two_method1() {
        let outcome = peak_flow(
            57.97,
            19.69,
            Some(66.48),
            Some(1.15),
            0.0,
            0.0,
            RainRatioMethod::Method1,
            100,
        )
        .unwrap();
        let q = outcome.q_peak_m3s.expect("finite peak flow");
        assert_relative_eq!(q, 1242.67, max_relative = 0.01);
    }

    #[test]
    fn zero_cn_returns_none() {
        assert!(peak_flow(50.0, 10.0, Some(0.0), Some(1.0), 5.0, 100.0, RainRatioMethod::Method1, 100).is_none());
        assert!(peak_flow(50.0, 10.0, None, Some(1.0), 5.0, 100.0, RainRatioMethod::Method1, 100).is_none());
    }

    #[test]
    fn negative_effective_rainfall_gives_null_peak_but_keeps_tc() {
        // very low CN -> huge storage -> Ia greatly exceeds a small storm.
        let outcome = peak_flow(0.5, 10.0, Some(40.0), Some(1.0), 5.0, 100.0, RainRatioMethod::Method1, 100).unwrap();
        assert_eq!(outcome.q_peak_m3s, None);
        assert_relative_eq!(outcome.tc_hr, 1.0);
    }

    #[test]
    fn tc_is_computed_when_not_supplied() {
        let outcome =
            peak_flow(50.0, 10.0, Some(70.0), None, 5.0, 200.0, RainRatioMethod::Method1, 100).unwrap();
        assert_relative_eq!(outcome.tc_hr, time_of_concentration_hr(200.0, 5.0));
    }

    #[test]
    fn method2_unsupported_frequency_yields_null_peak() {
        let outcome = peak_flow(50.0, 10.0, Some(70.0), Some(1.0), 5.0, 100.0, RainRatioMethod::Method2, 1000)
            .unwrap();
        assert_eq!(outcome.q_peak_m3s, None);
    }

    #[test]
    fn method2_supported_frequency_computes() {
        let outcome = peak_flow(50.0, 10.0, Some(70.0), Some(1.0), 5.0, 100.0, RainRatioMethod::Method2, 100)
            .unwrap();
        assert!(outcome.q_peak_m3s.unwrap() > 0.0);
    }
}
