//! TR-55 kinematic time of concentration (§4.2.1), hourly.

/// Substituted when mean slope is zero or missing; avoids a zero base
/// raised to a negative exponent blowing up to infinity.
const SLOPE_FLOOR_PCT: f64 = 1e-5;

const CONST_A: f64 = 0.000325;
const CONST_B: f64 = 0.77;
const CONST_C: f64 = -0.385;

/// `tc_hr = A * L^B * (S/100)^C`
///
/// `max_flow_length_m` is in metres; `mean_slope_pct` is percent rise
/// (e.g. `23.0`, not `0.23`). A zero or otherwise non-positive slope is
/// floored to `1e-5` before exponentiation.
pub fn time_of_concentration_hr(max_flow_length_m: f64, mean_slope_pct: f64) -> f64 {
    let slope_pct = if mean_slope_pct > 0.0 {
        mean_slope_pct
    } else {
        SLOPE_FLOOR_PCT
    };
    CONST_A * max_flow_length_m.powf(CONST_B) * (slope_pct / 100.0).powf(CONST_C)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matches_reference_value() {
        // max_fl=500m, slope=10% -> sanity check against a hand solve.
        let tc = time_of_concentration_hr(500.0, 10.0);
        let expected = 0.000325 * 500f64.powf(0.77) * (0.10f64).powf(-0.385);
        assert_relative_eq!(tc, expected, max_relative = 1e-9);
    }

    #[test]
    fn zero_slope_is_floored_not_infinite() {
        let tc = time_of_concentration_hr(500.0, 0.0);
        assert!(tc.is_finite());
        assert!(tc > 0.0);
    }

    #[test]
    fn negative_slope_is_also_floored() {
        let tc = time_of_concentration_hr(500.0, -3.0);
        assert!(tc.is_finite());
    }
}
