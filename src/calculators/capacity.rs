//! FHWA inlet-control submerged-outlet culvert capacity (§4.2.2).
//!
//! Culvert equation from FHWA HIF12026, Appendix A, Equation A.3
//! (submerged outlet, inlet control, SI units).

use crate::coefficients::CAPACITY_SI_CONV_FACTOR;

/// `capacity_m3s = (A * sqrt( D * ((H/D) - y - k_s*S_rr) / c )) / F`
///
/// Returns `None` when any input is non-finite or the radicand is
/// non-positive -- an undefined capacity is data, not an error.
pub fn culvert_capacity(
    culvert_area_sqm: f64,
    head_over_invert: f64,
    culvert_depth_m: f64,
    slope_rr: f64,
    coefficient_c: f64,
    coefficient_y: f64,
    coefficient_slope: f64,
) -> Option<f64> {
    if culvert_depth_m == 0.0 || coefficient_c == 0.0 {
        return None;
    }
    let radicand = culvert_depth_m
        * ((head_over_invert / culvert_depth_m) - coefficient_y - coefficient_slope * slope_rr)
        / coefficient_c;
    if !radicand.is_finite() || radicand <= 0.0 {
        return None;
    }
    let capacity = (culvert_area_sqm * radicand.sqrt()) / CAPACITY_SI_CONV_FACTOR;
    if capacity.is_finite() {
        Some(capacity)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_concrete_projecting_scenario() {
        // §8 scenario 3: A=0.164 m2, H=0.914m, D=0.457m, S_rr=0.006,
        // k_s=-0.5, y=0.54, c=0.055 -- result must be finite and positive.
        let capacity =
            culvert_capacity(0.164, 0.914, 0.457, 0.006, 0.055, 0.54, -0.5).expect("defined capacity");
        assert!(capacity.is_finite());
        assert!(capacity > 0.0);
    }

    #[test]
    fn non_positive_radicand_is_undefined() {
        // head barely above invert with a large y coefficient drives the
        // radicand negative.
        let capacity = culvert_capacity(0.5, 0.1, 1.0, 0.0, 0.04, 0.9, -0.5);
        assert_eq!(capacity, None);
    }

    #[test]
    fn zero_depth_is_undefined_not_a_panic() {
        assert_eq!(culvert_capacity(0.5, 1.0, 0.0, 0.0, 0.04, 0.7, -0.5), None);
    }

    #[test]
    fn matches_hand_computed_value() {
        let capacity = culvert_capacity(0.164, 0.914, 0.457, 0.006, 0.055, 0.54, -0.5).unwrap();
        let radicand = 0.457 * ((0.914 / 0.457) - 0.54 - (-0.5 * 0.006)) / 0.055;
        let expected = (0.164 * radicand.sqrt()) / 1.811;
        assert_relative_eq!(capacity, expected, max_relative = 1e-9);
    }
}
