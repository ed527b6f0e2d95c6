//! Overflow and maximum safely-passed return period (§4.2.4).

/// `overflow = capacity - peak_flow`. Positive means excess capacity.
/// `None` propagates if either input is undefined.
pub fn culvert_overflow(capacity_m3s: Option<f64>, peak_flow_m3s: Option<f64>) -> Option<f64> {
    match (capacity_m3s, peak_flow_m3s) {
        (Some(c), Some(q)) => Some(c - q),
        _ => None,
    }
}

/// The greatest frequency whose overflow is non-negative, or `None` if
/// no frequency passes (or the point has no analytics at all).
pub fn max_return_period(frequencies: &[i32], overflows: &[Option<f64>]) -> Option<i32> {
    frequencies
        .iter()
        .zip(overflows.iter())
        .filter_map(|(freq, ovf)| ovf.filter(|v| *v >= 0.0).map(|_| *freq))
        .max()
}
