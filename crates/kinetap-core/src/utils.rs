//! Numeric helpers shared by the detector and the statistics engine.
//!
//! Every function degrades to a defined sentinel (0.0) on degenerate input
//! instead of producing NaN or infinity.

/// Arithmetic mean of a slice, or 0.0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n−1 denominator), or 0.0 when fewer than two
/// values are available.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Coefficient of variation as a percentage (100 × std-dev / mean), or 0.0
/// when the mean is not strictly positive or the std-dev is undefined.
#[must_use]
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m <= 0.0 {
        return 0.0;
    }
    100.0 * sample_std_dev(values) / m
}
