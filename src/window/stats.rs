//! Descriptive statistics used across the pipeline.

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator), 0 for fewer than 2 values
pub fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Relative standard deviation in percent.
///
/// Zero spread gives 0 whatever the mean; a zero mean with spread gives +inf.
pub fn relative_stdev(mean: f64, stdev: f64) -> f64 {
    if stdev == 0.0 {
        0.0
    } else if mean == 0.0 {
        f64::INFINITY
    } else {
        100.0 * stdev / mean
    }
}
