//! Descriptive statistics over plain `f64` slices.
//!
//! Undefined results are reported as `NaN` rather than errors so they flow
//! through the pipeline unchanged.

/// Arithmetic mean, `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with `N - ddof` in the denominator, `NaN` when `N <= ddof`.
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    let n_vals = values.len();
    if n_vals <= ddof {
        return f64::NAN;
    }
    let mean = mean(values);
    values.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / (n_vals - ddof) as f64
}

pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    variance(values, ddof).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
        assert_eq!(mean(&[10.0, 30.0, 20.0, 20.0]), 20.0);
    }

    #[test]
    fn std_dev_population_and_sample() {
        let vals = [10.0, 30.0, 20.0, 20.0];
        assert!((std_dev(&vals, 0) - 50f64.sqrt()).abs() < 1e-12);
        assert!((std_dev(&vals, 1) - (200.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn std_dev_undefined_for_too_few_values() {
        assert!(std_dev(&[], 0).is_nan());
        assert!(std_dev(&[1.0], 1).is_nan());
        assert_eq!(std_dev(&[1.0], 0), 0.0);
    }
}
