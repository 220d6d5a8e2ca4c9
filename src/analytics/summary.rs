// src/analytics/summary.rs
//! Summary statistics over trial batches and path values
//!
//! Uses the **population** standard deviation (divide by N), the same
//! moment the normal overlay is built from, so a batch of one value has
//! `stddev = 0` rather than an undefined sample variance.

use crate::error::{SimError, SimResult};
use crate::trials::TrialBatch;

/// Read-only snapshot of a sample's moments and extrema
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistics {
    pub fn variance(&self) -> f64 {
        self.stddev * self.stddev
    }
}

/// Mean, population standard deviation and extrema of `values`.
///
/// # Errors
///
/// - `InvalidParameter` for an empty slice
/// - `NumericalInstability` if any value is NaN or infinite
pub fn summarize(values: &[f64]) -> SimResult<Statistics> {
    if values.is_empty() {
        return Err(SimError::InvalidParameter {
            parameter: "values".to_string(),
            value: 0.0,
            constraint: "cannot summarize an empty sample".to_string(),
        });
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(SimError::NumericalInstability {
            method: "summarize".to_string(),
            reason: format!("sample contains non-finite value {}", bad),
        });
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });

    // A constant sample is exact: summing it can drift by an ulp.
    if min == max {
        return Ok(Statistics {
            count: values.len(),
            mean: min,
            stddev: 0.0,
            min,
            max,
        });
    }

    // Two passes: the centred second pass avoids E[X²] − E[X]² cancellation.
    let n = values.len() as f64;
    let mean = (values.iter().sum::<f64>() / n).clamp(min, max);
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    Ok(Statistics {
        count: values.len(),
        mean,
        stddev: variance.sqrt(),
        min,
        max,
    })
}

impl TrialBatch {
    pub fn summarize(&self) -> SimResult<Statistics> {
        summarize(self.outcomes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_population_stddev() {
        let stats = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.stddev, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn test_single_value_has_zero_stddev() {
        let stats = summarize(&[3.25]).unwrap();
        assert_eq!(stats.stddev, 0.0);
        assert_eq!(stats.mean, 3.25);
        assert_eq!(stats.min, stats.max);
    }

    #[test]
    fn test_identical_values_have_zero_stddev() {
        let stats = summarize(&[7.0; 100]).unwrap();
        assert_eq!(stats.stddev, 0.0);
    }

    #[test]
    fn test_inexact_constant_sample_is_degenerate() {
        let stats = summarize(&[0.1; 10]).unwrap();
        assert_eq!(stats.mean, 0.1);
        assert_eq!(stats.stddev, 0.0);
        assert_eq!((stats.min, stats.max), (0.1, 0.1));
    }

    #[test]
    fn test_mean_stays_within_extrema() {
        let values = [0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1 + f64::EPSILON];
        let stats = summarize(&values).unwrap();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn test_empty_and_non_finite_rejected() {
        assert!(summarize(&[]).unwrap_err().is_invalid_parameter());
        assert!(matches!(
            summarize(&[1.0, f64::NAN]),
            Err(SimError::NumericalInstability { .. })
        ));
    }
}
