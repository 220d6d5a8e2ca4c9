// src/analytics/comparison.rs
//! Empirical batch vs. the normal law predicted by the CLT
//!
//! The Kolmogorov–Smirnov statistic measures the largest vertical gap
//! between the empirical CDF F_n and the reference CDF Φ:
//! ```text
//! D_n = sup_x |F_n(x) − Φ((x − μ)/σ)|
//! ```
//! For sorted samples x_(1) ≤ … ≤ x_(n) the supremum is attained at a
//! sample point, just before or just after a jump:
//! ```text
//! D_n = max_i max(i/n − Φ_i, Φ_i − (i−1)/n)
//! ```

use super::summary::{summarize, Statistics};
use crate::error::{validation::*, SimResult};
use crate::math_utils::norm_cdf;
use crate::trials::TrialBatch;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CltComparison {
    pub empirical: Statistics,
    pub theoretical_mean: f64,
    pub theoretical_stddev: f64,
    pub ks_distance: f64,
}

impl CltComparison {
    pub fn mean_error(&self) -> f64 {
        self.empirical.mean - self.theoretical_mean
    }

    pub fn stddev_ratio(&self) -> f64 {
        self.empirical.stddev / self.theoretical_stddev
    }
}

/// KS distance between `values` and Normal(mean, stddev).
pub fn ks_distance_normal(values: &[f64], mean: f64, stddev: f64) -> SimResult<f64> {
    validate_count("values", values.len())?;
    validate_finite("mean", mean)?;
    validate_positive("stddev", stddev)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let distance = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let cdf = norm_cdf((x - mean) / stddev);
            let above = (i + 1) as f64 / n - cdf;
            let below = cdf - i as f64 / n;
            above.max(below)
        })
        .fold(0.0_f64, f64::max);

    Ok(distance)
}

/// Compares a batch against the normal law with the sampler's exact moments.
pub fn compare_to_limit(batch: &TrialBatch) -> SimResult<CltComparison> {
    let empirical = summarize(batch.outcomes())?;
    let (theoretical_mean, theoretical_stddev) = batch.sampler().limiting_moments(batch.n());
    let ks_distance = ks_distance_normal(batch.outcomes(), theoretical_mean, theoretical_stddev)?;

    Ok(CltComparison {
        empirical,
        theoretical_mean,
        theoretical_stddev,
        ks_distance,
    })
}
