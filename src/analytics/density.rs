// src/analytics/density.rs
//! Reference probability densities for overlaying on empirical results
//!
//! # Formulas
//! ```text
//! Normal:      f(x) = exp(-(x-μ)²/(2σ²)) / (σ√(2π))
//! Exponential: f(x) = exp(-x/β) / β   for x ≥ 0, else 0
//! ```
//!
//! Curves depend only on the family and its parameters, never on a draw.

use super::summary::Statistics;
use crate::error::{validation::*, SimError, SimResult};
use crate::math_utils::{linspace, trapezoid};
use statrs::distribution::{Continuous, Exp, Normal};
use tracing::warn;

pub const DEFAULT_DOMAIN_WIDTH: f64 = 4.0;
pub const DEFAULT_CURVE_POINTS: usize = 1000;
pub const DEFAULT_EXPONENTIAL_DOMAIN: (f64, f64) = (0.0, 10.0);

/// Smallest standard deviation a normal overlay is drawn with.
pub const DEGENERATE_STDDEV: f64 = 1e-6;

/// Floor on `stddev / |mean|`, keeping `mean ± w·σ` apart in f64.
pub const RELATIVE_DEGENERATE_STDDEV: f64 = 1e-12;

/// Widening applied to an overlay at `mean`.
pub fn degenerate_stddev(mean: f64) -> f64 {
    DEGENERATE_STDDEV.max(mean.abs() * RELATIVE_DEGENERATE_STDDEV)
}

/// Ordered `(x, density)` samples of a reference PDF
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    xs: Vec<f64>,
    densities: Vec<f64>,
}

impl DensityCurve {
    fn evaluate<F: Fn(f64) -> f64>(domain: (f64, f64), points: usize, pdf: F) -> Self {
        let xs = linspace(domain.0, domain.1, points);
        let densities = xs.iter().map(|&x| pdf(x)).collect();
        DensityCurve { xs, densities }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.densities.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// First and last abscissa
    pub fn domain(&self) -> (f64, f64) {
        match (self.xs.first(), self.xs.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (f64::NAN, f64::NAN),
        }
    }

    /// Trapezoid-rule area under the curve
    pub fn integrate(&self) -> f64 {
        trapezoid(&self.xs, &self.densities)
    }
}

fn validate_points(points: usize) -> SimResult<()> {
    validate_count("points", points)?;
    if points < 2 {
        return Err(SimError::InvalidParameter {
            parameter: "points".to_string(),
            value: points as f64,
            constraint: "a curve needs at least 2 points".to_string(),
        });
    }
    Ok(())
}

/// Normal(mean, stddev) density over `[mean − w·stddev, mean + w·stddev]`.
///
/// A `stddev` below [`degenerate_stddev`] (zero included) is widened to it
/// instead of failing, so the domain never collapses to a point.
pub fn normal_pdf_overlay(
    mean: f64,
    stddev: f64,
    domain_width_in_stddevs: f64,
    points: usize,
) -> SimResult<DensityCurve> {
    validate_finite("mean", mean)?;
    validate_non_negative("stddev", stddev)?;
    validate_positive("domain_width_in_stddevs", domain_width_in_stddevs)?;
    validate_points(points)?;

    let floor = degenerate_stddev(mean);
    let sigma = if stddev >= floor {
        stddev
    } else {
        warn!(
            mean,
            stddev,
            widened_to = floor,
            "degenerate stddev overlay, widening domain"
        );
        floor
    };

    let dist = Normal::new(mean, sigma).map_err(|e| SimError::DistributionError {
        distribution: "Normal".to_string(),
        reason: e.to_string(),
    })?;

    let half_width = domain_width_in_stddevs * sigma;
    Ok(DensityCurve::evaluate(
        (mean - half_width, mean + half_width),
        points,
        |x| dist.pdf(x),
    ))
}

/// Normal overlay centred and scaled on a batch summary, ±4σ, 1000 points.
pub fn normal_overlay_for(stats: &Statistics) -> SimResult<DensityCurve> {
    normal_pdf_overlay(
        stats.mean,
        stats.stddev,
        DEFAULT_DOMAIN_WIDTH,
        DEFAULT_CURVE_POINTS,
    )
}

/// Exponential density with mean `scale` over `domain`.
pub fn exponential_pdf_overlay(
    scale: f64,
    domain: (f64, f64),
    points: usize,
) -> SimResult<DensityCurve> {
    validate_positive("scale", scale)?;
    validate_finite("domain.start", domain.0)?;
    validate_finite("domain.end", domain.1)?;
    if domain.0 >= domain.1 {
        return Err(SimError::InvalidParameter {
            parameter: "domain.end".to_string(),
            value: domain.1,
            constraint: format!("must be greater than domain start ({})", domain.0),
        });
    }
    validate_points(points)?;

    let dist = Exp::new(1.0 / scale).map_err(|e| SimError::DistributionError {
        distribution: "Exponential".to_string(),
        reason: e.to_string(),
    })?;

    Ok(DensityCurve::evaluate(domain, points, |x| {
        if x < 0.0 {
            0.0
        } else {
            dist.pdf(x)
        }
    }))
}
