// src/trials/aggregator.rs
//! Monte Carlo aggregation of independent trials
//!
//! A [`TrialBatch`] is the only thing handed downstream: the raw per-draw
//! matrix is reduced and dropped inside [`run_trials`].
//!
//! # Reproducibility
//!
//! - [`run_trials`] consumes one [`RandomSource`] sequentially; the batch
//!   is a pure function of the source's seed and the parameters.
//! - [`run_trials_par`] gives trial `i` its own stream from an
//!   [`RngFactory`], so the batch does not depend on the Rayon thread
//!   count. It does not reproduce the sequential batch for the same seed.

use super::sampler::TrialSampler;
use crate::error::{validation::*, SimError, SimResult};
use crate::rng::{RandomSource, RngFactory};
use rayon::prelude::*;

pub const DEFAULT_NUM_SIMULATIONS: usize = 10_000;
pub const PARENT_SAMPLE_SIZE: usize = 10_000;
pub const PARENT_SAMPLE_SCALE: f64 = 1.0;

/// Cap on `n × num_simulations`, the size of the per-draw matrix.
pub const MAX_TRIAL_DRAWS: usize = 1_000_000_000;

/// Outcomes of `num_simulations` independent trials of one sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialBatch {
    sampler: TrialSampler,
    n: usize,
    outcomes: Vec<f64>,
}

impl TrialBatch {
    pub fn sampler(&self) -> TrialSampler {
        self.sampler
    }

    /// Draws per trial
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn into_outcomes(self) -> Vec<f64> {
        self.outcomes
    }
}

pub(crate) fn validate_trials(
    sampler: &TrialSampler,
    n: usize,
    num_simulations: usize,
) -> SimResult<()> {
    validate_count("n", n)?;
    validate_count("num_simulations", num_simulations)?;
    match n.checked_mul(num_simulations) {
        Some(total) if total <= MAX_TRIAL_DRAWS => {}
        _ => {
            return Err(SimError::InvalidParameter {
                parameter: "n * num_simulations".to_string(),
                value: n as f64 * num_simulations as f64,
                constraint: format!("total draws must not exceed {}", MAX_TRIAL_DRAWS),
            })
        }
    }
    sampler.validate()
}

/// Runs `num_simulations` trials of `n` draws each from `source`.
///
/// # Errors
///
/// `InvalidParameter` for `n = 0`, `num_simulations = 0`, more than
/// [`MAX_TRIAL_DRAWS`] draws in total or a non-positive exponential scale;
/// `source` is left untouched in that case.
pub fn run_trials(
    sampler: TrialSampler,
    n: usize,
    num_simulations: usize,
    source: &mut RandomSource,
) -> SimResult<TrialBatch> {
    validate_trials(&sampler, n, num_simulations)?;

    let outcomes = sampler.sample_batch(source, n, num_simulations)?;
    Ok(TrialBatch {
        sampler,
        n,
        outcomes,
    })
}

/// Parallel variant of [`run_trials`]: trial `i` draws from `factory.stream(i)`.
pub fn run_trials_par(
    sampler: TrialSampler,
    n: usize,
    num_simulations: usize,
    factory: &RngFactory,
) -> SimResult<TrialBatch> {
    validate_trials(&sampler, n, num_simulations)?;

    let outcomes = (0..num_simulations)
        .into_par_iter()
        .map(|i| {
            let mut source = factory.stream(i as u64);
            sampler.sample_trial(&mut source, n)
        })
        .collect::<SimResult<Vec<f64>>>()?;

    Ok(TrialBatch {
        sampler,
        n,
        outcomes,
    })
}

/// Raw, unsummed exponential draws illustrating the parent distribution.
pub fn exponential_parent_sample(
    scale: f64,
    size: usize,
    source: &mut RandomSource,
) -> SimResult<Vec<f64>> {
    source.exponential(scale, size)
}
