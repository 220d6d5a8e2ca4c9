// src/trials/sampler.rs
//! Per-trial draw-and-reduce rules
//!
//! # Mathematical Definitions
//!
//! Every sampler sums `n` i.i.d. draws into one scalar per trial:
//! - **Dice**: draws ~ Uniform{1..6}; sum has mean 3.5n, variance 35n/12
//! - **Coin**: draws ~ Bernoulli(½); sum ~ Binomial(n, ½), mean n/2, variance n/4
//! - **Exponential**: draws ~ Exp(mean = scale); sum ~ Gamma(n, scale),
//!   mean n·scale, variance n·scale²
//!
//! By the Central Limit Theorem each sum tends to the normal law with
//! the moments above as `n` grows.

use crate::error::{validation::*, SimError, SimResult};
use crate::rng::RandomSource;
use ndarray::{Array2, Axis};

pub const DICE_FACES: i64 = 6;
pub const COIN_P: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialSampler {
    /// Sum of `n` fair six-sided dice
    Dice,

    /// Number of heads in `n` fair coin flips
    Coin,

    /// Sum of `n` exponential draws with mean `scale`
    Exponential { scale: f64 },
}

impl TrialSampler {
    pub fn validate(&self) -> SimResult<()> {
        match self {
            TrialSampler::Dice | TrialSampler::Coin => Ok(()),
            TrialSampler::Exponential { scale } => validate_positive("scale", *scale),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrialSampler::Dice => "dice",
            TrialSampler::Coin => "coin",
            TrialSampler::Exponential { .. } => "exponential",
        }
    }

    /// Mean and standard deviation of one trial's sum of `n` draws.
    pub fn limiting_moments(&self, n: usize) -> (f64, f64) {
        let n = n as f64;
        match self {
            TrialSampler::Dice => (3.5 * n, (35.0 * n / 12.0).sqrt()),
            TrialSampler::Coin => (COIN_P * n, (n * COIN_P * (1.0 - COIN_P)).sqrt()),
            TrialSampler::Exponential { scale } => (n * scale, n.sqrt() * scale),
        }
    }

    /// Draws `num_simulations × n` values and reduces each row to its sum.
    ///
    /// Parameters must already be validated.
    pub(crate) fn sample_batch(
        &self,
        source: &mut RandomSource,
        n: usize,
        num_simulations: usize,
    ) -> SimResult<Vec<f64>> {
        match self {
            TrialSampler::Dice => {
                let rolls = source.discrete_uniform(1, DICE_FACES + 1, (num_simulations, n))?;
                Ok(rolls.sum_axis(Axis(1)).iter().map(|&s| s as f64).collect())
            }
            TrialSampler::Coin => {
                let heads = source.binomial(n as u64, COIN_P, num_simulations)?;
                Ok(heads.into_iter().map(|h| h as f64).collect())
            }
            TrialSampler::Exponential { scale } => {
                let draws = source.exponential(*scale, num_simulations * n)?;
                let draws = Array2::from_shape_vec((num_simulations, n), draws).map_err(|e| {
                    SimError::NumericalInstability {
                        method: "exponential trial reduction".to_string(),
                        reason: e.to_string(),
                    }
                })?;
                Ok(draws.sum_axis(Axis(1)).to_vec())
            }
        }
    }

    /// One trial drawn from its own source; used by the parallel aggregator.
    pub(crate) fn sample_trial(&self, source: &mut RandomSource, n: usize) -> SimResult<f64> {
        Ok(self.sample_batch(source, n, 1)?[0])
    }
}
