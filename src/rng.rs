// src/rng.rs
//! Random Number Generation for the simulations
//!
//! # Design Philosophy
//!
//! Every simulation run owns exactly one [`RandomSource`]:
//! 1. **Reproducibility**: same seed and call sequence → bit-identical draws
//! 2. **Isolation**: no global generator; two runs never share state
//! 3. **Eager validation**: a rejected call consumes no randomness
//!
//! # Streams
//!
//! [`RngFactory`] derives further independent sources from a base seed.
//! The seed of stream `i` is a splitmix64 mix of `(base_seed, i)`:
//! ```text
//! z = (z ⊕ (z >> 30)) * 0xbf58476d1ce4e5b9
//! z = (z ⊕ (z >> 27)) * 0x94d049bb133111eb
//! mix(z) = z ⊕ (z >> 31)
//!
//! seed(b, i) = mix(mix(b + γ) + i·γ),   γ = 0x9e3779b97f4a7c15
//! ```
//! so the streams of base seeds `b` and `b + 1` are unrelated rather than
//! shifted copies. Parallel work that maps item `i` onto stream `i` is
//! reproducible for any thread count.

use crate::error::{validation::*, SimError, SimResult};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution, Exp, Normal};
use std::f64::consts::TAU;

/// Seeded pseudo-random generator producing uniform, normal, exponential,
/// binomial and discrete-uniform draws.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomSource {
    /// `None` seeds from OS entropy, making the run non-reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(value) => Self::seeded(value),
            None => Self {
                rng: StdRng::from_entropy(),
                seed: None,
            },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Deterministically resets the internal state.
    pub fn seed(&mut self, value: u64) {
        self.rng = StdRng::seed_from_u64(value);
        self.seed = Some(value);
    }

    /// Seed the source was last reset with, if any.
    pub fn seed_value(&self) -> Option<u64> {
        self.seed
    }

    /// Angle in [0, 2π).
    pub fn uniform_angle(&mut self) -> f64 {
        TAU * self.rng.gen::<f64>()
    }

    pub fn uniform01(&mut self, count: usize) -> SimResult<Vec<f64>> {
        validate_count("count", count)?;
        Ok((0..count).map(|_| self.rng.gen::<f64>()).collect())
    }

    pub fn normal(&mut self, mean: f64, std: f64, count: usize) -> SimResult<Vec<f64>> {
        validate_finite("mean", mean)?;
        validate_positive("std", std)?;
        validate_count("count", count)?;

        let dist = Normal::new(mean, std).map_err(|e| SimError::DistributionError {
            distribution: "Normal".to_string(),
            reason: e.to_string(),
        })?;
        Ok(dist.sample_iter(&mut self.rng).take(count).collect())
    }

    /// Draws from Exponential with mean `scale` (rate `1 / scale`).
    pub fn exponential(&mut self, scale: f64, count: usize) -> SimResult<Vec<f64>> {
        validate_positive("scale", scale)?;
        validate_count("count", count)?;

        let dist = Exp::new(1.0 / scale).map_err(|e| SimError::DistributionError {
            distribution: "Exponential".to_string(),
            reason: e.to_string(),
        })?;
        Ok(dist.sample_iter(&mut self.rng).take(count).collect())
    }

    pub fn binomial(&mut self, n: u64, p: f64, count: usize) -> SimResult<Vec<u64>> {
        validate_probability("p", p)?;
        validate_count("count", count)?;

        let dist = Binomial::new(n, p).map_err(|e| SimError::DistributionError {
            distribution: "Binomial".to_string(),
            reason: e.to_string(),
        })?;
        Ok(dist.sample_iter(&mut self.rng).take(count).collect())
    }

    /// Integers in `[low, high)` laid out row-major as `rows × cols`.
    pub fn discrete_uniform(
        &mut self,
        low: i64,
        high: i64,
        shape: (usize, usize),
    ) -> SimResult<Array2<i64>> {
        if low >= high {
            return Err(SimError::InvalidParameter {
                parameter: "high".to_string(),
                value: high as f64,
                constraint: format!("must be greater than low ({})", low),
            });
        }
        validate_count("rows", shape.0)?;
        validate_count("cols", shape.1)?;

        let rng = &mut self.rng;
        Ok(Array2::from_shape_simple_fn(shape, || rng.gen_range(low..high)))
    }
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Factory for independent, reproducible random streams
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Source for a specific stream (trial index, path index, ...)
    pub fn stream(&self, stream_id: u64) -> RandomSource {
        RandomSource::seeded(self.stream_seed(stream_id))
    }

    /// Seed handed to [`RngFactory::stream`] for `stream_id`.
    pub fn stream_seed(&self, stream_id: u64) -> u64 {
        let base = splitmix64(self.base_seed.wrapping_add(GOLDEN_GAMMA));
        splitmix64(base.wrapping_add(stream_id.wrapping_mul(GOLDEN_GAMMA)))
    }
}
