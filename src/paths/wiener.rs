// src/paths/wiener.rs
//! One-dimensional Wiener process (scaled Brownian motion)
//!
//! # Mathematical Framework
//!
//! ```text
//! dX_t = σ dW_t,    X_0 = x0
//! ```
//!
//! Discretised on a uniform grid with exact Gaussian increments:
//! ```text
//! ΔW_j ~ N(0, √Δt)
//! X_i  = x0 + σ Σ_{j < i} ΔW_j,   t_i = i Δt,   i = 0..=n
//! ```
//! No discretisation error is introduced since the increments of a
//! Wiener process are exactly normal.

use super::generator::PathGenerator;
use crate::error::{validation::*, SimError, SimResult};
use crate::math_utils::linspace;
use crate::rng::RandomSource;

pub const DEFAULT_N_PATHS: usize = 5;
pub const DEFAULT_T_MAX: f64 = 10.0;
pub const DEFAULT_DT: f64 = 0.01;
pub const DEFAULT_SIGMA: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wiener1D {
    pub n_steps: usize,
    pub dt: f64,
    pub sigma: f64,
    pub x0: f64,
}

impl Wiener1D {
    pub fn new(n_steps: usize, dt: f64, sigma: f64, x0: f64) -> Self {
        Wiener1D {
            n_steps,
            dt,
            sigma,
            x0,
        }
    }

    /// Grid covering `[0, t_max]` with `floor(t_max / dt)` steps.
    pub fn from_horizon(t_max: f64, dt: f64, sigma: f64, x0: f64) -> SimResult<Self> {
        validate_positive("t_max", t_max)?;
        validate_positive("dt", dt)?;

        // Tolerance keeps 10.0 / 0.01 from truncating to 999.
        let steps = (t_max / dt + 1e-9).floor();
        if steps < 1.0 {
            return Err(SimError::InvalidParameter {
                parameter: "t_max".to_string(),
                value: t_max,
                constraint: format!("must cover at least one step of dt = {}", dt),
            });
        }
        Ok(Wiener1D::new(steps as usize, dt, sigma, x0))
    }

    /// Final time of the grid, `n_steps · dt`
    pub fn horizon(&self) -> f64 {
        self.n_steps as f64 * self.dt
    }
}

impl Default for Wiener1D {
    fn default() -> Self {
        Wiener1D::new(
            (DEFAULT_T_MAX / DEFAULT_DT).round() as usize,
            DEFAULT_DT,
            DEFAULT_SIGMA,
            0.0,
        )
    }
}

/// Time grid and positions of one realisation; index 0 is the start state.
#[derive(Debug, Clone, PartialEq)]
pub struct WienerPath {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl WienerPath {
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    pub fn terminal(&self) -> f64 {
        self.values.last().copied().unwrap_or(f64::NAN)
    }
}

impl PathGenerator for Wiener1D {
    type Path = WienerPath;

    fn validate(&self) -> SimResult<()> {
        validate_count("n_steps", self.n_steps)?;
        validate_positive("dt", self.dt)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("x0", self.x0)
    }

    fn generate(&self, source: &mut RandomSource) -> SimResult<WienerPath> {
        self.validate()?;

        let increments = source.normal(0.0, self.dt.sqrt(), self.n_steps)?;

        let mut values = Vec::with_capacity(self.n_steps + 1);
        values.push(self.x0);
        let mut x = self.x0;
        for dw in increments {
            x += self.sigma * dw;
            values.push(x);
        }

        let times = linspace(0.0, self.horizon(), self.n_steps + 1);
        Ok(WienerPath { times, values })
    }
}
