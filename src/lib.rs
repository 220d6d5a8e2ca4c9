//! # clt-lab: Seeded Stochastic Simulations and the Central Limit Theorem
//!
//! The numeric core behind a set of interactive demonstrations: 2D random
//! walks, 1D Wiener paths, and Monte Carlo sums of dice, coin flips and
//! exponential draws, each reduced to summary statistics and compared with
//! the normal law the CLT predicts.
//!
//! ## Key Features
//!
//! - **Reproducible**: every run owns its [`rng::RandomSource`]; a seed fixes all outputs
//! - **Eager validation**: bad parameters fail before any randomness is consumed
//! - **Parallel trials**: Rayon aggregation that is independent of the thread count
//! - **Reference densities**: normal and exponential overlays, KS distance to the limit
//!
//! ## Quick Start
//!
//! ```rust
//! use clt_lab::mc::{simulate, Experiment, SimulationConfig};
//! use clt_lab::trials::TrialSampler;
//!
//! let config = SimulationConfig {
//!     experiment: Experiment::Trials {
//!         sampler: TrialSampler::Coin,
//!         n: 100,
//!         num_simulations: 20_000,
//!     },
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let output = simulate(&config).expect("Valid configuration");
//! let report = output.as_trials().expect("Trial experiment");
//! let stats = report.statistics.expect("Statistics requested");
//! println!("Heads: {:.2} ± {:.2}", stats.mean, stats.stddev);
//! ```

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod paths;
pub mod rng;
pub mod trials;

// Re-export commonly used types for convenience
pub use error::{SimError, SimResult};
