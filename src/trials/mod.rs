//! Central Limit Theorem trials: many independent sums of `n` draws.

pub mod aggregator;
pub mod sampler;

pub use aggregator::{exponential_parent_sample, run_trials, run_trials_par, TrialBatch};
pub use sampler::TrialSampler;
