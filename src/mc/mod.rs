//! Simulation facade: one configuration in, one immutable output out.

pub mod cache;
pub mod mc_engine;

pub use cache::{SimulationCache, DEFAULT_CACHE_CAPACITY};
pub use mc_engine::{
    simulate, Experiment, OutputFlags, SimulationConfig, SimulationOutput, TrialReport,
};
