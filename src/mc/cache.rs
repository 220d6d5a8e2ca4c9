// src/mc/cache.rs
//! Memoised simulation runs
//!
//! A seeded run is a pure function of its configuration, so its output can
//! be reused whenever the exact same parameter tuple is requested again.
//! Floats are keyed by bit pattern: `0.1` and `0.1 + ε` are different runs.
//! Unseeded runs are never stored. The cache holds at most `capacity`
//! outputs and evicts the oldest entry first.

use super::mc_engine::{simulate, Experiment, SimulationConfig, SimulationOutput};
use crate::error::SimResult;
use crate::trials::TrialSampler;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::trace;

type CacheKey = Vec<u64>;

pub const DEFAULT_CACHE_CAPACITY: usize = 64;

fn cache_key(cfg: &SimulationConfig) -> Option<CacheKey> {
    let seed = cfg.seed?;
    let mut key = vec![seed, u64::from(cfg.outputs.bits())];

    match cfg.experiment {
        Experiment::RandomWalk { steps } => key.extend([0, steps as u64]),
        Experiment::Wiener {
            n_paths,
            n_steps,
            dt,
            sigma,
            x0,
        } => key.extend([
            1,
            n_paths as u64,
            n_steps as u64,
            dt.to_bits(),
            sigma.to_bits(),
            x0.to_bits(),
        ]),
        Experiment::Trials {
            sampler,
            n,
            num_simulations,
        } => {
            let (tag, scale) = match sampler {
                TrialSampler::Dice => (0, 0),
                TrialSampler::Coin => (1, 0),
                TrialSampler::Exponential { scale } => (2, scale.to_bits()),
            };
            key.extend([2, tag, scale, n as u64, num_simulations as u64]);
        }
    }
    Some(key)
}

#[derive(Debug)]
pub struct SimulationCache {
    entries: HashMap<CacheKey, Arc<SimulationOutput>>,
    insertion_order: VecDeque<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for SimulationCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl SimulationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 disables storage; every call runs [`simulate`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the cached output for `cfg`, running [`simulate`] on a miss.
    pub fn simulate(&mut self, cfg: &SimulationConfig) -> SimResult<Arc<SimulationOutput>> {
        let Some(key) = cache_key(cfg) else {
            self.misses += 1;
            return simulate(cfg).map(Arc::new);
        };

        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            trace!(experiment = cfg.experiment.name(), "simulation cache hit");
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        let output = Arc::new(simulate(cfg)?);
        if self.capacity == 0 {
            return Ok(output);
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            trace!("simulation cache evicted oldest entry");
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, Arc::clone(&output));
        Ok(output)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reused() {
        let mut cache = SimulationCache::new();
        let cfg = SimulationConfig::default();

        let first = cache.simulate(&cfg).unwrap();
        let second = cache.simulate(&cfg).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_seed_is_part_of_key() {
        let mut cache = SimulationCache::new();
        let a = cache.simulate(&SimulationConfig::default()).unwrap();
        let b = cache
            .simulate(&SimulationConfig {
                seed: Some(43),
                ..SimulationConfig::default()
            })
            .unwrap();

        assert_eq!(cache.len(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_unseeded_runs_bypass_cache() {
        let mut cache = SimulationCache::new();
        let cfg = SimulationConfig {
            experiment: Experiment::RandomWalk { steps: 10 },
            seed: None,
            ..SimulationConfig::default()
        };

        cache.simulate(&cfg).unwrap();
        cache.simulate(&cfg).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 2);
    }

    fn walk(steps: usize) -> SimulationConfig {
        SimulationConfig {
            experiment: Experiment::RandomWalk { steps },
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = SimulationCache::with_capacity(2);
        cache.simulate(&walk(10)).unwrap();
        cache.simulate(&walk(20)).unwrap();
        cache.simulate(&walk(30)).unwrap();
        assert_eq!(cache.len(), 2);

        cache.simulate(&walk(30)).unwrap();
        assert_eq!(cache.hits(), 1);

        cache.simulate(&walk(10)).unwrap();
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 4);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = SimulationCache::with_capacity(0);
        cache.simulate(&walk(10)).unwrap();
        cache.simulate(&walk(10)).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut cache = SimulationCache::new();
        let cfg = SimulationConfig {
            experiment: Experiment::RandomWalk { steps: 0 },
            ..SimulationConfig::default()
        };
        assert!(cache.simulate(&cfg).is_err());
        assert!(cache.is_empty());
    }
}
