// src/mc/mc_engine.rs
use crate::analytics::density::{DEFAULT_CURVE_POINTS, DEFAULT_EXPONENTIAL_DOMAIN};
use crate::analytics::{
    compare_to_limit, exponential_pdf_overlay, normal_overlay_for, summarize, CltComparison,
    DensityCurve, Statistics,
};
use crate::error::{validation::*, SimResult};
use crate::math_utils::Timer;
use crate::paths::{PathGenerator, RandomWalk2D, Walk2D, Wiener1D, WienerPath};
use crate::rng::{RandomSource, RngFactory};
use crate::trials::aggregator::{
    exponential_parent_sample, run_trials, validate_trials, TrialBatch, DEFAULT_NUM_SIMULATIONS,
    PARENT_SAMPLE_SCALE, PARENT_SAMPLE_SIZE,
};
use crate::trials::TrialSampler;
use bitflags::bitflags;
use tracing::debug;

/// Stream reserved for the exponential parent sample of a seeded run.
pub const PARENT_SAMPLE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TRIAL_N: usize = 10;

bitflags! {
    /// Derived outputs attached to a trial batch
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OutputFlags: u32 {
        const NONE          = 0;
        const STATISTICS    = 1 << 0;
        const OVERLAY       = 1 << 1;
        const COMPARISON    = 1 << 2;
        const PARENT_SAMPLE = 1 << 3;
        const ALL = Self::STATISTICS.bits()
            | Self::OVERLAY.bits()
            | Self::COMPARISON.bits()
            | Self::PARENT_SAMPLE.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Experiment {
    RandomWalk {
        steps: usize,
    },
    Wiener {
        n_paths: usize,
        n_steps: usize,
        dt: f64,
        sigma: f64,
        x0: f64,
    },
    Trials {
        sampler: TrialSampler,
        n: usize,
        num_simulations: usize,
    },
}

impl Experiment {
    pub fn name(&self) -> &'static str {
        match self {
            Experiment::RandomWalk { .. } => "random_walk",
            Experiment::Wiener { .. } => "wiener",
            Experiment::Trials { sampler, .. } => sampler.name(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub experiment: Experiment,
    /// `None` draws from OS entropy; such runs are not reproducible.
    pub seed: Option<u64>,
    pub outputs: OutputFlags,
}

impl SimulationConfig {
    /// Validate the simulation configuration
    pub fn validate(&self) -> SimResult<()> {
        match self.experiment {
            Experiment::RandomWalk { steps } => RandomWalk2D::new(steps).validate(),
            Experiment::Wiener {
                n_paths,
                n_steps,
                dt,
                sigma,
                x0,
            } => {
                validate_count("n_paths", n_paths)?;
                Wiener1D::new(n_steps, dt, sigma, x0).validate()
            }
            Experiment::Trials {
                sampler,
                n,
                num_simulations,
            } => validate_trials(&sampler, n, num_simulations),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            experiment: Experiment::Trials {
                sampler: TrialSampler::Dice,
                n: DEFAULT_TRIAL_N,
                num_simulations: DEFAULT_NUM_SIMULATIONS,
            },
            seed: Some(DEFAULT_SEED),
            outputs: OutputFlags::ALL,
        }
    }
}

/// Trial batch plus whatever derived outputs were requested
#[derive(Debug, Clone, PartialEq)]
pub struct TrialReport {
    pub batch: TrialBatch,
    pub statistics: Option<Statistics>,
    /// Normal density at the batch mean ± 4σ
    pub overlay: Option<DensityCurve>,
    pub comparison: Option<CltComparison>,
    /// Exponential sampler only: raw Exp(1) draws and their PDF on [0, 10]
    pub parent_sample: Option<Vec<f64>>,
    pub parent_density: Option<DensityCurve>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutput {
    Walk(Walk2D),
    Wiener(Vec<WienerPath>),
    Trials(TrialReport),
}

impl SimulationOutput {
    pub fn as_walk(&self) -> Option<&Walk2D> {
        match self {
            SimulationOutput::Walk(walk) => Some(walk),
            _ => None,
        }
    }

    pub fn as_wiener(&self) -> Option<&[WienerPath]> {
        match self {
            SimulationOutput::Wiener(paths) => Some(paths),
            _ => None,
        }
    }

    pub fn as_trials(&self) -> Option<&TrialReport> {
        match self {
            SimulationOutput::Trials(report) => Some(report),
            _ => None,
        }
    }
}

/// Runs one experiment end to end with a fresh [`RandomSource`].
///
/// The configuration is validated before the source is created, so a
/// rejected run draws nothing. For a fixed seed every output, including
/// the exponential parent sample, is reproducible across processes.
///
/// # Errors
///
/// Returns `SimError::InvalidParameter` for any out-of-range parameter.
pub fn simulate(cfg: &SimulationConfig) -> SimResult<SimulationOutput> {
    cfg.validate()?;

    let timer = Timer::new();
    let mut source = RandomSource::new(cfg.seed);
    debug!(
        experiment = cfg.experiment.name(),
        seed = ?cfg.seed,
        "starting simulation run"
    );

    let output = match cfg.experiment {
        Experiment::RandomWalk { steps } => {
            SimulationOutput::Walk(RandomWalk2D::new(steps).generate(&mut source)?)
        }
        Experiment::Wiener {
            n_paths,
            n_steps,
            dt,
            sigma,
            x0,
        } => SimulationOutput::Wiener(
            Wiener1D::new(n_steps, dt, sigma, x0).generate_many(n_paths, &mut source)?,
        ),
        Experiment::Trials {
            sampler,
            n,
            num_simulations,
        } => {
            let batch = run_trials(sampler, n, num_simulations, &mut source)?;
            SimulationOutput::Trials(build_report(batch, cfg)?)
        }
    };

    debug!(
        experiment = cfg.experiment.name(),
        elapsed_ms = timer.elapsed_ms(),
        "simulation run finished"
    );
    Ok(output)
}

fn build_report(batch: TrialBatch, cfg: &SimulationConfig) -> SimResult<TrialReport> {
    let statistics = if cfg
        .outputs
        .intersects(OutputFlags::STATISTICS | OutputFlags::OVERLAY)
    {
        Some(summarize(batch.outcomes())?)
    } else {
        None
    };

    let overlay = match statistics {
        Some(stats) if cfg.outputs.contains(OutputFlags::OVERLAY) => {
            Some(normal_overlay_for(&stats)?)
        }
        _ => None,
    };

    let comparison = if cfg.outputs.contains(OutputFlags::COMPARISON) {
        Some(compare_to_limit(&batch)?)
    } else {
        None
    };

    let wants_parent = cfg.outputs.contains(OutputFlags::PARENT_SAMPLE)
        && matches!(batch.sampler(), TrialSampler::Exponential { .. });
    let (parent_sample, parent_density) = if wants_parent {
        // Separate stream: the main batch's draws are unaffected.
        let mut parent_source = match cfg.seed {
            Some(seed) => RngFactory::new(seed).stream(PARENT_SAMPLE_STREAM),
            None => RandomSource::new(None),
        };
        let sample =
            exponential_parent_sample(PARENT_SAMPLE_SCALE, PARENT_SAMPLE_SIZE, &mut parent_source)?;
        let density = exponential_pdf_overlay(
            PARENT_SAMPLE_SCALE,
            DEFAULT_EXPONENTIAL_DOMAIN,
            DEFAULT_CURVE_POINTS,
        )?;
        (Some(sample), Some(density))
    } else {
        (None, None)
    };

    Ok(TrialReport {
        batch,
        statistics: statistics.filter(|_| cfg.outputs.contains(OutputFlags::STATISTICS)),
        overlay,
        comparison,
        parent_sample,
        parent_density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exponential_cfg(seed: Option<u64>) -> SimulationConfig {
        SimulationConfig {
            experiment: Experiment::Trials {
                sampler: TrialSampler::Exponential { scale: 1.0 },
                n: 10,
                num_simulations: 2000,
            },
            seed,
            outputs: OutputFlags::ALL,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let cfg = exponential_cfg(Some(7));
        assert_eq!(simulate(&cfg).unwrap(), simulate(&cfg).unwrap());
    }

    #[test]
    fn test_parent_sample_does_not_disturb_batch() {
        let with_parent = simulate(&exponential_cfg(Some(7))).unwrap();
        let without_parent = simulate(&SimulationConfig {
            outputs: OutputFlags::STATISTICS,
            ..exponential_cfg(Some(7))
        })
        .unwrap();

        let a = with_parent.as_trials().unwrap();
        let b = without_parent.as_trials().unwrap();
        assert_eq!(a.batch, b.batch);
        assert_eq!(a.parent_sample.as_ref().map(Vec::len), Some(PARENT_SAMPLE_SIZE));
        assert!(a.parent_density.is_some());
        assert!(b.parent_sample.is_none());
        assert!(b.overlay.is_none());
        assert!(b.comparison.is_none());
    }

    #[test]
    fn test_overlay_without_statistics_flag() {
        let out = simulate(&SimulationConfig {
            outputs: OutputFlags::OVERLAY,
            ..SimulationConfig::default()
        })
        .unwrap();
        let report = out.as_trials().unwrap();
        assert!(report.statistics.is_none());
        assert!(report.overlay.is_some());
    }

    #[test]
    fn test_dice_has_no_parent_sample() {
        let out = simulate(&SimulationConfig::default()).unwrap();
        let report = out.as_trials().unwrap();
        assert!(report.parent_sample.is_none());
        assert!(report.statistics.is_some());
        assert!(report.comparison.is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = SimulationConfig {
            experiment: Experiment::Wiener {
                n_paths: 0,
                n_steps: 10,
                dt: 0.01,
                sigma: 1.0,
                x0: 0.0,
            },
            ..SimulationConfig::default()
        };
        assert!(simulate(&cfg).unwrap_err().is_invalid_parameter());

        let oversized = SimulationConfig {
            experiment: Experiment::Trials {
                sampler: TrialSampler::Dice,
                n: 1_000_000,
                num_simulations: 1_000_000,
            },
            ..SimulationConfig::default()
        };
        assert!(oversized.validate().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_output_variants() {
        let walk = simulate(&SimulationConfig {
            experiment: Experiment::RandomWalk { steps: 100 },
            ..SimulationConfig::default()
        })
        .unwrap();
        assert_eq!(walk.as_walk().map(Walk2D::len), Some(100));
        assert!(walk.as_trials().is_none());

        let wiener = simulate(&SimulationConfig {
            experiment: Experiment::Wiener {
                n_paths: 3,
                n_steps: 50,
                dt: 0.1,
                sigma: 1.0,
                x0: 1.0,
            },
            ..SimulationConfig::default()
        })
        .unwrap();
        let paths = wiener.as_wiener().unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.len() == 51 && p.values()[0] == 1.0));
    }
}
