// scripts/benchmark.rs
use clt_lab::math_utils::Timer;
use clt_lab::mc::{simulate, Experiment, OutputFlags, SimulationConfig};
use clt_lab::rng::{RandomSource, RngFactory};
use clt_lab::trials::{run_trials, run_trials_par, TrialSampler};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
    timestamp: String,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
            timestamp: chrono::Utc::now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    draws: usize,
    time_ms: f64,
    throughput_draws_per_sec: f64,
}

impl BenchmarkResult {
    fn new(name: String, draws: usize, time_ms: f64) -> Self {
        Self {
            name,
            draws,
            time_ms,
            throughput_draws_per_sec: draws as f64 / (time_ms / 1000.0),
        }
    }
}

fn run_simulation_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut timer = Timer::new();

    let cases = [
        (Experiment::RandomWalk { steps: 5000 }, 5000),
        (
            Experiment::Wiener {
                n_paths: 20,
                n_steps: 50_000,
                dt: 0.001,
                sigma: 1.0,
                x0: 0.0,
            },
            20 * 50_000,
        ),
        (
            Experiment::Trials {
                sampler: TrialSampler::Dice,
                n: 50,
                num_simulations: 50_000,
            },
            50 * 50_000,
        ),
        (
            Experiment::Trials {
                sampler: TrialSampler::Coin,
                n: 1000,
                num_simulations: 50_000,
            },
            1000 * 50_000,
        ),
        (
            Experiment::Trials {
                sampler: TrialSampler::Exponential { scale: 1.0 },
                n: 50,
                num_simulations: 50_000,
            },
            50 * 50_000,
        ),
    ];

    for (experiment, draws) in cases {
        let cfg = SimulationConfig {
            experiment,
            seed: Some(42),
            outputs: OutputFlags::ALL,
        };

        timer.start();
        match simulate(&cfg) {
            Ok(_) => results.push(BenchmarkResult::new(
                format!("simulate/{}", experiment.name()),
                draws,
                timer.elapsed_ms(),
            )),
            Err(e) => warn!(experiment = experiment.name(), error = %e, "benchmark case failed"),
        }
    }

    results
}

fn run_parallel_benchmarks() -> Vec<BenchmarkResult> {
    let mut results = Vec::new();
    let mut timer = Timer::new();
    let sampler = TrialSampler::Exponential { scale: 1.0 };

    for &num_simulations in &[10_000, 100_000, 1_000_000] {
        let n = 50;
        info!(num_simulations, "running trial aggregation benchmarks");

        timer.start();
        let mut source = RandomSource::seeded(42);
        if run_trials(sampler, n, num_simulations, &mut source).is_ok() {
            results.push(BenchmarkResult::new(
                format!("sequential ({}k trials)", num_simulations / 1000),
                n * num_simulations,
                timer.elapsed_ms(),
            ));
        }

        timer.start();
        if run_trials_par(sampler, n, num_simulations, &RngFactory::new(42)).is_ok() {
            results.push(BenchmarkResult::new(
                format!("rayon ({}k trials)", num_simulations / 1000),
                n * num_simulations,
                timer.elapsed_ms(),
            ));
        }
    }

    results
}

fn print_results(info: &SystemInfo, results: &[BenchmarkResult]) {
    println!("\nclt-lab benchmark ({})", info.timestamp);
    println!(
        "OS: {} | CPU cores: {} | Rayon threads: {}\n",
        info.os, info.cpu_cores, info.rayon_threads
    );
    println!(
        "{:<32} {:>14} {:>12} {:>16}",
        "Benchmark", "Draws", "Time (ms)", "Draws/sec"
    );
    println!("{}", "-".repeat(77));
    for r in results {
        println!(
            "{:<32} {:>14} {:>12.2} {:>16.0}",
            r.name, r.draws, r.time_ms, r.throughput_draws_per_sec
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let system = SystemInfo::gather();
    info!(?system, "gathered system info");

    let mut results = run_simulation_benchmarks();
    results.extend(run_parallel_benchmarks());

    print_results(&system, &results);
}
