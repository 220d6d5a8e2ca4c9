// demos/clt_demo.rs
use clt_lab::math_utils::Timer;
use clt_lab::mc::{simulate, Experiment, SimulationConfig, SimulationOutput, TrialReport};
use clt_lab::paths::wiener::{DEFAULT_DT, DEFAULT_N_PATHS, DEFAULT_SIGMA, DEFAULT_T_MAX};
use clt_lab::paths::Wiener1D;
use clt_lab::trials::TrialSampler;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    println!("Running clt-lab demo (seed {})\n", seed);

    run_walk(seed);
    run_wiener(seed);

    for (sampler, n) in [
        (TrialSampler::Dice, 10),
        (TrialSampler::Coin, 50),
        (TrialSampler::Exponential { scale: 1.0 }, 10),
    ] {
        run_trials(sampler, n, seed);
    }
}

fn run_walk(seed: u64) {
    let cfg = SimulationConfig {
        experiment: Experiment::RandomWalk { steps: 1000 },
        seed: Some(seed),
        ..Default::default()
    };
    let output = simulate(&cfg).expect("Valid configuration");
    let Some(walk) = output.as_walk() else {
        return;
    };

    let (x, y) = walk.final_position();
    println!("--- Rabbit's walk: {} hops ---", walk.len());
    println!("Final position:      ({:.2}, {:.2})", x, y);
    println!("Distance from burrow: {:.1} hops", walk.final_distance());
    println!("Farthest X:          {:.1}", walk.farthest_x());
    println!("Farthest Y:          {:.1}\n", walk.farthest_y());
}

fn run_wiener(seed: u64) {
    let grid = Wiener1D::from_horizon(DEFAULT_T_MAX, DEFAULT_DT, DEFAULT_SIGMA, 0.0)
        .expect("Valid horizon");
    let cfg = SimulationConfig {
        experiment: Experiment::Wiener {
            n_paths: DEFAULT_N_PATHS,
            n_steps: grid.n_steps,
            dt: grid.dt,
            sigma: grid.sigma,
            x0: grid.x0,
        },
        seed: Some(seed),
        ..Default::default()
    };

    let output = simulate(&cfg).expect("Valid configuration");
    let Some(paths) = output.as_wiener() else {
        return;
    };

    println!(
        "--- Wiener process: {} paths, {} steps, T = {:.1} ---",
        paths.len(),
        grid.n_steps,
        grid.horizon()
    );
    for (i, path) in paths.iter().enumerate() {
        println!("Path {}: X(T) = {:+.4}", i + 1, path.terminal());
    }
    println!();
}

fn run_trials(sampler: TrialSampler, n: usize, seed: u64) {
    let cfg = SimulationConfig {
        experiment: Experiment::Trials {
            sampler,
            n,
            num_simulations: 10_000,
        },
        seed: Some(seed),
        ..Default::default()
    };

    let mut timer = Timer::new();
    timer.start();
    let output = simulate(&cfg).expect("Valid configuration");
    let elapsed = timer.elapsed_ms();

    if let SimulationOutput::Trials(report) = output {
        print_report(&report, n);
        info!(sampler = sampler.name(), elapsed_ms = elapsed, "trial batch done");
    }
}

fn print_report(report: &TrialReport, n: usize) {
    println!(
        "--- CLT: sum of {} {} draws ({} trials) ---",
        n,
        report.batch.sampler().name(),
        report.batch.len()
    );

    if let Some(stats) = report.statistics {
        println!("Mean:               {:.2}", stats.mean);
        println!("Standard deviation: {:.2}", stats.stddev);
        println!("Range:              [{:.2}, {:.2}]", stats.min, stats.max);
    }
    if let Some(cmp) = report.comparison {
        println!(
            "Limit N({:.2}, {:.2}²), KS distance {:.4}",
            cmp.theoretical_mean, cmp.theoretical_stddev, cmp.ks_distance
        );
    }
    if let Some(curve) = &report.overlay {
        let (lo, hi) = curve.domain();
        println!("Overlay: {} points on [{:.2}, {:.2}]", curve.len(), lo, hi);
    }
    if let Some(sample) = &report.parent_sample {
        let mean = sample.iter().sum::<f64>() / sample.len() as f64;
        println!("Parent Exp(1) sample: {} draws, mean {:.3}", sample.len(), mean);
    }
    println!();
}
