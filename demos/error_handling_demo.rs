// demos/error_handling_demo.rs
use clt_lab::analytics::{normal_pdf_overlay, summarize};
use clt_lab::mc::{simulate, Experiment, SimulationConfig};
use clt_lab::paths::{PathGenerator, Wiener1D};
use clt_lab::rng::RandomSource;
use clt_lab::trials::{run_trials, TrialSampler};
use clt_lab::SimError;

fn main() {
    println!("Error Handling Demo for clt-lab");
    println!("===============================\n");

    // Test 1: Zero dice per trial
    println!("1. Testing zero dice per trial...");
    let mut source = RandomSource::seeded(42);
    match run_trials(TrialSampler::Dice, 0, 10_000, &mut source) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Non-positive exponential scale
    println!("\n2. Testing non-positive exponential scale...");
    match run_trials(TrialSampler::Exponential { scale: 0.0 }, 10, 10_000, &mut source) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Wiener path without steps, negative dt
    println!("\n3. Testing invalid Wiener parameters...");
    for wiener in [
        Wiener1D::new(0, 0.01, 1.0, 0.0),
        Wiener1D::new(100, -0.01, 1.0, 0.0),
        Wiener1D::new(100, 0.01, -1.0, 0.0),
    ] {
        match wiener.generate(&mut source) {
            Ok(_) => println!("   Unexpected: Should have failed!"),
            Err(SimError::InvalidParameter { parameter, .. }) => {
                println!("   ✓ Rejected parameter '{}'", parameter)
            }
            Err(e) => println!("   Unexpected error kind: {}", e),
        }
    }

    // Test 4: Rejected calls consume no randomness
    println!("\n4. Testing that rejected calls leave the source untouched...");
    let mut fresh = RandomSource::seeded(42);
    let untouched = source.uniform01(3).expect("Valid count") == fresh.uniform01(3).expect("Valid count");
    println!("   ✓ Source still in its seeded state: {}", untouched);

    // Test 5: Degenerate but valid statistics
    println!("\n5. Testing a single-trial batch...");
    let stats = summarize(&[21.0]).expect("Non-empty sample");
    println!("   ✓ stddev of one trial = {}", stats.stddev);
    match normal_pdf_overlay(stats.mean, stats.stddev, 4.0, 1000) {
        Ok(curve) => {
            let (lo, hi) = curve.domain();
            println!("   ✓ Overlay widened to [{:.8}, {:.8}]", lo, hi)
        }
        Err(e) => println!("   Unexpected: {}", e),
    }

    // Test 6: Invalid simulation configuration
    println!("\n6. Testing invalid simulation configuration...");
    let invalid_cfg = SimulationConfig {
        experiment: Experiment::RandomWalk { steps: 0 },
        seed: Some(1),
        ..Default::default()
    };
    match simulate(&invalid_cfg) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\nAll error handling tests completed!");
}
