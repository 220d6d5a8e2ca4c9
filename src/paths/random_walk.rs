// src/paths/random_walk.rs
//! Two-dimensional random walk with unit-length hops
//!
//! # Mathematical Framework
//!
//! Each step draws an angle θ ~ Uniform[0, 2π) and moves one unit:
//! ```text
//! (x_k, y_k) = Σ_{j ≤ k} (cos θ_j, sin θ_j)
//! ```
//! The walk starts at the origin, which is not part of the returned
//! trajectory: `steps` hops produce exactly `steps` positions.

use super::generator::PathGenerator;
use crate::error::{validation::validate_count, SimResult};
use crate::rng::RandomSource;

pub const DEFAULT_WALK_STEPS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalk2D {
    pub steps: usize,
}

impl RandomWalk2D {
    pub fn new(steps: usize) -> Self {
        RandomWalk2D { steps }
    }
}

impl Default for RandomWalk2D {
    fn default() -> Self {
        RandomWalk2D::new(DEFAULT_WALK_STEPS)
    }
}

/// Post-origin trajectory of a 2D walk plus the figures reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk2D {
    positions: Vec<(f64, f64)>,
    final_position: (f64, f64),
    farthest_x: f64,
    farthest_y: f64,
}

impl Walk2D {
    fn from_positions(positions: Vec<(f64, f64)>) -> Self {
        let final_position = positions.last().copied().unwrap_or((0.0, 0.0));
        let (farthest_x, farthest_y) = positions
            .iter()
            .fold((0.0_f64, 0.0_f64), |(fx, fy), &(x, y)| {
                (fx.max(x.abs()), fy.max(y.abs()))
            });

        Walk2D {
            positions,
            final_position,
            farthest_x,
            farthest_y,
        }
    }

    pub fn positions(&self) -> &[(f64, f64)] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn final_position(&self) -> (f64, f64) {
        self.final_position
    }

    /// Largest |x| reached along the walk
    pub fn farthest_x(&self) -> f64 {
        self.farthest_x
    }

    /// Largest |y| reached along the walk
    pub fn farthest_y(&self) -> f64 {
        self.farthest_y
    }

    /// Euclidean distance of the final position from the origin
    pub fn final_distance(&self) -> f64 {
        self.final_position.0.hypot(self.final_position.1)
    }

    pub fn xs(&self) -> Vec<f64> {
        self.positions.iter().map(|p| p.0).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.positions.iter().map(|p| p.1).collect()
    }
}

impl PathGenerator for RandomWalk2D {
    type Path = Walk2D;

    fn validate(&self) -> SimResult<()> {
        validate_count("steps", self.steps)
    }

    fn generate(&self, source: &mut RandomSource) -> SimResult<Walk2D> {
        self.validate()?;

        // All angles are drawn before any position is accumulated.
        let angles: Vec<f64> = (0..self.steps).map(|_| source.uniform_angle()).collect();

        let mut positions = Vec::with_capacity(self.steps);
        let (mut x, mut y) = (0.0, 0.0);
        for theta in angles {
            x += theta.cos();
            y += theta.sin();
            positions.push((x, y));
        }

        Ok(Walk2D::from_positions(positions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_length_matches_steps() {
        let mut source = RandomSource::seeded(42);
        let walk = RandomWalk2D::new(500).generate(&mut source).unwrap();
        assert_eq!(walk.len(), 500);
    }

    #[test]
    fn test_hops_have_unit_length() {
        let mut source = RandomSource::seeded(1);
        let walk = RandomWalk2D::new(200).generate(&mut source).unwrap();

        let (x0, y0) = walk.positions()[0];
        assert!((x0.hypot(y0) - 1.0).abs() < 1e-12);

        for pair in walk.positions().windows(2) {
            let hop = (pair[1].0 - pair[0].0).hypot(pair[1].1 - pair[0].1);
            assert!((hop - 1.0).abs() < 1e-9, "hop length {}", hop);
        }
    }

    #[test]
    fn test_derived_fields() {
        let mut source = RandomSource::seeded(9);
        let walk = RandomWalk2D::new(300).generate(&mut source).unwrap();

        let max_x = walk.xs().iter().fold(0.0_f64, |m, x| m.max(x.abs()));
        let max_y = walk.ys().iter().fold(0.0_f64, |m, y| m.max(y.abs()));
        assert_eq!(walk.farthest_x(), max_x);
        assert_eq!(walk.farthest_y(), max_y);
        assert_eq!(walk.final_position(), *walk.positions().last().unwrap());
        assert!(walk.final_distance() <= 300.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut source = RandomSource::seeded(0);
        let err = RandomWalk2D::new(0).generate(&mut source).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
