// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::SQRT_2;

pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// `count` evenly spaced points from `start` to `stop`, both inclusive.
/// The last point is exactly `stop`.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut grid: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            grid[count - 1] = stop;
            grid
        }
    }
}

/// Trapezoid rule over paired abscissae/ordinates.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(0.0, 10.0, 1001);
        assert_eq!(grid.len(), 1001);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[1000], 10.0);
        assert!((grid[500] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_trapezoid_linear() {
        let xs = linspace(0.0, 2.0, 11);
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x).collect();
        assert!((trapezoid(&xs, &ys) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((norm_cdf(1.96) + norm_cdf(-1.96) - 1.0).abs() < 1e-12);
        assert!((norm_cdf(1.96) - 0.975).abs() < 1e-3);
    }
}
