// src/error.rs
use std::fmt;

/// Error types for the clt-lab library
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Invalid parameter values (counts are reported as `f64`)
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// A distribution constructor rejected its parameters
    DistributionError { distribution: String, reason: String },

    /// A reduction produced a non-finite value
    NumericalInstability { method: String, reason: String },
}

impl SimError {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, SimError::InvalidParameter { .. })
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            SimError::DistributionError {
                distribution,
                reason,
            } => {
                write!(f, "Cannot build {} distribution: {}", distribution, reason)
            }
            SimError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result type alias for clt-lab operations
pub type SimResult<T> = Result<T, SimError>;

/// Validation utilities
///
/// Every public simulation entry point runs these before drawing a single
/// random number, so a rejected call never advances a `RandomSource`.
pub mod validation {
    use super::{SimError, SimResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> SimResult<()> {
        if !(value > 0.0) || !value.is_finite() {
            Err(SimError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SimResult<()> {
        if !(value >= 0.0) || !value.is_finite() {
            Err(SimError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            Err(SimError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a closed range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> SimResult<()> {
        if !(value >= min && value <= max) {
            Err(SimError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a probability parameter
    pub fn validate_probability(name: &str, p: f64) -> SimResult<()> {
        validate_range(name, p, 0.0, 1.0)
    }

    /// Validate a step, sample, trial or path count
    pub fn validate_count(name: &str, count: usize) -> SimResult<()> {
        if count == 0 {
            Err(SimError::InvalidParameter {
                parameter: name.to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else if count > 1_000_000_000 {
            Err(SimError::InvalidParameter {
                parameter: name.to_string(),
                value: count as f64,
                constraint: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
