//! Error types for step-length selection.
//!
//! Errors are reserved for inputs the search cannot proceed from: invalid
//! configuration, non-descent directions, and non-finite objective values.
//! Searches that terminate at a bound or with a degenerate bracket are not
//! errors; they are reported through
//! [`SearchStatus`](crate::search::driver::SearchStatus), because the step
//! they carry is still the best one found.

use crate::core::types::Scalar;
use thiserror::Error;

/// Errors that abort a line search.
///
/// Any of these is non-recoverable for the current search; the caller must
/// restart with a fresh direction, initial step, or configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineSearchError {
    /// A configuration value is out of its admissible range.
    #[error("Invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        parameter: String,
        /// Description of the violation
        reason: String,
    },

    /// The initial directional derivative is nonnegative.
    #[error("Search direction is not a descent direction (initial slope {slope:e})")]
    AscentDirection {
        /// The offending directional derivative at step zero
        slope: f64,
    },

    /// The requested trial step lies outside the hard step bounds.
    #[error("Trial step {step:e} lies outside [{lower:e}, {upper:e}]")]
    StepOutOfBounds {
        /// The offending step
        step: f64,
        /// Hard lower bound
        lower: f64,
        /// Hard upper bound
        upper: f64,
    },

    /// The objective produced a non-finite value or slope.
    #[error("Objective returned a non-finite value at step {step:e}: f = {value}, f' = {slope}")]
    NonFiniteValue {
        /// Step at which the evaluation was requested
        step: f64,
        /// Value returned by the objective
        value: f64,
        /// Slope returned by the objective
        slope: f64,
    },

    /// The interval of uncertainty no longer satisfies its preconditions.
    #[error("Inconsistent trial interval: {reason}")]
    InvalidInterval {
        /// Description of the violated precondition
        reason: String,
    },
}

impl LineSearchError {
    /// Create an `InvalidParameter` error.
    pub fn invalid_parameter<S1, S2>(parameter: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an `AscentDirection` error from the initial slope.
    pub fn ascent_direction<T: Scalar>(slope: T) -> Self {
        Self::AscentDirection {
            slope: slope.to_f64(),
        }
    }

    /// Create a `StepOutOfBounds` error.
    pub fn step_out_of_bounds<T: Scalar>(step: T, lower: T, upper: T) -> Self {
        Self::StepOutOfBounds {
            step: step.to_f64(),
            lower: lower.to_f64(),
            upper: upper.to_f64(),
        }
    }

    /// Create a `NonFiniteValue` error.
    pub fn non_finite<T: Scalar>(step: T, value: T, slope: T) -> Self {
        Self::NonFiniteValue {
            step: step.try_to_f64().unwrap_or(f64::NAN),
            value: value.try_to_f64().unwrap_or(f64::NAN),
            slope: slope.try_to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Create an `InvalidInterval` error.
    pub fn invalid_interval<S: Into<String>>(reason: S) -> Self {
        Self::InvalidInterval {
            reason: reason.into(),
        }
    }
}

/// Result type alias for line-search operations.
pub type Result<T> = std::result::Result<T, LineSearchError>;
