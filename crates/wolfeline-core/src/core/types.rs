//! Type definitions and numeric traits for step-length computations.
//!
//! This module provides the scalar abstraction used throughout the library
//! together with the per-precision constants that parameterize the default
//! search configuration.

use nalgebra::{RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in step-length selection (f32 or f64).
///
/// This trait combines the numeric traits the search algorithms rely on:
/// total ordering, transcendental functions, and conversions for constants
/// that are written down in f64.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default minimum relative width of a step bracket.
    const DEFAULT_STEP_TOLERANCE: Self;

    /// Default hard lower bound on trial steps.
    const MIN_STEP: Self;

    /// Default hard upper bound on trial steps.
    const MAX_STEP: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a
    /// non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for diagnostics and error reporting).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a
    /// non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_STEP_TOLERANCE: Self = 1e-7;
    const MIN_STEP: Self = 1e-12;
    const MAX_STEP: Self = 1e12;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_STEP_TOLERANCE: Self = 1e-16;
    const MIN_STEP: Self = 1e-20;
    const MAX_STEP: Self = 1e20;
}
