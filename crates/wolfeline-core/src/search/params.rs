//! Configuration for the line-search algorithms.

use crate::core::error::{LineSearchError, Result};
use crate::core::types::Scalar;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters shared by the search frontends and the step driver.
///
/// The defaults enforce the strong Wolfe conditions with the customary
/// constants: a loose sufficient-decrease test (`ftol = 1e-4`) and a
/// curvature test suited to quasi-Newton directions (`gtol = 0.9`).
/// Newton-like methods that want steps close to the one-dimensional
/// minimizer should tighten `gtol` to 0.1.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams<T>
where
    T: Scalar,
{
    /// Sufficient-decrease constant in the Armijo test
    /// f(t) ≤ f(0) + ftol·t·f'(0).
    pub ftol: T,

    /// Curvature constant in the test |f'(t)| ≤ gtol·|f'(0)|.
    pub gtol: T,

    /// Minimum relative width of the interval of uncertainty; once the
    /// bracket shrinks below `xtol` times its upper endpoint the search
    /// stops with the best step found.
    pub xtol: T,

    /// Hard lower bound on trial steps.
    pub step_min: T,

    /// Hard upper bound on trial steps.
    pub step_max: T,

    /// Maximum number of objective evaluations per search.
    pub max_evaluations: usize,

    /// Contraction factor used by the backtracking frontends, in (0, 1).
    pub contraction: T,
}

impl<T> Default for SearchParams<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            ftol: <T as Scalar>::from_f64(1e-4),
            gtol: <T as Scalar>::from_f64(0.9),
            xtol: T::DEFAULT_STEP_TOLERANCE,
            step_min: T::MIN_STEP,
            step_max: T::MAX_STEP,
            max_evaluations: 20,
            contraction: <T as Scalar>::from_f64(0.5),
        }
    }
}

impl<T> SearchParams<T>
where
    T: Scalar,
{
    /// Creates parameters with the default strong Wolfe constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates parameters suited to Newton-like directions (`gtol = 0.1`).
    pub fn newton() -> Self {
        Self {
            gtol: <T as Scalar>::from_f64(0.1),
            ..Self::default()
        }
    }

    /// Sets the sufficient-decrease constant.
    pub fn with_ftol(mut self, ftol: T) -> Self {
        self.ftol = ftol;
        self
    }

    /// Sets the curvature constant.
    pub fn with_gtol(mut self, gtol: T) -> Self {
        self.gtol = gtol;
        self
    }

    /// Sets the minimum relative bracket width.
    pub fn with_xtol(mut self, xtol: T) -> Self {
        self.xtol = xtol;
        self
    }

    /// Sets the hard step bounds.
    pub fn with_step_bounds(mut self, step_min: T, step_max: T) -> Self {
        self.step_min = step_min;
        self.step_max = step_max;
        self
    }

    /// Sets the evaluation budget.
    pub fn with_max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.max_evaluations = max_evaluations;
        self
    }

    /// Sets the backtracking contraction factor.
    pub fn with_contraction(mut self, contraction: T) -> Self {
        self.contraction = contraction;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative, the step bounds are
    /// negative or reversed, the contraction factor leaves (0, 1), or the
    /// evaluation budget is zero.
    pub fn validate(&self) -> Result<()> {
        if self.ftol < T::zero() {
            return Err(LineSearchError::invalid_parameter(
                "ftol",
                "must be nonnegative",
            ));
        }

        if self.gtol < T::zero() {
            return Err(LineSearchError::invalid_parameter(
                "gtol",
                "must be nonnegative",
            ));
        }

        if self.xtol < T::zero() {
            return Err(LineSearchError::invalid_parameter(
                "xtol",
                "must be nonnegative",
            ));
        }

        if self.step_min < T::zero() {
            return Err(LineSearchError::invalid_parameter(
                "step_min",
                "must be nonnegative",
            ));
        }

        if self.step_max < self.step_min {
            return Err(LineSearchError::invalid_parameter(
                "step_max",
                "must be at least step_min",
            ));
        }

        if self.contraction <= T::zero() || self.contraction >= T::one() {
            return Err(LineSearchError::invalid_parameter(
                "contraction",
                "must lie in (0, 1)",
            ));
        }

        if self.max_evaluations == 0 {
            return Err(LineSearchError::invalid_parameter(
                "max_evaluations",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SearchParams::<f64>::default();
        assert_eq!(params.ftol, 1e-4);
        assert_eq!(params.gtol, 0.9);
        assert_eq!(params.xtol, 1e-16);
        assert_eq!(params.step_min, 1e-20);
        assert_eq!(params.step_max, 1e20);
        assert_eq!(params.max_evaluations, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_newton_preset() {
        let params = SearchParams::<f64>::newton();
        assert_eq!(params.gtol, 0.1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let params = SearchParams::<f64>::new()
            .with_ftol(1e-3)
            .with_gtol(0.5)
            .with_step_bounds(1e-8, 100.0)
            .with_max_evaluations(40);
        assert_eq!(params.ftol, 1e-3);
        assert_eq!(params.gtol, 0.5);
        assert_eq!(params.step_min, 1e-8);
        assert_eq!(params.step_max, 100.0);
        assert_eq!(params.max_evaluations, 40);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(SearchParams::<f64>::new()
            .with_ftol(-1.0)
            .validate()
            .is_err());
        assert!(SearchParams::<f64>::new()
            .with_gtol(-0.1)
            .validate()
            .is_err());
        assert!(SearchParams::<f64>::new()
            .with_xtol(-1e-8)
            .validate()
            .is_err());
        assert!(SearchParams::<f64>::new()
            .with_step_bounds(-1.0, 1.0)
            .validate()
            .is_err());
        assert!(SearchParams::<f64>::new()
            .with_step_bounds(2.0, 1.0)
            .validate()
            .is_err());
        assert!(SearchParams::<f64>::new()
            .with_contraction(1.0)
            .validate()
            .is_err());
        assert!(SearchParams::<f64>::new()
            .with_max_evaluations(0)
            .validate()
            .is_err());
    }
}
