//! Armijo backtracking line search.
//!
//! The simplest frontend: contract the step geometrically until the
//! sufficient-decrease condition holds. It never consults the curvature
//! condition and shares nothing with the interpolating driver; steepest
//! descent methods and globalization schemes that only need a decrease
//! guarantee use it directly.

use crate::core::error::{LineSearchError, Result};
use crate::core::objective::LineFunction;
use crate::core::types::Scalar;
use crate::search::driver::SearchStatus;
use crate::search::params::SearchParams;
use crate::search::strong_wolfe::SearchOutcome;
use log::debug;
use num_traits::Float;

/// Finds a step satisfying the sufficient-decrease condition by
/// backtracking.
///
/// Starting from `initial_step`, the step is multiplied by
/// `params.contraction` until f(t) ≤ f(0) + ftol·t·f'(0) holds, the step
/// reaches `params.step_min`, or the evaluation budget runs out.
///
/// # Errors
///
/// Returns an error for invalid parameters, a nonnegative initial slope,
/// an initial step outside the hard bounds, non-finite evaluations, or an
/// evaluator failure.
pub fn armijo_search<T, F>(
    value_init: T,
    slope_init: T,
    mut objective: F,
    initial_step: T,
    params: &SearchParams<T>,
) -> Result<SearchOutcome<T>>
where
    T: Scalar,
    F: LineFunction<T>,
{
    params.validate()?;

    if slope_init >= T::zero() {
        return Err(LineSearchError::ascent_direction(slope_init));
    }
    if initial_step < params.step_min || initial_step > params.step_max {
        return Err(LineSearchError::step_out_of_bounds(
            initial_step,
            params.step_min,
            params.step_max,
        ));
    }

    let decrease = params.ftol * slope_init;
    let mut step = initial_step;
    let mut evaluations = 0;

    loop {
        let (value, slope) = objective.evaluate(step)?;
        evaluations += 1;

        if !<T as Float>::is_finite(value) || !<T as Float>::is_finite(slope) {
            return Err(LineSearchError::non_finite(step, value, slope));
        }

        if value <= value_init + step * decrease {
            return Ok(SearchOutcome {
                step,
                value,
                slope,
                status: SearchStatus::Converged,
                evaluations,
            });
        }

        if evaluations >= params.max_evaluations {
            debug!(
                "backtracking exhausted {} evaluations at step {:e}",
                evaluations,
                step.to_f64()
            );
            return Ok(SearchOutcome {
                step,
                value,
                slope,
                status: SearchStatus::BudgetExhausted,
                evaluations,
            });
        }

        if step <= params.step_min {
            debug!("backtracking hit the step floor {:e}", step.to_f64());
            return Ok(SearchOutcome {
                step,
                value,
                slope,
                status: SearchStatus::AtStepMin,
                evaluations,
            });
        }

        step = <T as Float>::max(params.contraction * step, params.step_min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_step_accepted_on_quadratic() {
        let phi = |t: f64| -> Result<(f64, f64)> {
            Ok(((1.0 - t) * (1.0 - t) / 2.0, t - 1.0))
        };
        let params = SearchParams::default();

        let outcome = armijo_search(0.5, -1.0, phi, 1.0, &params).unwrap();

        assert!(outcome.converged());
        assert_relative_eq!(outcome.step, 1.0);
        assert_eq!(outcome.evaluations, 1);
    }

    #[test]
    fn test_halves_until_decrease() {
        // f(t) = t^2 - 0.2 t is nonnegative for t >= 0.2, so the decrease
        // test keeps failing until the step contracts to 0.125.
        let phi = |t: f64| -> Result<(f64, f64)> { Ok((t * t - 0.2 * t, 2.0 * t - 0.2)) };
        let params = SearchParams::default();

        let outcome = armijo_search(0.0, -0.2, phi, 1.0, &params).unwrap();

        assert!(outcome.converged());
        assert_relative_eq!(outcome.step, 0.125);
        assert_eq!(outcome.evaluations, 4);
    }

    #[test]
    fn test_floor_is_reported() {
        // f increases for every positive step no matter how small the
        // decrease margin, so the contraction runs into the floor.
        let phi = |t: f64| -> Result<(f64, f64)> { Ok((t, 1.0)) };
        let params = SearchParams::<f64>::new()
            .with_step_bounds(1e-3, 1e20)
            .with_max_evaluations(100);

        let outcome = armijo_search(0.0, -1.0, phi, 1.0, &params).unwrap();

        assert_eq!(outcome.status, SearchStatus::AtStepMin);
        assert_relative_eq!(outcome.step, 1e-3);
    }

    #[test]
    fn test_budget_is_reported() {
        let phi = |t: f64| -> Result<(f64, f64)> { Ok((t, 1.0)) };
        let params = SearchParams::<f64>::new().with_max_evaluations(4);

        let outcome = armijo_search(0.0, -1.0, phi, 1.0, &params).unwrap();

        assert_eq!(outcome.status, SearchStatus::BudgetExhausted);
        assert_eq!(outcome.evaluations, 4);
    }

    #[test]
    fn test_rejects_ascent_direction() {
        let phi = |t: f64| -> Result<(f64, f64)> { Ok((t, 1.0)) };
        let params = SearchParams::default();

        let err = armijo_search(0.0, 0.1, phi, 1.0, &params).unwrap_err();
        assert!(matches!(err, LineSearchError::AscentDirection { .. }));
    }
}
