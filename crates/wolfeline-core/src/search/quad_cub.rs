//! Backtracking with quadratic and cubic interpolation.
//!
//! A refinement of plain Armijo backtracking: the first contraction
//! minimizes the quadratic interpolant through f(0), f'(0) and the failed
//! trial, and later contractions minimize the cubic interpolant through
//! f(0), f'(0) and the last two trials. Only function values are consumed
//! at the trials; slopes are carried through to the outcome for the
//! caller's benefit.

use crate::core::error::{LineSearchError, Result};
use crate::core::objective::LineFunction;
use crate::core::types::Scalar;
use crate::search::driver::SearchStatus;
use crate::search::params::SearchParams;
use crate::search::strong_wolfe::SearchOutcome;
use log::debug;
use num_traits::Float;

/// Finds a step satisfying the sufficient-decrease condition using
/// quadratic, then cubic, interpolation of the rejected trials.
///
/// An interpolated step too close to the previous trial, too close to
/// zero, or non-finite is replaced by half the previous trial. A step
/// falling below `params.step_min` ends the search with
/// [`SearchStatus::AtStepMin`] and the last evaluated point.
///
/// # Errors
///
/// Returns an error for invalid parameters, a nonnegative initial slope,
/// an initial step outside the hard bounds, non-finite evaluations, or an
/// evaluator failure.
pub fn quad_cub_search<T, F>(
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

    let two = <T as Scalar>::from_f64(2.0);
    let three = <T as Scalar>::from_f64(3.0);
    // Interpolated steps closer than this to the previous trial (or to
    // zero) are judged untrustworthy and replaced by a plain halving.
    let guard = <T as Scalar>::from_f64(100.0) * <T as Float>::sqrt(T::EPSILON);

    let decrease = params.ftol * slope_init;
    let mut step = initial_step;
    let mut previous: Option<(T, T)> = None;
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
                "interpolating backtracking exhausted {} evaluations at step {:e}",
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

        let candidate = match previous {
            None => {
                // Minimizer of the quadratic through f(0), f'(0), f(step).
                -slope_init * step * step
                    / (two * (value - value_init - slope_init * step))
            }
            Some((step_prev, value_prev)) => {
                // Minimizer of the cubic a·t^3 + b·t^2 + f'(0)·t + f(0)
                // through the last two trials.
                let (a0, a1) = (step_prev, step);
                let scale = T::one() / (a0 * a0 * a1 * a1 * (a1 - a0));
                let r1 = value - value_init - slope_init * a1;
                let r0 = value_prev - value_init - slope_init * a0;
                let a = scale * (a0 * a0 * r1 - a1 * a1 * r0);
                let b = scale * (a1 * a1 * a1 * r0 - a0 * a0 * a0 * r1);
                (-b + <T as Float>::sqrt(b * b - three * a * slope_init)) / (three * a)
            }
        };

        let next = if !<T as Float>::is_finite(candidate)
            || <T as Float>::abs(candidate - step) < guard
            || <T as Float>::abs(candidate) < guard
        {
            step / two
        } else {
            candidate
        };

        previous = Some((step, value));

        if next < params.step_min {
            debug!(
                "interpolating backtracking stepped below the floor {:e}",
                params.step_min.to_f64()
            );
            return Ok(SearchOutcome {
                step,
                value,
                slope,
                status: SearchStatus::AtStepMin,
                evaluations,
            });
        }

        step = next;
    }
}
