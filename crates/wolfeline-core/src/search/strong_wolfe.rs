//! Strong Wolfe line search frontend.
//!
//! This module wraps the reverse-communication driver into a loop that
//! invokes a caller-supplied evaluator until the search terminates, and
//! enforces the evaluation budget (the driver itself does not count
//! evaluations).

use crate::core::error::Result;
use crate::core::objective::LineFunction;
use crate::core::types::Scalar;
use crate::search::driver::{SearchState, SearchStatus};
use crate::search::params::SearchParams;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final result of a line search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchOutcome<T>
where
    T: Scalar,
{
    /// The accepted step length
    pub step: T,

    /// Function value at `step`
    pub value: T,

    /// Directional derivative at `step`
    pub slope: T,

    /// Why the search stopped
    pub status: SearchStatus,

    /// Number of objective evaluations performed
    pub evaluations: usize,
}

impl<T> SearchOutcome<T>
where
    T: Scalar,
{
    /// Whether both strong Wolfe conditions hold at the returned step.
    pub fn converged(&self) -> bool {
        self.status == SearchStatus::Converged
    }
}

/// Finds a step satisfying the strong Wolfe conditions.
///
/// `value_init` and `slope_init` are f(0) and f'(0) at the search origin;
/// `slope_init` must be negative. The evaluator is called once per trial
/// step, up to `params.max_evaluations` times.
///
/// The returned outcome carries the last evaluated step together with the
/// status; every warning status still denotes a usable step (the best one
/// found), while [`SearchStatus::Converged`] is the only full success.
///
/// # Errors
///
/// Returns an error for invalid parameters, a nonnegative initial slope,
/// an initial step outside the hard bounds, non-finite evaluations, or an
/// evaluator failure.
pub fn strong_wolfe_search<T, F>(
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
    let mut state = SearchState::new();
    let (mut step, mut status) = state.advance(initial_step, value_init, slope_init, params)?;

    let mut value = value_init;
    let mut slope = slope_init;
    let mut evaluations = 0;

    while status == SearchStatus::NeedEvaluation {
        let (v, s) = objective.evaluate(step)?;
        evaluations += 1;

        let (next, next_status) = state.advance(step, v, s, params)?;
        value = v;
        slope = s;
        status = next_status;

        if status == SearchStatus::NeedEvaluation {
            if evaluations >= params.max_evaluations {
                status = SearchStatus::BudgetExhausted;
                debug!(
                    "line search exhausted {} evaluations at step {:e}",
                    evaluations,
                    step.to_f64()
                );
                break;
            }
            step = next;
        }
    }

    Ok(SearchOutcome {
        step,
        value,
        slope,
        status,
        evaluations,
    })
}
