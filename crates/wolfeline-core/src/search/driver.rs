//! Reverse-communication driver for the strong Wolfe conditions.
//!
//! The driver owns no objective: it proposes trial steps and the caller
//! supplies function values and directional derivatives, calling
//! [`SearchState::advance`] once per evaluation until a terminal status is
//! returned. This keeps evaluation scheduling entirely in the caller's
//! hands and makes independent searches on disjoint states trivially
//! parallel.
//!
//! The algorithm follows Moré & Thuente (1994): an interval of uncertainty
//! refined by safeguarded interpolation, a forced bisection when the
//! interval stops shrinking, and a two-stage scheme that interpolates the
//! auxiliary function ψ(t) = f(t) − f(0) − ftol·t·f'(0) until a step with
//! nonpositive ψ and nonnegative slope has been seen. The second stage
//! switches to f itself; the staging is what carries the convergence
//! guarantee and must not be simplified away.

use crate::core::error::{LineSearchError, Result};
use crate::core::types::Scalar;
use crate::search::interpolate::{Endpoint, TrialInterval};
use crate::search::params::SearchParams;
use log::{debug, trace};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extrapolation factors for the dynamic step bounds while the minimizer
/// is not yet bracketed.
const EXTRAPOLATION_LOWER: f64 = 1.1;
const EXTRAPOLATION_UPPER: f64 = 4.0;

/// Outcome of one reverse-communication exchange.
///
/// `NeedEvaluation` is the only non-terminal status: the caller must
/// evaluate the objective at the returned step and call
/// [`SearchState::advance`] again. Every other status ends the search;
/// the warnings still carry the best step found, so callers routinely
/// accept the step on any warning except `RoundingStalled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStatus {
    /// The objective must be evaluated at the returned trial step.
    NeedEvaluation,
    /// Both the sufficient-decrease and curvature conditions hold.
    Converged,
    /// Rounding errors prevent further progress; the bracket has collapsed
    /// onto its best endpoint.
    RoundingStalled,
    /// The bracket width fell below `xtol` times its upper endpoint.
    IntervalTooSmall,
    /// The step reached the upper bound with sufficient decrease but
    /// without satisfying the curvature condition.
    AtStepMax,
    /// The step reached the lower bound without satisfying both
    /// conditions.
    AtStepMin,
    /// The evaluation budget was exhausted; reported by the frontends.
    BudgetExhausted,
}

impl SearchStatus {
    /// Whether this status ends the search.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchStatus::NeedEvaluation)
    }

    /// Whether this status is a warning: terminal, but with a usable step.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            SearchStatus::RoundingStalled
                | SearchStatus::IntervalTooSmall
                | SearchStatus::AtStepMax
                | SearchStatus::AtStepMin
                | SearchStatus::BudgetExhausted
        )
    }
}

/// Which function the interpolation currently sees.
///
/// The stage is monotone: once the search switches to the objective it
/// never returns to the auxiliary function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Stage {
    /// Interpolating ψ(t) = f(t) − f(0) − ftol·t·f'(0).
    Auxiliary,
    /// Interpolating the objective itself.
    Objective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Start,
    Evaluating,
    Finished(SearchStatus),
}

/// Persistent state of one line search across reverse-communication calls.
///
/// A state is created per search, threaded through `advance`, and
/// discarded once a terminal status (or an error) is returned. It must not
/// be shared between concurrent searches.
#[derive(Debug, Clone)]
pub struct SearchState<T>
where
    T: Scalar,
{
    task: Task,
    stage: Stage,
    interval: TrialInterval<T>,
    /// f(0) and f'(0), cached at the first call.
    value_init: T,
    slope_init: T,
    /// ftol · f'(0), the Armijo slope.
    slope_test: T,
    /// Most recently proposed trial step.
    step: T,
    /// Dynamic bounds on the next trial step.
    step_lo: T,
    step_hi: T,
    /// Current and previous bracket widths, for the forced bisection.
    width: T,
    width_old: T,
}

impl<T> Default for SearchState<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchState<T>
where
    T: Scalar,
{
    /// Creates a fresh, uninitialized search state.
    pub fn new() -> Self {
        Self {
            task: Task::Start,
            stage: Stage::Auxiliary,
            interval: TrialInterval::new(Endpoint::new(T::zero(), T::zero(), T::zero())),
            value_init: T::zero(),
            slope_init: T::zero(),
            slope_test: T::zero(),
            step: T::zero(),
            step_lo: T::zero(),
            step_hi: T::zero(),
            width: T::zero(),
            width_old: T::zero(),
        }
    }

    /// Whether the minimizer is bracketed.
    pub fn bracketed(&self) -> bool {
        self.interval.bracketed
    }

    /// The endpoint with the lowest function value seen so far.
    pub fn best_endpoint(&self) -> Endpoint<T> {
        self.interval.best
    }

    /// The other endpoint of the interval of uncertainty.
    pub fn second_endpoint(&self) -> Endpoint<T> {
        self.interval.second
    }

    /// Which function the interpolation currently sees.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Advances the search with the evaluation `(value, slope)` at `step`.
    ///
    /// On the first call `step` is the caller's initial trial and
    /// `(value, slope)` are f(0) and f'(0); the call validates the inputs
    /// and echoes the trial back with
    /// [`SearchStatus::NeedEvaluation`]. On subsequent calls `step` must be
    /// the step returned by the previous call and `(value, slope)` its
    /// evaluation. Once a terminal status has been returned, further calls
    /// return the same step and status.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid configuration, a nonnegative initial
    /// slope, an initial step outside the hard bounds, or non-finite
    /// evaluations. Errors abort the search; the state must be discarded.
    pub fn advance(
        &mut self,
        step: T,
        value: T,
        slope: T,
        params: &SearchParams<T>,
    ) -> Result<(T, SearchStatus)> {
        if !<T as Float>::is_finite(step)
            || !<T as Float>::is_finite(value)
            || !<T as Float>::is_finite(slope)
        {
            return Err(LineSearchError::non_finite(step, value, slope));
        }

        match self.task {
            Task::Start => self.start(step, value, slope, params),
            Task::Evaluating => self.resume(step, value, slope, params),
            Task::Finished(status) => Ok((self.step, status)),
        }
    }

    fn start(
        &mut self,
        step: T,
        value: T,
        slope: T,
        params: &SearchParams<T>,
    ) -> Result<(T, SearchStatus)> {
        params.validate()?;

        if step < params.step_min || step > params.step_max {
            return Err(LineSearchError::step_out_of_bounds(
                step,
                params.step_min,
                params.step_max,
            ));
        }
        if slope >= T::zero() {
            return Err(LineSearchError::ascent_direction(slope));
        }

        let four = <T as Scalar>::from_f64(EXTRAPOLATION_UPPER);
        let two = <T as Scalar>::from_f64(2.0);

        self.stage = Stage::Auxiliary;
        self.value_init = value;
        self.slope_init = slope;
        self.slope_test = params.ftol * slope;
        self.interval = TrialInterval::new(Endpoint::new(T::zero(), value, slope));
        self.step = step;
        self.step_lo = T::zero();
        self.step_hi = step + four * step;
        self.width = params.step_max - params.step_min;
        self.width_old = two * self.width;
        self.task = Task::Evaluating;

        trace!(
            "line search start: step {:e}, f(0) {:e}, f'(0) {:e}",
            step.to_f64(),
            value.to_f64(),
            slope.to_f64()
        );

        Ok((step, SearchStatus::NeedEvaluation))
    }

    fn resume(
        &mut self,
        step: T,
        value: T,
        slope: T,
        params: &SearchParams<T>,
    ) -> Result<(T, SearchStatus)> {
        let value_test = self.value_init + step * self.slope_test;

        // Enter the second stage once a step with nonpositive ψ and
        // nonnegative slope has been seen.
        if self.stage == Stage::Auxiliary && value <= value_test && slope >= T::zero() {
            self.stage = Stage::Objective;
        }

        // Termination tests. The warnings are checked in sequence so a
        // later, more specific diagnosis replaces an earlier one, and
        // convergence overrides them all.
        let mut status = SearchStatus::NeedEvaluation;
        if self.interval.bracketed && (step <= self.step_lo || step >= self.step_hi) {
            status = SearchStatus::RoundingStalled;
        }
        if self.interval.bracketed && self.step_hi - self.step_lo <= params.xtol * self.step_hi {
            status = SearchStatus::IntervalTooSmall;
        }
        if step == params.step_max && value <= value_test && slope <= self.slope_test {
            status = SearchStatus::AtStepMax;
        }
        if step == params.step_min && (value > value_test || slope >= self.slope_test) {
            status = SearchStatus::AtStepMin;
        }
        if value <= value_test && <T as Float>::abs(slope) <= params.gtol * (-self.slope_init) {
            status = SearchStatus::Converged;
        }

        if status.is_terminal() {
            self.step = step;
            self.task = Task::Finished(status);
            debug!(
                "line search finished: {:?} at step {:e}, f {:e}, f' {:e}",
                status,
                step.to_f64(),
                value.to_f64(),
                slope.to_f64()
            );
            return Ok((step, status));
        }

        // Refine the interval of uncertainty. During the first stage, while
        // the trial keeps the lowest value but fails the decrease test,
        // interpolation sees the auxiliary function instead of f; the shift
        // is undone right after.
        let trial = Endpoint::new(step, value, slope);
        let mut next = if self.stage == Stage::Auxiliary
            && value <= self.interval.best.value
            && value > value_test
        {
            let gtest = self.slope_test;
            let shift =
                |e: Endpoint<T>| Endpoint::new(e.step, e.value - e.step * gtest, e.slope - gtest);
            let unshift =
                |e: Endpoint<T>| Endpoint::new(e.step, e.value + e.step * gtest, e.slope + gtest);
            self.interval.best = shift(self.interval.best);
            self.interval.second = shift(self.interval.second);
            let refined = self
                .interval
                .refine(shift(trial), self.step_lo, self.step_hi);
            self.interval.best = unshift(self.interval.best);
            self.interval.second = unshift(self.interval.second);
            refined?
        } else {
            self.interval.refine(trial, self.step_lo, self.step_hi)?
        };

        let half = <T as Scalar>::from_f64(0.5);
        let p66 = <T as Scalar>::from_f64(0.66);

        // Force a bisection when the bracket is no longer shrinking fast
        // enough.
        if self.interval.bracketed {
            let stx = self.interval.best.step;
            let sty = self.interval.second.step;
            if <T as Float>::abs(sty - stx) >= p66 * self.width_old {
                next = stx + half * (sty - stx);
            }
            self.width_old = self.width;
            self.width = <T as Float>::abs(sty - stx);
        }

        // Update the bounds on the next trial step.
        if self.interval.bracketed {
            let stx = self.interval.best.step;
            let sty = self.interval.second.step;
            self.step_lo = <T as Float>::min(stx, sty);
            self.step_hi = <T as Float>::max(stx, sty);
        } else {
            let xtrapl = <T as Scalar>::from_f64(EXTRAPOLATION_LOWER);
            let xtrapu = <T as Scalar>::from_f64(EXTRAPOLATION_UPPER);
            let stx = self.interval.best.step;
            self.step_lo = next + xtrapl * (next - stx);
            self.step_hi = next + xtrapu * (next - stx);
        }

        // Clamp to the hard bounds, and fall back to the best step when the
        // bracket can no longer contain a useful trial.
        next = <T as Float>::max(next, params.step_min);
        next = <T as Float>::min(next, params.step_max);
        if self.interval.bracketed
            && (next <= self.step_lo
                || next >= self.step_hi
                || self.step_hi - self.step_lo <= params.xtol * self.step_hi)
        {
            next = self.interval.best.step;
        }

        self.step = next;
        trace!(
            "line search trial: step {:e}, bracketed {}, stage {:?}",
            next.to_f64(),
            self.interval.bracketed,
            self.stage
        );

        Ok((next, SearchStatus::NeedEvaluation))
    }
}
