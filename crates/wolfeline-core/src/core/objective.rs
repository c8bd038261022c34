//! Evaluator contract for one-dimensional restrictions of an objective.
//!
//! The search algorithms never evaluate an objective themselves; they consume
//! an implementor of [`LineFunction`] that reports, for a trial step `t`, the
//! restricted value f(x + t·d) and the directional derivative
//! ∇f(x + t·d)·d along the fixed search direction d. Implementations
//! typically project a full gradient onto the direction; the search is
//! agnostic to how the pair is produced.

use crate::core::error::Result;
use crate::core::types::Scalar;

/// A differentiable function of a single step length.
///
/// `evaluate` must produce finite values for every requested step; the
/// driver rejects `NaN` and infinities as input errors and aborts the
/// search.
pub trait LineFunction<T: Scalar> {
    /// Evaluates the restriction at `step`.
    ///
    /// Returns the pair `(value, slope)` where `slope` is the directional
    /// derivative along the search direction, not a full gradient.
    fn evaluate(&mut self, step: T) -> Result<(T, T)>;
}

impl<T, F> LineFunction<T> for F
where
    T: Scalar,
    F: FnMut(T) -> Result<(T, T)>,
{
    fn evaluate(&mut self, step: T) -> Result<(T, T)> {
        self(step)
    }
}

/// Wrapper that counts evaluations of an inner [`LineFunction`].
///
/// The search frontends report their own evaluation counts; this wrapper is
/// for callers instrumenting evaluators that are reused across searches.
#[derive(Debug, Clone)]
pub struct CountingLineFunction<F> {
    /// The wrapped evaluator
    pub inner: F,
    evaluations: usize,
}

impl<F> CountingLineFunction<F> {
    /// Creates a counting wrapper around an evaluator.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            evaluations: 0,
        }
    }

    /// Returns the number of evaluations performed so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Resets the evaluation counter to zero.
    pub fn reset(&mut self) {
        self.evaluations = 0;
    }

    /// Consumes the wrapper, returning the inner evaluator.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<T, F> LineFunction<T> for CountingLineFunction<F>
where
    T: Scalar,
    F: LineFunction<T>,
{
    fn evaluate(&mut self, step: T) -> Result<(T, T)> {
        self.evaluations += 1;
        self.inner.evaluate(step)
    }
}
