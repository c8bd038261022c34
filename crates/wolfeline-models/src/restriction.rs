//! Restriction of a multivariate objective to a search ray.
//!
//! Line searches consume scalar functions of the step length; callers hold
//! full objectives over vectors. [`DirectionalRestriction`] bridges the
//! two: it evaluates the objective at x + t·d and projects the gradient
//! onto the direction to produce the slope the searches test.

use nalgebra::DVector;
use wolfeline_core::core::error::Result;
use wolfeline_core::core::objective::LineFunction;
use wolfeline_core::core::types::Scalar;

/// A differentiable objective over real vectors.
pub trait Objective<T>
where
    T: Scalar,
{
    /// Evaluates the objective at `point`, writing the gradient into
    /// `gradient`, and returns the value.
    fn value_and_gradient(&self, point: &DVector<T>, gradient: &mut DVector<T>) -> Result<T>;
}

/// The one-dimensional restriction ϕ(t) = f(x + t·d) of an objective.
///
/// Evaluation reuses internal buffers, so repeated trials allocate
/// nothing. The restriction borrows the objective and owns copies of the
/// origin and direction for the lifetime of one search.
#[derive(Debug)]
pub struct DirectionalRestriction<'a, T, F>
where
    T: Scalar,
    F: Objective<T>,
{
    objective: &'a F,
    origin: DVector<T>,
    direction: DVector<T>,
    point: DVector<T>,
    gradient: DVector<T>,
}

impl<'a, T, F> DirectionalRestriction<'a, T, F>
where
    T: Scalar,
    F: Objective<T>,
{
    /// Creates the restriction of `objective` to the ray through `origin`
    /// along `direction`.
    pub fn new(objective: &'a F, origin: DVector<T>, direction: DVector<T>) -> Self {
        let dim = origin.len();
        Self {
            objective,
            origin,
            direction,
            point: DVector::zeros(dim),
            gradient: DVector::zeros(dim),
        }
    }

    /// Evaluates the restriction at the origin, returning ϕ(0) and ϕ'(0).
    ///
    /// Searches require the returned slope to be negative; callers use
    /// this to validate a direction before starting.
    pub fn at_origin(&mut self) -> Result<(T, T)> {
        self.evaluate(T::zero())
    }

    /// The point x + t·d from the most recent evaluation.
    pub fn last_point(&self) -> &DVector<T> {
        &self.point
    }
}

impl<'a, T, F> LineFunction<T> for DirectionalRestriction<'a, T, F>
where
    T: Scalar,
    F: Objective<T>,
{
    fn evaluate(&mut self, step: T) -> Result<(T, T)> {
        self.point.copy_from(&self.origin);
        self.point.axpy(step, &self.direction, T::one());

        let value = self
            .objective
            .value_and_gradient(&self.point, &mut self.gradient)?;
        let slope = self.gradient.dot(&self.direction);

        Ok((value, slope))
    }
}
