//! Smooth test objectives.
//!
//! Small unconstrained problems with hand-written gradients, used by the
//! integration tests and useful as smoke tests for callers wiring up
//! their own objectives.

use crate::restriction::Objective;
use nalgebra::DVector;
use wolfeline_core::core::error::{LineSearchError, Result};
use wolfeline_core::core::types::Scalar;

/// Convex quadratic f(x) = Σ dᵢ xᵢ² / 2 with positive diagonal d.
#[derive(Debug, Clone)]
pub struct ConvexQuadratic<T>
where
    T: Scalar,
{
    diagonal: DVector<T>,
}

impl<T> ConvexQuadratic<T>
where
    T: Scalar,
{
    /// Creates a quadratic with the given diagonal.
    pub fn new(diagonal: DVector<T>) -> Self {
        Self { diagonal }
    }

    /// Creates the identity quadratic f(x) = ||x||² / 2.
    pub fn simple(dim: usize) -> Self {
        Self {
            diagonal: DVector::from_element(dim, T::one()),
        }
    }
}

impl<T> Objective<T> for ConvexQuadratic<T>
where
    T: Scalar,
{
    fn value_and_gradient(&self, point: &DVector<T>, gradient: &mut DVector<T>) -> Result<T> {
        if point.len() != self.diagonal.len() {
            return Err(LineSearchError::invalid_parameter(
                "point",
                "dimension does not match the quadratic",
            ));
        }

        let half = <T as Scalar>::from_f64(0.5);
        let mut value = T::zero();
        for i in 0..point.len() {
            value += half * self.diagonal[i] * point[i] * point[i];
            gradient[i] = self.diagonal[i] * point[i];
        }
        Ok(value)
    }
}

/// The extended Rosenbrock function
/// f(x) = Σ 100 (xᵢ₊₁ − xᵢ²)² + (1 − xᵢ)².
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock {
    nvar: usize,
}

impl Rosenbrock {
    /// Creates the problem in `nvar` variables (at least 2).
    pub fn new(nvar: usize) -> Self {
        assert!(nvar >= 2, "Rosenbrock needs at least two variables");
        Self { nvar }
    }

    /// Number of variables.
    pub fn nvar(&self) -> usize {
        self.nvar
    }
}

impl<T> Objective<T> for Rosenbrock
where
    T: Scalar,
{
    fn value_and_gradient(&self, point: &DVector<T>, gradient: &mut DVector<T>) -> Result<T> {
        if point.len() != self.nvar {
            return Err(LineSearchError::invalid_parameter(
                "point",
                "dimension does not match the problem",
            ));
        }

        let one = T::one();
        let two = <T as Scalar>::from_f64(2.0);
        let hundred = <T as Scalar>::from_f64(100.0);
        let two_hundred = <T as Scalar>::from_f64(200.0);
        let four_hundred = <T as Scalar>::from_f64(400.0);

        let mut value = T::zero();
        for i in 0..self.nvar - 1 {
            let gap = point[i + 1] - point[i] * point[i];
            let miss = one - point[i];
            value += hundred * gap * gap + miss * miss;
        }

        gradient.fill(T::zero());
        for i in 0..self.nvar - 1 {
            let gap = point[i + 1] - point[i] * point[i];
            gradient[i] += -four_hundred * point[i] * gap - two * (one - point[i]);
            gradient[i + 1] += two_hundred * gap;
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_value_and_gradient() {
        let quadratic = ConvexQuadratic::new(DVector::from_vec(vec![1.0, 2.0]));
        let point = DVector::from_vec(vec![1.0, 1.0]);
        let mut gradient = DVector::zeros(2);

        let value = quadratic.value_and_gradient(&point, &mut gradient).unwrap();

        assert_relative_eq!(value, 1.5);
        assert_relative_eq!(gradient[0], 1.0);
        assert_relative_eq!(gradient[1], 2.0);
    }

    #[test]
    fn test_quadratic_rejects_dimension_mismatch() {
        let quadratic = ConvexQuadratic::<f64>::simple(2);
        let point = DVector::zeros(3);
        let mut gradient = DVector::zeros(3);

        assert!(quadratic.value_and_gradient(&point, &mut gradient).is_err());
    }

    #[test]
    fn test_rosenbrock_minimum_at_ones() {
        let problem = Rosenbrock::new(3);
        let point = DVector::from_element(3, 1.0);
        let mut gradient = DVector::zeros(3);

        let value = problem.value_and_gradient(&point, &mut gradient).unwrap();

        assert_relative_eq!(value, 0.0);
        for i in 0..3 {
            assert_relative_eq!(gradient[i], 0.0);
        }
    }

    #[test]
    fn test_rosenbrock_gradient_matches_finite_differences() {
        let problem = Rosenbrock::new(4);
        let point = DVector::from_vec(vec![-0.5, 0.3, 0.7, -1.2]);
        let mut gradient = DVector::zeros(4);
        let value = problem.value_and_gradient(&point, &mut gradient).unwrap();

        let h = 1e-7;
        for i in 0..4 {
            let mut shifted = point.clone();
            shifted[i] += h;
            let mut scratch = DVector::zeros(4);
            let forward = problem.value_and_gradient(&shifted, &mut scratch).unwrap();
            let estimate = (forward - value) / h;
            assert_relative_eq!(gradient[i], estimate, epsilon = 1e-4, max_relative = 1e-4);
        }
    }
}
