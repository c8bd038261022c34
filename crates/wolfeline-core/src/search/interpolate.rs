//! Safeguarded cubic/quadratic interpolation over an interval of uncertainty.
//!
//! This module computes a single trial step from the two endpoints of an
//! interval of uncertainty and the most recent trial evaluation, and updates
//! the interval so that it keeps containing a minimizer. The case analysis
//! and safeguards follow Moré & Thuente, "Line search algorithms with
//! guaranteed sufficient decrease", ACM TOMS 20 (1994), §4.
//!
//! The interval is described by its *best* endpoint (the one with the lowest
//! function value, whose slope points toward the interior) and a second
//! endpoint; while the minimizer is not yet bracketed the second endpoint
//! merely records the previous best.

use crate::core::error::{LineSearchError, Result};
use crate::core::types::Scalar;
use num_traits::Float;

/// A step together with its function value and directional derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoint<T>
where
    T: Scalar,
{
    /// Step length
    pub step: T,
    /// Function value at `step`
    pub value: T,
    /// Directional derivative at `step`
    pub slope: T,
}

impl<T> Endpoint<T>
where
    T: Scalar,
{
    /// Creates an endpoint from a step and its evaluation.
    pub fn new(step: T, value: T, slope: T) -> Self {
        Self { step, value, slope }
    }
}

/// Interval of uncertainty maintained during a search.
///
/// Invariants while `bracketed` holds: the minimizer lies between the two
/// endpoints, `best.value <= second.value`, and `best.slope` has sign
/// opposite to `second.step - best.step`.
#[derive(Debug, Clone, Copy)]
pub struct TrialInterval<T>
where
    T: Scalar,
{
    /// Endpoint with the lowest function value seen so far
    pub best: Endpoint<T>,
    /// Other endpoint; the previous best while not bracketed
    pub second: Endpoint<T>,
    /// Whether the interval is known to contain a minimizer
    pub bracketed: bool,
}

impl<T> TrialInterval<T>
where
    T: Scalar,
{
    /// Creates a degenerate interval anchored at the search origin.
    pub fn new(origin: Endpoint<T>) -> Self {
        Self {
            best: origin,
            second: origin,
            bracketed: false,
        }
    }

    /// Width of the interval between the two endpoints.
    pub fn width(&self) -> T {
        <T as Float>::abs(self.second.step - self.best.step)
    }

    /// Computes a safeguarded trial step from `trial` and updates the
    /// interval so that it continues to contain a minimizer.
    ///
    /// `lower` and `upper` bound the returned step; while the minimizer is
    /// not bracketed they control how far the step may extrapolate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInterval`, leaving the interval untouched, if the
    /// trial step lies outside a bracketing interval, if the slope at the
    /// best endpoint does not point toward the trial step, or if the bounds
    /// are reversed.
    pub fn refine(&mut self, trial: Endpoint<T>, lower: T, upper: T) -> Result<T> {
        let (stx, fx, dx) = (self.best.step, self.best.value, self.best.slope);
        let (sty, fy, dy) = (self.second.step, self.second.value, self.second.slope);
        let (stp, fp, dp) = (trial.step, trial.value, trial.slope);

        if self.bracketed {
            let lo = <T as Float>::min(stx, sty);
            let hi = <T as Float>::max(stx, sty);
            if stp <= lo || stp >= hi {
                return Err(LineSearchError::invalid_interval(
                    "trial step lies outside the bracketing interval",
                ));
            }
        }
        if dx * (stp - stx) >= T::zero() {
            return Err(LineSearchError::invalid_interval(
                "slope at the best endpoint does not point toward the trial step",
            ));
        }
        if upper < lower {
            return Err(LineSearchError::invalid_interval(
                "step bounds are reversed",
            ));
        }

        let two = <T as Scalar>::from_f64(2.0);
        let three = <T as Scalar>::from_f64(3.0);
        let p66 = <T as Scalar>::from_f64(0.66);

        let sgnd = dp * <T as Float>::signum(dx);

        let next = if fp > fx {
            // The trial value is higher: a minimizer is bracketed between
            // the best endpoint and the trial. Take the cubic step if it is
            // closer to the best endpoint, else the average of the cubic
            // and quadratic steps.
            let theta = three * (fx - fp) / (stp - stx) + dx + dp;
            let s = max3(<T as Float>::abs(theta), <T as Float>::abs(dx), <T as Float>::abs(dp));
            let mut gamma =
                s * <T as Float>::sqrt((theta / s) * (theta / s) - (dx / s) * (dp / s));
            if stp < stx {
                gamma = -gamma;
            }
            let p = (gamma - dx) + theta;
            let q = ((gamma - dx) + gamma) + dp;
            let r = p / q;
            let stpc = stx + r * (stp - stx);
            let stpq = stx + ((dx / ((fx - fp) / (stp - stx) + dx)) / two) * (stp - stx);

            self.bracketed = true;
            if <T as Float>::abs(stpc - stx) < <T as Float>::abs(stpq - stx) {
                stpc
            } else {
                stpc + (stpq - stpc) / two
            }
        } else if sgnd < T::zero() {
            // Lower value, derivatives of opposite sign: a minimizer is
            // bracketed. Take the cubic step if it is farther from the
            // trial, else the secant step.
            let theta = three * (fx - fp) / (stp - stx) + dx + dp;
            let s = max3(<T as Float>::abs(theta), <T as Float>::abs(dx), <T as Float>::abs(dp));
            let mut gamma =
                s * <T as Float>::sqrt((theta / s) * (theta / s) - (dx / s) * (dp / s));
            if stp > stx {
                gamma = -gamma;
            }
            let p = (gamma - dp) + theta;
            let q = ((gamma - dp) + gamma) + dx;
            let r = p / q;
            let stpc = stp + r * (stx - stp);
            let stpq = stp + (dp / (dp - dx)) * (stx - stp);

            self.bracketed = true;
            if <T as Float>::abs(stpc - stp) > <T as Float>::abs(stpq - stp) {
                stpc
            } else {
                stpq
            }
        } else if <T as Float>::abs(dp) < <T as Float>::abs(dx) {
            // Lower value, same-sign derivatives, the magnitude decreasing:
            // the cubic may not have a minimizer in the search direction,
            // so the discriminant is clamped at zero and the step falls
            // back to the far bound when the cubic tends to a finite value.
            let theta = three * (fx - fp) / (stp - stx) + dx + dp;
            let s = max3(<T as Float>::abs(theta), <T as Float>::abs(dx), <T as Float>::abs(dp));
            let disc = (theta / s) * (theta / s) - (dx / s) * (dp / s);
            let mut gamma = s * <T as Float>::sqrt(<T as Float>::max(T::zero(), disc));
            if stp > stx {
                gamma = -gamma;
            }
            let p = (gamma - dp) + theta;
            let q = (gamma + (dx - dp)) + gamma;
            let r = p / q;
            let stpc = if r < T::zero() && gamma != T::zero() {
                stp + r * (stx - stp)
            } else if stp > stx {
                upper
            } else {
                lower
            };
            let stpq = stp + (dp / (dp - dx)) * (stx - stp);

            if self.bracketed {
                // A minimizer is bracketed: prefer the step closer to the
                // trial, and do not move more than 66% of the way toward
                // the second endpoint.
                let candidate = if <T as Float>::abs(stpc - stp) < <T as Float>::abs(stpq - stp) {
                    stpc
                } else {
                    stpq
                };
                let cap = stp + p66 * (sty - stp);
                if stp > stx {
                    <T as Float>::min(cap, candidate)
                } else {
                    <T as Float>::max(cap, candidate)
                }
            } else {
                // Not bracketed: prefer the step farther from the trial,
                // limited by the extrapolation bounds.
                let candidate = if <T as Float>::abs(stpc - stp) > <T as Float>::abs(stpq - stp) {
                    stpc
                } else {
                    stpq
                };
                <T as Float>::min(upper, <T as Float>::max(lower, candidate))
            }
        } else {
            // Lower value, same-sign derivatives, the magnitude not
            // decreasing: interpolate with the second endpoint when
            // bracketed, otherwise extrapolate to the far bound.
            if self.bracketed {
                let theta = three * (fp - fy) / (sty - stp) + dy + dp;
                let s =
                    max3(<T as Float>::abs(theta), <T as Float>::abs(dy), <T as Float>::abs(dp));
                let mut gamma =
                    s * <T as Float>::sqrt((theta / s) * (theta / s) - (dy / s) * (dp / s));
                if stp > sty {
                    gamma = -gamma;
                }
                let p = (gamma - dp) + theta;
                let q = ((gamma - dp) + gamma) + dy;
                let r = p / q;
                stp + r * (sty - stp)
            } else if stp > stx {
                upper
            } else {
                lower
            }
        };

        // Update the interval of uncertainty. This does not depend on the
        // step selection above.
        if fp > fx {
            self.second = trial;
        } else {
            if sgnd < T::zero() {
                self.second = self.best;
            }
            self.best = trial;
        }

        Ok(next)
    }
}

fn max3<T: Scalar>(a: T, b: T, c: T) -> T {
    <T as Float>::max(a, <T as Float>::max(b, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn origin(value: f64, slope: f64) -> Endpoint<f64> {
        Endpoint::new(0.0, value, slope)
    }

    #[test]
    fn test_higher_value_brackets() {
        // Trial value above the best value: the minimizer gets bracketed
        // between the endpoints and the next step is interior.
        let mut interval = TrialInterval::new(origin(0.0, -1.0));
        let trial = Endpoint::new(1.0, 1.0, 1.0);

        let next = interval.refine(trial, 0.0, 5.0).unwrap();

        assert!(interval.bracketed);
        assert_eq!(interval.second, trial);
        assert_eq!(interval.best.step, 0.0);
        assert!(next > 0.0 && next < 1.0);
        // The quadratic step through (f(0), f'(0), f(1)) is 0.25 and the
        // cubic step is closer to the origin, so the cubic is taken.
        assert!(next <= 0.25);
    }

    #[test]
    fn test_opposite_slopes_take_secant_exactly() {
        // f(t) = (t - 2)^2 sampled at 1 and 3: equal values, opposite
        // slopes. Both interpolants hit the minimizer at 2 exactly.
        let mut interval = TrialInterval::new(Endpoint::new(1.0, 1.0, -2.0));
        let trial = Endpoint::new(3.0, 1.0, 2.0);

        let next = interval.refine(trial, 0.0, 10.0).unwrap();

        assert!(interval.bracketed);
        assert_relative_eq!(next, 2.0, epsilon = 1e-12);
        // Opposite slopes move the old best endpoint to the second slot.
        assert_eq!(interval.second.step, 1.0);
        assert_eq!(interval.best.step, 3.0);
    }

    #[test]
    fn test_shrinking_slope_extrapolates_when_unbracketed() {
        // Lower value and a slope still negative but smaller in magnitude:
        // no bracket yet, the clamped discriminant vanishes, and the step
        // extrapolates to the upper bound.
        let mut interval = TrialInterval::new(origin(0.0, -1.0));
        let trial = Endpoint::new(1.0, -0.5, -0.8);

        let next = interval.refine(trial, 0.0, 5.0).unwrap();

        assert!(!interval.bracketed);
        assert_relative_eq!(next, 5.0);
        assert_eq!(interval.best, trial);
    }

    #[test]
    fn test_growing_slope_jumps_to_bound_when_unbracketed() {
        // Slope magnitude not decreasing without a bracket: jump straight
        // to the far bound in the search direction.
        let mut interval = TrialInterval::new(origin(0.0, -1.0));
        let trial = Endpoint::new(1.0, -0.5, -1.5);

        let next = interval.refine(trial, 0.0, 7.0).unwrap();

        assert!(!interval.bracketed);
        assert_relative_eq!(next, 7.0);
        assert_eq!(interval.best, trial);
    }

    #[test]
    fn test_growing_slope_interpolates_with_second_endpoint_when_bracketed() {
        let mut interval = TrialInterval {
            best: Endpoint::new(0.0, 0.0, -1.0),
            second: Endpoint::new(2.0, 1.0, 3.0),
            bracketed: true,
        };
        // Same-sign slope with larger magnitude than the best endpoint.
        let trial = Endpoint::new(1.5, -0.1, -2.0);

        let next = interval.refine(trial, 0.0, 2.0).unwrap();

        assert!(next > 1.5 && next < 2.0);
        assert_eq!(interval.best, trial);
        assert_eq!(interval.second.step, 2.0);
    }

    #[test]
    fn test_bracketed_step_capped_at_66_percent() {
        // Bracketed shrinking-slope case: the selected step never moves
        // more than 66% of the way toward the second endpoint.
        let mut interval = TrialInterval {
            best: Endpoint::new(0.0, 0.0, -1.0),
            second: Endpoint::new(4.0, 2.0, 2.0),
            bracketed: true,
        };
        // Slope barely decreasing, so both interpolants want a long move.
        let trial = Endpoint::new(1.0, -0.5, -0.99);

        let next = interval.refine(trial, 0.0, 4.0).unwrap();

        let cap = 1.0 + 0.66 * (4.0 - 1.0);
        assert!(next <= cap + 1e-12);
        assert!(next > 1.0);
    }

    #[test]
    fn test_rejects_trial_outside_bracket() {
        let mut interval = TrialInterval {
            best: Endpoint::new(1.0, 0.0, -1.0),
            second: Endpoint::new(2.0, 1.0, 1.0),
            bracketed: true,
        };
        let before = interval;
        let trial = Endpoint::new(3.0, 0.5, 0.5);

        let err = interval.refine(trial, 0.0, 10.0).unwrap_err();

        assert!(matches!(err, LineSearchError::InvalidInterval { .. }));
        // The interval is untouched on error.
        assert_eq!(interval.best, before.best);
        assert_eq!(interval.second, before.second);
        assert_eq!(interval.bracketed, before.bracketed);
    }

    #[test]
    fn test_rejects_slope_pointing_away() {
        let mut interval = TrialInterval::new(origin(0.0, 1.0));
        let trial = Endpoint::new(1.0, 0.5, -0.5);

        let err = interval.refine(trial, 0.0, 10.0).unwrap_err();
        assert!(matches!(err, LineSearchError::InvalidInterval { .. }));
    }

    #[test]
    fn test_rejects_reversed_bounds() {
        let mut interval = TrialInterval::new(origin(0.0, -1.0));
        let trial = Endpoint::new(1.0, 1.0, 1.0);

        let err = interval.refine(trial, 5.0, 0.0).unwrap_err();
        assert!(matches!(err, LineSearchError::InvalidInterval { .. }));
    }

    #[test]
    fn test_quadratic_data_recovers_minimizer() {
        // f(t) = 0.5 (t - m)^2 sampled at 0 and at a point beyond 2m gives
        // a higher value; the averaged cubic/quadratic step still lands
        // close to m, and one more refinement from the new data nails it.
        let m = 2.0;
        let phi = |t: f64| (0.5 * (t - m).powi(2), t - m);

        let (f0, g0) = phi(0.0);
        let mut interval = TrialInterval::new(origin(f0, g0));
        let (f1, g1) = phi(5.0);
        let next = interval.refine(Endpoint::new(5.0, f1, g1), 0.0, 10.0).unwrap();

        assert!(interval.bracketed);
        assert!(next > 0.0 && next < 5.0);

        let (f2, g2) = phi(next);
        let closer = interval
            .refine(Endpoint::new(next, f2, g2), 0.0, 10.0)
            .unwrap();
        assert_relative_eq!(closer, m, epsilon = 1e-6);
    }
}
