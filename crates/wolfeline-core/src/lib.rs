//! Safeguarded step-length selection for line-search optimization.
//!
//! This crate implements the one-dimensional kernel that globalized
//! optimization methods rely on: given a smooth objective restricted to a
//! descent ray, find a step length satisfying the strong Wolfe conditions
//! (sufficient decrease plus a curvature bound). The design follows the
//! Moré–Thuente algorithm: a safeguarded cubic/quadratic interpolation
//! step over an interval of uncertainty, wrapped in a reverse-communication
//! driver so the caller keeps full control of objective evaluation.
//!
//! # Key Concepts
//!
//! - **Sufficient decrease**: f(t) ≤ f(0) + ftol·t·f'(0), the Armijo test
//! - **Curvature condition**: |f'(t)| ≤ gtol·|f'(0)|
//! - **Interval of uncertainty**: a pair of steps known to surround an
//!   acceptable point once the search has bracketed one
//! - **Reverse communication**: the driver proposes trial steps and
//!   returns to the caller for every evaluation
//!
//! # Modules
//!
//! - [`core::types`]: scalar abstraction and numeric constants
//! - [`core::error`]: error types for rejected inputs
//! - [`core::objective`]: the evaluator contract consumed by the searches
//! - [`search::interpolate`]: one-shot safeguarded interpolation step
//! - [`search::driver`]: reverse-communication driver and search state
//! - [`search::strong_wolfe`]: strong Wolfe frontend
//! - [`search::backtracking`]: Armijo backtracking frontend
//! - [`search::quad_cub`]: interpolating backtracking frontend
//!
//! # Example
//!
//! ```rust
//! use wolfeline_core::prelude::*;
//!
//! // Restriction of f(x) = x^2 / 2 along d = -1 from x = 1.
//! let phi = |t: f64| -> wolfeline_core::Result<(f64, f64)> {
//!     Ok(((1.0 - t) * (1.0 - t) / 2.0, t - 1.0))
//! };
//!
//! let params = SearchParams::default();
//! let outcome = strong_wolfe_search(0.5, -1.0, phi, 1.0, &params)?;
//!
//! assert!(outcome.converged());
//! assert_eq!(outcome.step, 1.0);
//! # Ok::<(), wolfeline_core::LineSearchError>(())
//! ```

pub mod core;
pub mod search;

// Re-export commonly used items at the crate root
pub use crate::core::error::{LineSearchError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use wolfeline_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::error::{LineSearchError, Result};
    pub use crate::core::objective::{CountingLineFunction, LineFunction};
    pub use crate::core::types::Scalar;
    pub use crate::search::backtracking::armijo_search;
    pub use crate::search::driver::{SearchState, SearchStatus, Stage};
    pub use crate::search::interpolate::{Endpoint, TrialInterval};
    pub use crate::search::params::SearchParams;
    pub use crate::search::quad_cub::quad_cub_search;
    pub use crate::search::strong_wolfe::{strong_wolfe_search, SearchOutcome};
}
