//! Objective adapters and test problems for `wolfeline` line searches.
//!
//! The searches in `wolfeline-core` consume scalar restrictions of an
//! objective along a ray; this crate provides the glue for callers whose
//! objectives live over `nalgebra` vectors:
//!
//! - [`restriction::DirectionalRestriction`]: ϕ(t) = f(x + t·d) with the
//!   gradient projected onto the direction
//! - [`problems`]: small smooth objectives with hand-written gradients
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DVector;
//! use wolfeline_core::prelude::*;
//! use wolfeline_models::{ConvexQuadratic, DirectionalRestriction};
//!
//! let objective = ConvexQuadratic::<f64>::simple(2);
//! let origin = DVector::from_vec(vec![1.0, 1.0]);
//! let direction = DVector::from_vec(vec![-1.0, -1.0]);
//!
//! let mut phi = DirectionalRestriction::new(&objective, origin, direction);
//! let (value, slope) = phi.at_origin()?;
//!
//! let outcome = strong_wolfe_search(value, slope, phi, 1.0, &SearchParams::default())?;
//! assert!(outcome.converged());
//! # Ok::<(), LineSearchError>(())
//! ```

pub mod problems;
pub mod restriction;

pub use problems::{ConvexQuadratic, Rosenbrock};
pub use restriction::{DirectionalRestriction, Objective};
