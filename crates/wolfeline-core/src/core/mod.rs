//! Core types for step-length selection.

pub mod error;
pub mod objective;
pub mod types;

// Re-export core types
pub use error::*;
pub use objective::*;
pub use types::*;
