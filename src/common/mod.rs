//! Common types shared across the formula and signal modules.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{ComputationError, Error, LexError, ParseError, PreconditionError, Result};
