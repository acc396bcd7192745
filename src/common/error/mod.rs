//! Unified error types for sigform.
//!
//! This module provides one error type per pipeline stage (lexing, parsing,
//! preconditions, batch computation) plus a unified `Error` wrapping them all.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{ComputationError, Error, LexError, ParseError, PreconditionError, Result};
