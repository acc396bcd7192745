//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! stage-specific error types to the unified Error type.

use super::types::{ComputationError, Error, LexError, ParseError, PreconditionError};

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<PreconditionError> for Error {
    fn from(err: PreconditionError) -> Self {
        Error::Precondition(err)
    }
}

impl From<ComputationError> for Error {
    fn from(err: ComputationError) -> Self {
        Error::Computation(err)
    }
}
