//! Unified error types for sigform.
//!
//! Every failure the core can produce is a typed value that renders as a
//! user-displayable message. Evaluation itself never fails: out-of-range
//! math becomes `NaN`/`±Infinity` data instead of an error.
use thiserror::Error;

/// Error raised while turning formula text into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Character outside the formula alphabet, with its char offset in the source.
    #[error("Unexpected character '{0}' at position {1}")]
    UnexpectedCharacter(char, usize),
}

/// Error raised while building the syntax tree from a token stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Identifier used in call position that is not a registered function.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Registered function called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Bare identifier that is neither `t` nor a known constant.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Malformed input: unbalanced parentheses, trailing tokens, empty formula.
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Formula exceeds the node or nesting bound.
    #[error("Formula is too complex (limit: {limit})")]
    TooComplex { limit: usize },
}

impl ParseError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Caller-side precondition violated before any computation took place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreconditionError {
    /// `t_end` is not strictly greater than `t_start`.
    #[error("Empty interval: t_end ({t_end}) must be greater than t_start ({t_start})")]
    EmptyInterval { t_start: f64, t_end: f64 },

    /// One of the interval bounds is NaN or infinite.
    #[error("Interval bounds must be finite, got [{t_start}, {t_end}]")]
    NonFiniteBound { t_start: f64, t_end: f64 },

    /// Both bounds are finite but their distance overflows to infinity.
    #[error("Interval [{t_start}, {t_end}] is too wide to sample")]
    SpanOverflow { t_start: f64, t_end: f64 },

    /// No samples were requested or supplied.
    #[error("Sample count must be positive")]
    ZeroSamples,

    /// A uniform grid needs at least two points to have a step.
    #[error("At least {required} samples are required, got {found}")]
    TooFewSamples { required: usize, found: usize },

    /// Integration method selector is neither `trapeze` nor `simpson`.
    #[error("Unknown integration method: {0}")]
    UnknownMethod(String),
}

/// Failure of a single item in a batch analysis.
///
/// Carries the identifier of the signal that triggered it; the rest of the
/// batch is unaffected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Computation failed for signal '{signal}': {reason}")]
pub struct ComputationError {
    pub signal: String,
    pub reason: String,
}

impl ComputationError {
    pub fn new(signal: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            signal: signal.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for sigform operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Formula text contains an invalid character
    #[error(transparent)]
    Lex(LexError),

    /// Formula text is not a valid expression
    #[error(transparent)]
    Parse(ParseError),

    /// Interval or sample parameters are invalid
    #[error(transparent)]
    Precondition(PreconditionError),

    /// A batch item could not be computed
    #[error(transparent)]
    Computation(ComputationError),
}

impl Error {
    /// Whether this error comes from compiling the formula text.
    #[inline]
    pub fn is_formula_error(&self) -> bool {
        matches!(self, Error::Lex(_) | Error::Parse(_))
    }
}

/// Result type for sigform operations.
pub type Result<T> = std::result::Result<T, Error>;
