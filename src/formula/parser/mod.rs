//! Lexing and parsing of signal formulas.
//!
//! The parser only builds a tree; it never evaluates anything and holds no
//! reference to any execution facility. Evaluation lives in
//! `formula::engine`.
pub mod ast;
pub mod expr;
pub mod lexer;

pub use ast::{AstNode, Operator, UnaryFunction};
pub use expr::{DEFAULT_MAX_NODES, MAX_NESTING, MAX_TREE_DEPTH, parse};
pub use lexer::{SpannedToken, Token, tokenize};
