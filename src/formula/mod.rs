//! Signal formula compilation and evaluation.
//!
//! A formula goes through a closed pipeline: text is tokenized, the tokens
//! are parsed into an [`AstNode`] tree, and the tree is interpreted for each
//! sample instant. No user input ever reaches anything but this interpreter.
//!
//! # Example
//!
//! ```rust
//! use sigform::formula::compile;
//!
//! let program = compile("2*rect(2t-1)")?;
//! assert_eq!(program.evaluate(0.5), 2.0);
//! assert_eq!(program.evaluate(2.0), 0.0);
//! # Ok::<(), sigform::Error>(())
//! ```

pub mod engine;
pub mod parser;
pub mod registry;

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::common::Result;
use crate::config::AnalysisOptions;
use parser::{AstNode, DEFAULT_MAX_NODES};

/// A parsed and validated formula.
///
/// Immutable after construction. Evaluation is total: any finite `t` yields
/// a value, possibly `NaN` or `±Infinity`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaProgram {
    source: String,
    root: AstNode,
    node_count: usize,
}

impl FormulaProgram {
    pub(crate) fn new(source: &str, root: AstNode, node_count: usize) -> Self {
        Self {
            source: source.to_owned(),
            root,
            node_count,
        }
    }

    /// The formula text this program was compiled from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn root(&self) -> &AstNode {
        &self.root
    }

    /// Number of AST nodes, bounded by the parser's node limit.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether the formula references `t` at all.
    pub fn depends_on_t(&self) -> bool {
        self.root.depends_on_t()
    }

    /// Evaluate at a single instant.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        engine::evaluate(self, t)
    }

    /// Evaluate at every instant of `ts`, in order.
    pub fn evaluate_series(&self, ts: &[f64]) -> Vec<f64> {
        engine::evaluate_series(self, ts)
    }

    /// Evaluate at every instant of `ts` with explicit parallelism settings.
    pub fn evaluate_series_with(&self, ts: &[f64], options: &AnalysisOptions) -> Vec<f64> {
        engine::evaluate_series_with(self, ts, options)
    }
}

impl fmt::Display for FormulaProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

/// Compile formula text with the default node bound.
pub fn compile(source: &str) -> Result<FormulaProgram> {
    compile_with(source, DEFAULT_MAX_NODES)
}

/// Compile formula text, rejecting trees larger than `max_nodes`.
///
/// Lexing and parsing errors are returned before anything is evaluated.
pub fn compile_with(source: &str, max_nodes: usize) -> Result<FormulaProgram> {
    let result: Result<FormulaProgram> = parser::tokenize(source)
        .map_err(Into::into)
        .and_then(|tokens| parser::parse(source, &tokens, max_nodes).map_err(Into::into));

    match &result {
        Ok(program) => debug!(
            formula = source,
            nodes = program.node_count(),
            "compiled formula"
        ),
        Err(err) => debug!(formula = source, error = %err, "formula rejected"),
    }
    result
}

/// Check that a formula compiles, discarding the program.
pub fn validate_formula(source: &str) -> Result<()> {
    compile(source).map(|_| ())
}

/// Compiled programs keyed on their exact source text.
///
/// Any change to the text is a different key, so an edited formula is
/// always recompiled. Failed compilations are not cached.
#[derive(Debug, Clone)]
pub struct FormulaCache {
    programs: HashMap<String, FormulaProgram>,
    max_nodes: usize,
}

impl Default for FormulaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaCache {
    pub fn new() -> Self {
        Self::with_max_nodes(DEFAULT_MAX_NODES)
    }

    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            programs: HashMap::new(),
            max_nodes,
        }
    }

    /// Return the cached program for `source`, compiling it on first use.
    ///
    /// The key is only allocated on a miss.
    pub fn get_or_compile(&mut self, source: &str) -> Result<&FormulaProgram> {
        if !self.programs.contains_key(source) {
            let program = compile_with(source, self.max_nodes)?;
            return Ok(&*self.programs.entry(source.to_owned()).or_insert(program));
        }
        Ok(&self.programs[source])
    }

    /// Drop the cached program for `source`, if any.
    pub fn invalidate(&mut self, source: &str) -> Option<FormulaProgram> {
        self.programs.remove(source)
    }

    pub fn clear(&mut self) {
        self.programs.clear();
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Error, LexError, ParseError};

    #[test]
    fn compile_reports_lex_and_parse_errors() {
        assert_eq!(
            compile("t$2").unwrap_err(),
            Error::Lex(LexError::UnexpectedCharacter('$', 1))
        );
        assert!(matches!(
            compile("rect(t"),
            Err(Error::Parse(ParseError::Syntax { .. }))
        ));
        assert_eq!(
            compile("foo(t)").unwrap_err(),
            Error::Parse(ParseError::UnknownFunction("foo".to_string()))
        );
    }

    #[test]
    fn compile_with_enforces_node_bound() {
        assert!(compile_with("t+t+t", 5).is_ok());
        assert_eq!(
            compile_with("t+t+t+t", 5).unwrap_err(),
            Error::Parse(ParseError::TooComplex { limit: 5 })
        );
    }

    #[test]
    fn program_keeps_source() {
        let program = compile("2t").expect("compile");
        assert_eq!(program.source(), "2t");
        assert_eq!(program.to_string(), "(2 * t)");
        assert!(program.depends_on_t());
        assert!(!compile("sin(4*pi)").expect("compile").depends_on_t());
    }

    #[test]
    fn validate_formula_matches_compile() {
        assert!(validate_formula("exp(-t)*u(t)").is_ok());
        assert!(validate_formula("x").is_err());
        assert!(validate_formula("").is_err());
    }

    #[test]
    fn cache_reuses_and_invalidates() {
        let mut cache = FormulaCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_compile("sin(t)").expect("compile").clone();
        let second = cache.get_or_compile("sin(t)").expect("compile").clone();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        cache.get_or_compile("sin(2t)").expect("compile");
        assert_eq!(cache.len(), 2);

        assert!(cache.get_or_compile("sin(").is_err());
        assert_eq!(cache.len(), 2);

        assert!(cache.invalidate("sin(t)").is_some());
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_hit_returns_the_stored_program() {
        let mut cache = FormulaCache::new();
        let first: *const FormulaProgram = cache.get_or_compile("rect(t/2)").expect("compile");
        let second: *const FormulaProgram = cache.get_or_compile("rect(t/2)").expect("compile");
        assert!(std::ptr::eq(first, second));
        assert_eq!(cache.len(), 1);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy to generate formulas that are valid by construction
        fn formula_strategy() -> impl Strategy<Value = String> {
            let leaf = prop_oneof![
                Just("t".to_string()),
                Just("pi".to_string()),
                (0u32..100).prop_map(|n| n.to_string()),
            ];
            leaf.prop_recursive(4, 32, 2, |inner| {
                let functions = vec![
                    "rect", "tri", "u", "ramp", "delta", "sin", "cos", "exp", "log", "sqrt", "abs",
                ];
                prop_oneof![
                    (prop::sample::select(functions), inner.clone())
                        .prop_map(|(name, arg)| format!("{}({})", name, arg)),
                    (
                        inner.clone(),
                        prop::sample::select(vec!["+", "-", "*", "/", "^"]),
                        inner
                    )
                        .prop_map(|(l, op, r)| format!("({}){}({})", l, op, r)),
                ]
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_tokenize_never_panics(source in any::<String>()) {
                let _ = parser::tokenize(&source);
            }

            #[test]
            fn prop_generated_formulas_compile(source in formula_strategy()) {
                let result = compile(&source);
                prop_assert!(result.is_ok(), "{} failed: {:?}", source, result.err());
            }

            #[test]
            fn prop_evaluation_is_deterministic(
                source in formula_strategy(),
                t in -1.0e6f64..1.0e6f64,
            ) {
                let program = compile(&source).expect("generated formula compiles");
                prop_assert_eq!(program.evaluate(t).to_bits(), program.evaluate(t).to_bits());
            }

            #[test]
            fn prop_evaluation_is_total(source in formula_strategy(), t in any::<f64>()) {
                let program = compile(&source).expect("generated formula compiles");
                // Any value, NaN included, is a valid outcome.
                let _ = program.evaluate(t);
            }

            #[test]
            fn prop_implicit_multiplication_matches_explicit(
                k in 0u32..1000,
                t in -100.0f64..100.0f64,
            ) {
                let implicit = compile(&format!("{}t", k)).expect("compile");
                let explicit = compile(&format!("{}*t", k)).expect("compile");
                prop_assert_eq!(implicit.root(), explicit.root());
                prop_assert_eq!(implicit.evaluate(t).to_bits(), explicit.evaluate(t).to_bits());

                let grouped = compile(&format!("(t+{})(t-{})", k, k)).expect("compile");
                let expanded = compile(&format!("(t+{})*(t-{})", k, k)).expect("compile");
                prop_assert_eq!(grouped.root(), expanded.root());
            }
        }
    }
}
