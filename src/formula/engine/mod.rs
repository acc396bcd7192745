//! Runtime evaluation of parsed formulas.
//!
//! Evaluation is a total function of `t`: every program that parsed
//! produces a value for every input, possibly `NaN` or `±Infinity`.
//! Sampling over a time grid is a pure map with no shared state, so large
//! grids are split across the rayon pool and collected back in input order.

use rayon::prelude::*;
use tracing::trace;

use super::FormulaProgram;
use super::parser::AstNode;
use crate::config::AnalysisOptions;

mod dispatch;
pub mod signals;

pub use signals::{DELTA_EPSILON, delta, ramp, rect, step, tri};

/// Evaluate a program at a single instant.
#[inline]
pub fn evaluate(program: &FormulaProgram, t: f64) -> f64 {
    evaluate_node(program.root(), t)
}

/// Evaluate an expression tree at a single instant.
pub fn evaluate_node(node: &AstNode, t: f64) -> f64 {
    match node {
        AstNode::Literal(v) => *v,
        AstNode::Variable => t,
        AstNode::UnaryCall(func, arg) => func.apply(evaluate_node(arg, t)),
        AstNode::BinaryOp(op, left, right) => {
            op.apply(evaluate_node(left, t), evaluate_node(right, t))
        },
    }
}

/// Evaluate a program at every instant of `ts`, with default parallelism.
pub fn evaluate_series(program: &FormulaProgram, ts: &[f64]) -> Vec<f64> {
    evaluate_series_with(program, ts, &AnalysisOptions::default())
}

/// Evaluate a program at every instant of `ts`.
///
/// The output has the same length and order as `ts`.
pub fn evaluate_series_with(
    program: &FormulaProgram,
    ts: &[f64],
    options: &AnalysisOptions,
) -> Vec<f64> {
    if options.should_parallelize(ts.len()) {
        trace!(samples = ts.len(), "evaluating formula on the rayon pool");
        ts.par_iter().map(|&t| evaluate(program, t)).collect()
    } else {
        ts.iter().map(|&t| evaluate(program, t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::compile;

    const TOL: f64 = 1e-12;

    fn eval(source: &str, t: f64) -> f64 {
        evaluate(&compile(source).expect("compile"), t)
    }

    #[test]
    fn evaluates_arithmetic_and_constants() {
        assert_eq!(eval("1+2*3", 0.0), 7.0);
        assert_eq!(eval("2^10", 0.0), 1024.0);
        assert_eq!(eval("-2**2", 0.0), 4.0);
        assert!((eval("pi", 0.0) - std::f64::consts::PI).abs() < TOL);
        assert!((eval("2*sin(pi*t)", 0.5) - 2.0).abs() < TOL);
    }

    #[test]
    fn evaluates_domain_signals() {
        assert_eq!(eval("2*rect(2*t-1)", 0.5), 2.0);
        assert_eq!(eval("2*rect(2*t-1)", 1.5), 0.0);
        assert_eq!(eval("u(t-2)", 2.0), 1.0);
        assert_eq!(eval("u(3-t)", 4.0), 0.0);
        assert!((eval("ramp(t+1)-2*ramp(t)+ramp(t-1)", 0.5) - tri(0.5)).abs() < TOL);
    }

    #[test]
    fn faults_become_values() {
        assert_eq!(eval("1/t", 0.0), f64::INFINITY);
        assert!(eval("0/t", 0.0).is_nan());
        assert!(eval("log(t)", -1.0).is_nan());
        assert!(eval("sqrt(t)", -4.0).is_nan());
    }

    #[test]
    fn series_preserves_order_on_both_paths() {
        let program = compile("t*t").expect("compile");
        let ts: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        let expected: Vec<f64> = ts.iter().map(|t| t * t).collect();

        let sequential = AnalysisOptions::new().with_parallel(false);
        let parallel = AnalysisOptions::new().with_parallel_threshold(1);
        assert_eq!(evaluate_series_with(&program, &ts, &sequential), expected);
        assert_eq!(evaluate_series_with(&program, &ts, &parallel), expected);
        assert_eq!(evaluate_series(&program, &ts), expected);
    }

    #[test]
    fn series_of_empty_grid_is_empty() {
        let program = compile("t").expect("compile");
        assert!(evaluate_series(&program, &[]).is_empty());
    }
}
