//! Numerical derivatives of compiled formulas.
//!
//! Central differences only. Discontinuities such as the corners of `tri`
//! show up as large finite spikes of width `2h`, not as impulses.

use rayon::prelude::*;

use crate::config::AnalysisOptions;
use crate::formula::FormulaProgram;

/// Default half-width of the central difference.
pub const DEFAULT_STEP: f64 = 1e-5;

/// Central difference `(f(t+h) - f(t-h)) / 2h` of any scalar function.
#[inline]
pub fn central_difference<F>(f: F, t: f64, h: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    (f(t + h) - f(t - h)) / (2.0 * h)
}

/// First derivative of `program` at `t`.
pub fn derivative(program: &FormulaProgram, t: f64, h: f64) -> f64 {
    central_difference(|x| program.evaluate(x), t, h)
}

/// Second derivative, by nesting the central difference.
pub fn second_derivative(program: &FormulaProgram, t: f64, h: f64) -> f64 {
    central_difference(|x| derivative(program, x, h), t, h)
}

/// First derivative at every instant of `ts`, in order.
pub fn derivative_series(
    program: &FormulaProgram,
    ts: &[f64],
    h: f64,
    options: &AnalysisOptions,
) -> Vec<f64> {
    if options.should_parallelize(ts.len()) {
        ts.par_iter().map(|&t| derivative(program, t, h)).collect()
    } else {
        ts.iter().map(|&t| derivative(program, t, h)).collect()
    }
}
