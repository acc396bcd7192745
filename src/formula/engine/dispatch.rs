use super::super::parser::UnaryFunction;
use super::signals;

impl UnaryFunction {
    /// Apply the function with real-valued semantics.
    ///
    /// Out-of-domain inputs (`log(-1)`, `sqrt(-1)`) give `NaN` and poles
    /// give `±Infinity`; this never fails.
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            UnaryFunction::Rect => signals::rect(x),
            UnaryFunction::Tri => signals::tri(x),
            UnaryFunction::Step => signals::step(x),
            UnaryFunction::Ramp => signals::ramp(x),
            UnaryFunction::Delta => signals::delta(x),
            UnaryFunction::Sin => x.sin(),
            UnaryFunction::Cos => x.cos(),
            UnaryFunction::Tan => x.tan(),
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Log | UnaryFunction::Ln => x.ln(),
            UnaryFunction::Sqrt => x.sqrt(),
            UnaryFunction::Abs => x.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_natural() {
        assert_eq!(UnaryFunction::Log.apply(std::f64::consts::E), 1.0);
        assert_eq!(
            UnaryFunction::Log.apply(7.5),
            UnaryFunction::Ln.apply(7.5)
        );
    }

    #[test]
    fn out_of_domain_is_data() {
        assert!(UnaryFunction::Log.apply(-1.0).is_nan());
        assert_eq!(UnaryFunction::Ln.apply(0.0), f64::NEG_INFINITY);
        assert!(UnaryFunction::Sqrt.apply(-4.0).is_nan());
        assert_eq!(UnaryFunction::Exp.apply(1000.0), f64::INFINITY);
    }
}
