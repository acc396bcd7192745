//! Fixed function and constant registry.
//!
//! Both tables are compile-time perfect-hash maps. The parser resolves every
//! identifier against them, so an unknown name is rejected before any
//! evaluation happens. Names are case-sensitive.

use phf::phf_map;

use super::parser::UnaryFunction;

/// Fast function name to variant lookup using PHF
static FUNCTIONS: phf::Map<&'static str, UnaryFunction> = phf_map! {
    // Domain signals
    "rect" => UnaryFunction::Rect,
    "tri" => UnaryFunction::Tri,
    "u" => UnaryFunction::Step,
    "ramp" => UnaryFunction::Ramp,
    "delta" => UnaryFunction::Delta,

    // Standard math
    "sin" => UnaryFunction::Sin,
    "cos" => UnaryFunction::Cos,
    "tan" => UnaryFunction::Tan,
    "exp" => UnaryFunction::Exp,
    "log" => UnaryFunction::Log,
    "ln" => UnaryFunction::Ln,
    "sqrt" => UnaryFunction::Sqrt,
    "abs" => UnaryFunction::Abs,
};

static CONSTANTS: phf::Map<&'static str, f64> = phf_map! {
    "pi" => std::f64::consts::PI,
    "e" => std::f64::consts::E,
};

/// Every registry function takes exactly one argument.
pub const FUNCTION_ARITY: usize = 1;

/// Name of the single free variable.
pub const VARIABLE_NAME: &str = "t";

/// Example formulas offered to users as a starting point.
pub const FORMULA_EXAMPLES: &[&str] = &[
    "2*rect(2*t-1)",
    "sin(pi*t)*rect(t/2)",
    "tri(2*t)",
    "u(t-2)",
    "exp(-t)*u(t)",
    "2*sin(3*t) + cos(t)",
    "abs(sin(2*pi*t))",
];

/// Resolve a function name.
#[inline]
pub fn lookup_function(name: &str) -> Option<UnaryFunction> {
    FUNCTIONS.get(name).copied()
}

/// Resolve a constant name.
#[inline]
pub fn lookup_constant(name: &str) -> Option<f64> {
    CONSTANTS.get(name).copied()
}

/// Short help entry for one group of registry functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

/// Help entries for the domain signals.
pub fn signal_functions() -> &'static [FunctionInfo] {
    &[
        FunctionInfo {
            usage: "rect(t)",
            description: "Rectangle (1 if |t| < 0.5)",
        },
        FunctionInfo {
            usage: "tri(t)",
            description: "Triangle (1 - |t| if |t| < 1)",
        },
        FunctionInfo {
            usage: "u(t)",
            description: "Unit step (1 if t >= 0)",
        },
        FunctionInfo {
            usage: "delta(t)",
            description: "Dirac impulse (Gaussian approximation, width 0.01)",
        },
        FunctionInfo {
            usage: "ramp(t)",
            description: "Ramp (t if t > 0)",
        },
    ]
}

/// Help entries for the standard math functions.
pub fn math_functions() -> &'static [FunctionInfo] {
    &[
        FunctionInfo {
            usage: "sin, cos, tan",
            description: "Trigonometry",
        },
        FunctionInfo {
            usage: "exp, log, ln, sqrt",
            description: "Exponential / natural log / square root",
        },
        FunctionInfo {
            usage: "abs",
            description: "Absolute value",
        },
    ]
}

/// Every help entry, domain signals first.
pub fn available_functions() -> impl Iterator<Item = &'static FunctionInfo> {
    signal_functions().iter().chain(math_functions())
}
