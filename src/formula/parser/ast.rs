//! AST types for signal formulas.

use std::fmt;

/// Arithmetic operators supported by the expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// Exponentiation, written `**` or `^`.
    Pow,
}

impl Operator {
    /// Canonical spelling used when rendering an AST.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "**",
        }
    }

    /// Apply the operator with IEEE-754 semantics.
    ///
    /// Division by zero yields `±Infinity` or `NaN`; nothing here can fail.
    #[inline]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
            Operator::Pow => left.powf(right),
        }
    }
}

/// The closed set of one-argument functions a formula may call.
///
/// Names are resolved to a variant at parse time, so evaluation never
/// performs a lookup by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryFunction {
    /// Unit rectangle, 1 on the open interval (-0.5, 0.5).
    Rect,
    /// Unit triangle, `1 - |t|` on (-1, 1).
    Tri,
    /// Heaviside step `u(t)`, 1 for `t >= 0`.
    Step,
    /// Ramp, `t` for `t > 0`.
    Ramp,
    /// Gaussian approximation of the Dirac impulse.
    Delta,
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm (alias of `ln`).
    Log,
    Ln,
    Sqrt,
    Abs,
}

impl UnaryFunction {
    /// Name under which the function is registered.
    pub fn name(self) -> &'static str {
        match self {
            UnaryFunction::Rect => "rect",
            UnaryFunction::Tri => "tri",
            UnaryFunction::Step => "u",
            UnaryFunction::Ramp => "ramp",
            UnaryFunction::Delta => "delta",
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Log => "log",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Abs => "abs",
        }
    }

    /// Whether this is one of the domain signals rather than a standard math function.
    pub fn is_signal(self) -> bool {
        matches!(
            self,
            UnaryFunction::Rect
                | UnaryFunction::Tri
                | UnaryFunction::Step
                | UnaryFunction::Ramp
                | UnaryFunction::Delta
        )
    }
}

/// Expression tree produced by the parser.
///
/// Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal; named constants are folded into literals.
    Literal(f64),
    /// The free variable `t`.
    Variable,
    /// Call of a registered one-argument function.
    UnaryCall(UnaryFunction, Box<AstNode>),
    /// Binary arithmetic operation.
    BinaryOp(Operator, Box<AstNode>, Box<AstNode>),
}

impl AstNode {
    pub(crate) fn call(function: UnaryFunction, arg: AstNode) -> Self {
        AstNode::UnaryCall(function, Box::new(arg))
    }

    pub(crate) fn binary(op: Operator, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOp(op, Box::new(left), Box::new(right))
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        match self {
            AstNode::Literal(_) | AstNode::Variable => 1,
            AstNode::UnaryCall(_, arg) => 1 + arg.node_count(),
            AstNode::BinaryOp(_, left, right) => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Whether the subtree references `t` at all.
    pub fn depends_on_t(&self) -> bool {
        match self {
            AstNode::Literal(_) => false,
            AstNode::Variable => true,
            AstNode::UnaryCall(_, arg) => arg.depends_on_t(),
            AstNode::BinaryOp(_, left, right) => left.depends_on_t() || right.depends_on_t(),
        }
    }
}

/// Fully parenthesized rendering, e.g. `(2 * rect(t))`.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Literal(v) => write!(f, "{}", v),
            AstNode::Variable => f.write_str("t"),
            AstNode::UnaryCall(func, arg) => write!(f, "{}({})", func.name(), arg),
            AstNode::BinaryOp(op, left, right) => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            },
        }
    }
}
