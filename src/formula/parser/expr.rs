//! Recursive descent parser over the token stream.

use smallvec::SmallVec;

use crate::common::ParseError;
use crate::formula::FormulaProgram;
use crate::formula::registry::{self, FUNCTION_ARITY, VARIABLE_NAME};

use super::ast::{AstNode, Operator};
use super::lexer::{SpannedToken, Token};

/// Maximum nesting of parentheses, calls and exponent chains.
pub const MAX_NESTING: usize = 256;

/// Maximum height of the built tree.
///
/// Left-associative chains such as `t+t+...+t` grow the tree without
/// nesting, so height is bounded separately from `MAX_NESTING`. Evaluation,
/// rendering and dropping all recurse once per level.
pub const MAX_TREE_DEPTH: usize = 2048;

/// Default bound on the number of AST nodes in one formula.
pub const DEFAULT_MAX_NODES: usize = 4096;

/// Parse a token stream into a validated program.
///
/// Supported grammar (precedence low to high):
///
/// expr    := term (("+" | "-") term)*
/// term    := power (("*" | "/") power)*
/// power   := unary ("**" power)?      // right-associative
/// unary   := "-"? primary
/// primary := NUMBER
///          | "t"
///          | CONSTANT
///          | FUNCTION "(" expr ")"
///          | "(" expr ")"
///
/// Unary minus binds tighter than `**`, so `-t**2` is `(-t)**2`.
pub fn parse(
    source: &str,
    tokens: &[SpannedToken],
    max_nodes: usize,
) -> Result<FormulaProgram, ParseError> {
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        nodes: 0,
        max_nodes,
        depth: 0,
    };

    if matches!(parser.peek(), Token::End) {
        return Err(ParseError::syntax(parser.position(), "empty formula"));
    }

    let root = parser.parse_expr()?;

    // All tokens must be consumed for a valid expression.
    if !matches!(parser.peek(), Token::End) {
        let message = match parser.peek() {
            Token::RParen => "unmatched ')'",
            _ => "unexpected trailing input",
        };
        return Err(ParseError::syntax(parser.position(), message));
    }

    Ok(FormulaProgram::new(source, root.node, parser.nodes))
}

/// A subtree together with its height.
struct Subtree {
    node: AstNode,
    height: usize,
}

struct ExprParser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
    nodes: usize,
    max_nodes: usize,
    depth: usize,
}

impl<'a> ExprParser<'a> {
    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with End.
        self.tokens.get(self.pos).map_or(&Token::End, |t| &t.token)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(0, |t| t.position)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseError::TooComplex { limit: MAX_NESTING });
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn count_node(&mut self) -> Result<(), ParseError> {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(ParseError::TooComplex {
                limit: self.max_nodes,
            });
        }
        Ok(())
    }

    fn leaf(&mut self, node: AstNode) -> Result<Subtree, ParseError> {
        self.count_node()?;
        Ok(Subtree { node, height: 1 })
    }

    fn branch(&mut self, node: AstNode, child_height: usize) -> Result<Subtree, ParseError> {
        self.count_node()?;
        let height = child_height + 1;
        if height > MAX_TREE_DEPTH {
            return Err(ParseError::TooComplex {
                limit: MAX_TREE_DEPTH,
            });
        }
        Ok(Subtree { node, height })
    }

    fn binary(&mut self, op: Operator, left: Subtree, right: Subtree) -> Result<Subtree, ParseError> {
        let child_height = left.height.max(right.height);
        self.branch(AstNode::binary(op, left.node, right.node), child_height)
    }

    fn parse_expr(&mut self) -> Result<Subtree, ParseError> {
        self.descend()?;
        let mut tree = self.parse_term()?;

        loop {
            let op = match self.peek() {
                Token::Operator(op @ (Operator::Add | Operator::Sub)) => *op,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            tree = self.binary(op, tree, rhs)?;
        }

        self.ascend();
        Ok(tree)
    }

    fn parse_term(&mut self) -> Result<Subtree, ParseError> {
        let mut tree = self.parse_power()?;

        loop {
            let op = match self.peek() {
                Token::Operator(op @ (Operator::Mul | Operator::Div)) => *op,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_power()?;
            tree = self.binary(op, tree, rhs)?;
        }

        Ok(tree)
    }

    fn parse_power(&mut self) -> Result<Subtree, ParseError> {
        let base = self.parse_unary()?;

        if !matches!(self.peek(), Token::Operator(Operator::Pow)) {
            return Ok(base);
        }
        self.advance();

        self.descend()?;
        let exponent = self.parse_power()?;
        self.ascend();

        self.binary(Operator::Pow, base, exponent)
    }

    fn parse_unary(&mut self) -> Result<Subtree, ParseError> {
        if !matches!(self.peek(), Token::Operator(Operator::Sub)) {
            return self.parse_primary();
        }
        self.advance();

        match self.parse_primary()? {
            // Fold negative literals so `-2` stays a single node.
            Subtree {
                node: AstNode::Literal(v),
                height,
            } => Ok(Subtree {
                node: AstNode::Literal(-v),
                height,
            }),
            // Multiplying by -1 is exact negation under IEEE-754.
            inner => {
                let minus_one = self.leaf(AstNode::Literal(-1.0))?;
                self.binary(Operator::Mul, minus_one, inner)
            },
        }
    }

    fn parse_primary(&mut self) -> Result<Subtree, ParseError> {
        let position = self.position();

        match self.peek().clone() {
            Token::Number(v) => {
                self.advance();
                self.leaf(AstNode::Literal(v))
            },
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_rparen()?;
                Ok(expr)
            },
            Token::Identifier(name) => {
                self.advance();
                if matches!(self.peek(), Token::LParen) {
                    return self.parse_call(name);
                }
                self.parse_name(name, position)
            },
            Token::End => Err(ParseError::syntax(position, "unexpected end of formula")),
            Token::RParen => Err(ParseError::syntax(position, "unexpected ')'")),
            Token::Comma => Err(ParseError::syntax(position, "unexpected ','")),
            Token::Operator(op) => Err(ParseError::syntax(
                position,
                format!("unexpected operator '{}'", op.symbol()),
            )),
        }
    }

    fn parse_call(&mut self, name: String) -> Result<Subtree, ParseError> {
        let function = registry::lookup_function(&name)
            .ok_or_else(|| ParseError::UnknownFunction(name.clone()))?;

        // Consume '('
        self.advance();

        let mut args: SmallVec<[Subtree; 2]> = SmallVec::new();
        // Handle empty argument list: NAME()
        if matches!(self.peek(), Token::RParen) {
            self.advance();
        } else {
            loop {
                args.push(self.parse_expr()?);
                match self.peek() {
                    Token::Comma => self.advance(),
                    Token::RParen => {
                        self.advance();
                        break;
                    },
                    _ => {
                        return Err(ParseError::syntax(
                            self.position(),
                            format!("expected ',' or ')' in call to '{}'", name),
                        ));
                    },
                }
            }
        }

        if args.len() != FUNCTION_ARITY {
            return Err(ParseError::ArityMismatch {
                name,
                expected: FUNCTION_ARITY,
                found: args.len(),
            });
        }

        let arg = args.remove(0);
        self.branch(AstNode::call(function, arg.node), arg.height)
    }

    fn parse_name(&mut self, name: String, position: usize) -> Result<Subtree, ParseError> {
        if name == VARIABLE_NAME {
            return self.leaf(AstNode::Variable);
        }
        if let Some(value) = registry::lookup_constant(&name) {
            return self.leaf(AstNode::Literal(value));
        }
        if registry::lookup_function(&name).is_some() {
            return Err(ParseError::syntax(
                position,
                format!("function '{}' must be called with an argument", name),
            ));
        }
        Err(ParseError::UnknownIdentifier(name))
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Token::RParen => {
                self.advance();
                Ok(())
            },
            _ => Err(ParseError::syntax(self.position(), "expected ')'")),
        }
    }
}
