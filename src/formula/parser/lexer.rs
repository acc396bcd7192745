//! Tokenizer for signal formulas.
//!
//! Whitespace is ignored entirely, so `2 3` lexes as the number `23` and
//! `2 t` as `2*t`. Typographic symbols are accepted as aliases: `π` for
//! `pi`, `×` for `*`, `÷` for `/` and `^` for `**`.
//!
//! Explicit multiplication is inserted at three boundaries:
//!
//! - a number followed by an identifier or `(`: `2t`, `3pi`, `2(t+1)`
//! - `)` followed by a number: `(t+1)2`
//! - `)` followed by `(`: `(t+1)(t-1)`

use crate::common::LexError;

use super::ast::Operator;

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// Maximal run of ASCII letters (and `π`, spelled out as `pi`).
    Identifier(String),
    Operator(Operator),
    LParen,
    RParen,
    Comma,
    /// Always the last token of a stream.
    End,
}

/// A token together with the char offset where it starts in the source.
///
/// Offsets refer to the untouched input, whitespace included, so they can
/// be shown to the user as-is. Inserted multiplications take the offset of
/// the token that follows them.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

/// Split a formula into tokens, terminated by [`Token::End`].
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let chars: Vec<(usize, char)> = source
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .collect();

    let mut tokens: Vec<SpannedToken> = Vec::with_capacity(chars.len() + 1);
    let mut i = 0;

    while i < chars.len() {
        let (position, ch) = chars[i];

        let token = match ch {
            '0'..='9' | '.' => {
                let start = i;
                let mut seen_dot = false;
                while let Some(&(_, c)) = chars.get(i) {
                    if c.is_ascii_digit() {
                        i += 1;
                    } else if c == '.' && !seen_dot {
                        seen_dot = true;
                        i += 1;
                    } else {
                        break;
                    }
                }

                let text: String = chars[start..i].iter().map(|(_, c)| *c).collect();
                // A lone '.' has no digits to parse.
                let value: f64 = fast_float2::parse(&text)
                    .map_err(|_| LexError::UnexpectedCharacter(ch, position))?;
                Token::Number(value)
            },
            c if is_identifier_char(c) => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.get(i) {
                    match c {
                        'π' => name.push_str("pi"),
                        c if c.is_ascii_alphabetic() => name.push(c),
                        _ => break,
                    }
                    i += 1;
                }
                Token::Identifier(name)
            },
            _ => {
                i += 1;
                match ch {
                    '+' => Token::Operator(Operator::Add),
                    '-' => Token::Operator(Operator::Sub),
                    '*' => {
                        if matches!(chars.get(i), Some(&(_, '*'))) {
                            i += 1;
                            Token::Operator(Operator::Pow)
                        } else {
                            Token::Operator(Operator::Mul)
                        }
                    },
                    '×' => Token::Operator(Operator::Mul),
                    '/' | '÷' => Token::Operator(Operator::Div),
                    '^' => Token::Operator(Operator::Pow),
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    other => return Err(LexError::UnexpectedCharacter(other, position)),
                }
            },
        };

        if needs_implicit_mul(tokens.last().map(|t| &t.token), &token) {
            tokens.push(SpannedToken {
                token: Token::Operator(Operator::Mul),
                position,
            });
        }
        tokens.push(SpannedToken { token, position });
    }

    tokens.push(SpannedToken {
        token: Token::End,
        position: source.chars().count(),
    });

    Ok(tokens)
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == 'π'
}

fn needs_implicit_mul(prev: Option<&Token>, next: &Token) -> bool {
    matches!(
        (prev, next),
        (Some(Token::Number(_)), Token::Identifier(_) | Token::LParen)
            | (Some(Token::RParen), Token::Number(_) | Token::LParen)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .expect("tokenize")
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn inserts_multiplication_after_numbers() {
        assert_eq!(
            kinds("2t"),
            vec![
                Token::Number(2.0),
                Token::Operator(Operator::Mul),
                Token::Identifier("t".to_string()),
                Token::End,
            ]
        );
        assert_eq!(
            kinds("3(t)"),
            vec![
                Token::Number(3.0),
                Token::Operator(Operator::Mul),
                Token::LParen,
                Token::Identifier("t".to_string()),
                Token::RParen,
                Token::End,
            ]
        );
    }

    #[test]
    fn inserts_multiplication_after_closing_paren() {
        let toks = kinds("(t)(t)2");
        assert_eq!(toks[3], Token::Operator(Operator::Mul));
        assert_eq!(toks[7], Token::Operator(Operator::Mul));
        assert_eq!(toks[8], Token::Number(2.0));
    }

    #[test]
    fn no_multiplication_between_paren_and_identifier() {
        // `)t` is not an implicit-multiplication boundary.
        assert_eq!(
            kinds("(t)t"),
            vec![
                Token::LParen,
                Token::Identifier("t".to_string()),
                Token::RParen,
                Token::Identifier("t".to_string()),
                Token::End,
            ]
        );
    }

    #[test]
    fn substitutes_symbols() {
        assert_eq!(
            kinds("π×t÷2^3"),
            vec![
                Token::Identifier("pi".to_string()),
                Token::Operator(Operator::Mul),
                Token::Identifier("t".to_string()),
                Token::Operator(Operator::Div),
                Token::Number(2.0),
                Token::Operator(Operator::Pow),
                Token::Number(3.0),
                Token::End,
            ]
        );
        assert_eq!(kinds("t**2"), kinds("t^2"));
        assert_eq!(kinds("2π"), kinds("2*pi"));
    }

    #[test]
    fn whitespace_is_stripped_before_lexing() {
        assert_eq!(kinds(" 2 3 "), vec![Token::Number(23.0), Token::End]);
        assert_eq!(kinds("si n ( t )"), kinds("sin(t)"));
    }

    #[test]
    fn identifiers_are_maximal_letter_runs() {
        assert_eq!(
            kinds("tsin"),
            vec![Token::Identifier("tsin".to_string()), Token::End]
        );
    }

    #[test]
    fn parses_decimal_forms() {
        assert_eq!(kinds("0.25"), vec![Token::Number(0.25), Token::End]);
        assert_eq!(kinds(".5"), vec![Token::Number(0.5), Token::End]);
        assert_eq!(kinds("5."), vec![Token::Number(5.0), Token::End]);
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        assert_eq!(
            tokenize("t + $"),
            Err(LexError::UnexpectedCharacter('$', 4))
        );
        assert_eq!(tokenize("t;"), Err(LexError::UnexpectedCharacter(';', 1)));
        assert_eq!(tokenize("."), Err(LexError::UnexpectedCharacter('.', 0)));
    }

    #[test]
    fn positions_refer_to_the_original_source() {
        let toks = tokenize("  2 t").expect("tokenize");
        assert_eq!(toks[0].position, 2);
        // Inserted '*' shares the position of the identifier.
        assert_eq!(toks[1].position, 4);
        assert_eq!(toks[2].position, 4);
        assert_eq!(toks[3].token, Token::End);
        assert_eq!(toks[3].position, 5);
    }

    #[test]
    fn empty_input_is_just_end() {
        assert_eq!(kinds("   "), vec![Token::End]);
    }
}
