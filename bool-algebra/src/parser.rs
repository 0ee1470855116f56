// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text to expressions.
//!
//! ```text
//! expr    := term   (OR term)*
//! term    := factor (AND factor)*
//! factor  := PREFIX_NOT factor | primary POSTFIX_NOT*
//! primary := '0' | '1' | INTEGER | IDENT | '(' expr ')'
//! ```
//!
//! | Operator | Glyphs |
//! |---|---|
//! | NOT (prefix) | `~ ¬ !` |
//! | NOT (postfix) | `'` |
//! | AND | `* . ∙ ^ ∧` |
//! | OR | `+ ∨` |

use crate::{
    algebra::{Algebra, DefaultAlgebra, Mode},
    errors::{ParseError, ParseErrorKind},
    expr::{Expr, Op, SymbolArg},
};
use std::fmt;

/// Parses `text` into an evaluated expression.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    Parser::new().parse(text)
}

/// Parses `text` into a raw expression that keeps the written shape.
pub fn parse_unevaluated(text: &str) -> Result<Expr, ParseError> {
    Parser::new().with_mode(Mode::Raw).parse(text)
}

/// A configurable parser.
#[derive(Clone, Copy)]
pub struct Parser<'a> {
    mode: Mode,
    algebra: &'a dyn Algebra,
}

impl Parser<'static> {
    pub fn new() -> Self {
        Self {
            mode: Mode::Eval,
            algebra: &DefaultAlgebra,
        }
    }
}

impl Default for Parser<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds nodes through `algebra` instead of the default.
    pub fn with_algebra<'b>(self, algebra: &'b dyn Algebra) -> Parser<'b> {
        Parser {
            mode: self.mode,
            algebra,
        }
    }

    pub fn parse(&self, text: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(ParseError::new(ParseErrorKind::Empty, 0));
        }
        let mut state = ParseState {
            parser: self,
            tokens: &tokens,
            ix: 0,
            end: text.len(),
        };
        let expr = state.expr()?;
        match state.peek() {
            None => Ok(expr),
            Some((position, Token::RParen)) => Err(ParseError::new(
                ParseErrorKind::UnbalancedParenthesis,
                position,
            )),
            Some((position, token)) => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken(token.to_string()),
                position,
            )),
        }
    }

    fn dual(&self, op: Op, mut operands: Vec<Expr>) -> Expr {
        match operands.len() {
            1 => operands.remove(0),
            _ => self.algebra.dual(op, operands, self.mode),
        }
    }
}

impl<'a> fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Parser").field("mode", &self.mode).finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    PrefixNot,
    PostfixNot,
    And,
    Or,
    LParen,
    RParen,
    Int(i64),
    Ident(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PrefixNot => write!(f, "~"),
            Self::PostfixNot => write!(f, "'"),
            Self::And => write!(f, "*"),
            Self::Or => write!(f, "+"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Int(value) => write!(f, "{}", value),
            Self::Ident(name) => write!(f, "{}", name),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((position, ch)) = chars.next() {
        let token = match ch {
            ch if ch.is_whitespace() => continue,
            '~' | '¬' | '!' => Token::PrefixNot,
            '\'' => Token::PostfixNot,
            '*' | '.' | '∙' | '^' | '∧' => Token::And,
            '+' | '∨' => Token::Or,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '0'..='9' => {
                let mut end = position + ch.len_utf8();
                while let Some(&(next, '0'..='9')) = chars.peek() {
                    end = next + 1;
                    chars.next();
                }
                let digits = &text[position..end];
                let value = digits.parse().map_err(|_| {
                    ParseError::new(ParseErrorKind::UnexpectedToken(digits.to_owned()), position)
                })?;
                Token::Int(value)
            }
            ch if ch.is_ascii_alphabetic() || ch == '_' => {
                let mut end = position + 1;
                while let Some(&(next, ch)) = chars.peek() {
                    if !(ch.is_ascii_alphanumeric() || ch == '_') {
                        break;
                    }
                    end = next + 1;
                    chars.next();
                }
                Token::Ident(text[position..end].to_owned())
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter(other),
                    position,
                ))
            }
        };
        tokens.push((position, token));
    }
    Ok(tokens)
}

struct ParseState<'p, 'a> {
    parser: &'p Parser<'a>,
    tokens: &'p [(usize, Token)],
    ix: usize,
    end: usize,
}

impl<'p, 'a> ParseState<'p, 'a> {
    fn peek(&self) -> Option<(usize, &'p Token)> {
        self.tokens
            .get(self.ix)
            .map(|(position, token)| (*position, token))
    }

    fn eat(&mut self, expected: &Token) -> bool {
        match self.peek() {
            Some((_, token)) if token == expected => {
                self.ix += 1;
                true
            }
            _ => false,
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut terms = vec![self.term()?];
        while self.eat(&Token::Or) {
            terms.push(self.term()?);
        }
        Ok(self.parser.dual(Op::Or, terms))
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut factors = vec![self.factor()?];
        while self.eat(&Token::And) {
            factors.push(self.factor()?);
        }
        Ok(self.parser.dual(Op::And, factors))
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let alg = self.parser.algebra;
        if self.eat(&Token::PrefixNot) {
            let operand = self.factor()?;
            return Ok(alg.not(operand, self.parser.mode));
        }
        let mut expr = self.primary()?;
        while self.eat(&Token::PostfixNot) {
            expr = alg.not(expr, self.parser.mode);
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let alg = self.parser.algebra;
        let (position, token) = match self.peek() {
            Some(next) => next,
            None => {
                let kind = match self.ix.checked_sub(1).map(|ix| &self.tokens[ix].1) {
                    Some(Token::LParen) => ParseErrorKind::UnbalancedParenthesis,
                    _ => ParseErrorKind::DanglingOperator,
                };
                return Err(ParseError::new(kind, self.end));
            }
        };
        self.ix += 1;
        match token {
            Token::Int(0) => Ok(alg.truth(false)),
            Token::Int(1) => Ok(alg.truth(true)),
            Token::Int(value) => Ok(alg.symbol(SymbolArg::Int(*value))),
            Token::Ident(name) => Ok(alg.symbol(SymbolArg::Name(name.clone()))),
            Token::LParen => {
                let inner = self.expr()?;
                match self.peek() {
                    Some((_, Token::RParen)) => {
                        self.ix += 1;
                        Ok(inner)
                    }
                    None => Err(ParseError::new(
                        ParseErrorKind::UnbalancedParenthesis,
                        position,
                    )),
                    Some((position, token)) => Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken(token.to_string()),
                        position,
                    )),
                }
            }
            Token::RParen => {
                let depth = self.tokens[..self.ix - 1]
                    .iter()
                    .map(|(_, token)| match token {
                        Token::LParen => 1,
                        Token::RParen => -1,
                        _ => 0,
                    })
                    .sum::<i32>();
                let kind = if depth > 0 {
                    ParseErrorKind::UnexpectedToken(token.to_string())
                } else {
                    ParseErrorKind::UnbalancedParenthesis
                };
                Err(ParseError::new(kind, position))
            }
            Token::And | Token::Or | Token::PostfixNot | Token::PrefixNot => Err(
                ParseError::new(ParseErrorKind::DanglingOperator, position),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        expr::{symbols, FALSE, TRUE},
        proptest_helpers::raw_expr_strategy,
    };
    use proptest::prelude::*;
    use test_log::test;

    #[test]
    fn test_parse() {
        let [a, b, c] = symbols(["a", "b", "c"]);
        let p = |text: &str| parse(text).unwrap();
        let raw = |text: &str| parse_unevaluated(text).unwrap();

        assert_eq!(p("0"), p("(0)"));
        assert!(p("0").ptr_eq(&FALSE));
        assert_eq!(p("1"), p("(1)"));
        assert!(p("1").ptr_eq(&TRUE));
        assert_eq!(p("a"), p("(a)"));
        assert_eq!(p("a"), a);
        assert_eq!(p("~a"), p("~(a)"));
        assert_eq!(p("~a"), p("(~a)"));
        assert_eq!(p("~a"), !&a);
        assert_eq!(p("~~a"), !!&a);
        assert_eq!(p("a*b"), &a * &b);
        assert_eq!(p("~a*b"), !&a * &b);
        assert_eq!(p("a*~b"), &a * !&b);

        let and = Expr::and([a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(p("a*b*c"), and);
        assert_eq!(raw("a*b*c"), and);
        assert_eq!(raw("a*b*c").operands().len(), 3);
        let and = Expr::and([!&a, !&b, !&c]).unwrap();
        assert_eq!(p("~a*~b*~c"), and);
        assert_eq!(raw("~a*~b*~c"), and);

        assert_eq!(p("a+b"), &a + &b);
        assert_eq!(p("~a+b"), !&a + &b);
        assert_eq!(p("a+~b"), &a + !&b);
        let or = Expr::or([a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(p("a+b+c"), or);
        assert_eq!(raw("a+b+c"), or);
        assert_eq!(p("~a+~b+~c"), Expr::or([!&a, !&b, !&c]).unwrap());

        assert_eq!(p("(a+b)"), &a + &b);
        assert_eq!(p("a*(a+b)"), &a * (&a + &b));
        assert_eq!(p("a*(a+~b)"), &a * (&a + !&b));
        let expected = (&a * &b) + (&b * ((&c + &a) * (&b + (&c * &a))));
        assert_eq!(p("(a*b)+(b*((c+a)*(b+(c*a))))"), expected);
        assert_eq!(p("a*b + b*(c+a)*(b+c*a)"), expected);
    }

    #[test]
    fn test_glyphs() {
        let [a, b] = symbols(["A", "B"]);
        let and = &a * &b;
        for text in ["A*B", "A∙B", "A.B", "A^B", "A∧B"] {
            assert_eq!(parse(text).unwrap(), and, "{}", text);
        }
        let or = &a + &b;
        for text in ["A+B", "A∨B"] {
            assert_eq!(parse(text).unwrap(), or, "{}", text);
        }
        let not = !&a;
        for text in ["A'", "~A", "¬A", "!A"] {
            assert_eq!(parse(text).unwrap(), not, "{}", text);
        }
    }

    #[test]
    fn test_symbols_and_postfix() {
        assert_eq!(parse("x_1").unwrap(), Expr::symbol("x_1"));
        assert_eq!(parse("_tmp").unwrap(), Expr::symbol("_tmp"));
        assert_eq!(parse("42").unwrap(), Expr::symbol(42));
        assert_eq!(
            parse_unevaluated("(a*b)''").unwrap().to_string(),
            "(a∙b)''"
        );
        assert_eq!(parse("~a'").unwrap(), Expr::symbol("a"));
    }

    fn error_kind(text: &str) -> ParseErrorKind {
        parse(text).unwrap_err().kind().clone()
    }

    #[test]
    fn test_incorrect() {
        assert_eq!(error_kind("A)"), ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(error_kind("(A"), ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(error_kind("("), ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(error_kind("-"), ParseErrorKind::UnexpectedCharacter('-'));
        assert_eq!(error_kind(""), ParseErrorKind::Empty);
        assert_eq!(error_kind("   "), ParseErrorKind::Empty);
        assert_eq!(error_kind("a+"), ParseErrorKind::DanglingOperator);
        assert_eq!(error_kind("*a"), ParseErrorKind::DanglingOperator);
        assert_eq!(error_kind("~"), ParseErrorKind::DanglingOperator);
        assert_eq!(
            error_kind("a b"),
            ParseErrorKind::UnexpectedToken("b".to_owned())
        );
        assert_eq!(
            error_kind("(a))"),
            ParseErrorKind::UnbalancedParenthesis
        );

        let err = parse("a + $").unwrap_err();
        assert_eq!(err.position(), 4);
        assert_eq!(err.to_string(), "syntax error at offset 4: unexpected character '$'");
    }

    proptest! {
        #[test]
        fn proptest_round_trip(raw in raw_expr_strategy()) {
            let evaluated = raw.eval();
            let printed = evaluated.to_string();
            prop_assert_eq!(parse(&printed).unwrap(), evaluated, "printed as {}", printed);

            // Printing loses the nesting of same-operator nodes.
            let printed = raw.to_string();
            prop_assert_eq!(
                parse_unevaluated(&printed).unwrap(),
                raw.flatten(),
                "printed as {}",
                printed
            );
        }
    }
}
