// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types returned by this crate.

use crate::expr::Op;
use std::{error, fmt};

/// An operand could not be turned into an expression, or an operator was given
/// the wrong number of operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// A DualBase operator was given zero operands.
    NoOperands {
        /// The operator being constructed.
        op: Op,
    },

    /// The value has no Boolean interpretation.
    NotCoercible {
        /// A printable description of the rejected value.
        value: String,
    },

    /// An expression has more symbols than a truth table can enumerate.
    TooManySymbols {
        /// The number of distinct symbols.
        count: usize,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NoOperands { op } => write!(f, "{} requires at least one operand", op),
            Self::NotCoercible { value } => {
                write!(f, "value {} cannot be converted to an expression", value)
            }
            Self::TooManySymbols { count } => {
                write!(f, "{} symbols are too many to enumerate", count)
            }
        }
    }
}

impl error::Error for ConstructionError {}

/// Malformed input text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// The kind of syntax error.
    #[inline]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Byte offset into the input at which the error was detected.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "syntax error at offset {}: {}", self.position, self.kind)
    }
}

impl error::Error for ParseError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input contains no tokens.
    Empty,
    /// A `(` without its `)`, or a `)` without its `(`.
    UnbalancedParenthesis,
    /// An operator is missing an operand.
    DanglingOperator,
    /// A character that is not part of the grammar.
    UnexpectedCharacter(char),
    /// A valid token in a position where the grammar does not allow it.
    UnexpectedToken(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty expression"),
            Self::UnbalancedParenthesis => write!(f, "unbalanced parenthesis"),
            Self::DanglingOperator => write!(f, "operator without operand"),
            Self::UnexpectedCharacter(ch) => write!(f, "unexpected character {:?}", ch),
            Self::UnexpectedToken(token) => write!(f, "unexpected token {:?}", token),
        }
    }
}

/// Any error produced while building an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Construction(ConstructionError),
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Construction(err) => write!(f, "{}", err),
            Self::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Construction(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ConstructionError> for Error {
    fn from(err: ConstructionError) -> Self {
        Self::Construction(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}
