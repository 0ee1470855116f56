// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Node factories.
//!
//! Every node built by the parser, the rewrite engine and substitution goes through an
//! [`Algebra`]. Implement the trait to intercept construction, for example to rename
//! symbols or to count nodes; the provided defaults build plain expressions.

use crate::{
    errors::ConstructionError,
    expr::{Expr, Op, SymbolArg},
    rewrite,
};

/// How a factory builds a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Simplify the node as it is built.
    Eval,
    /// Keep the node exactly as given.
    Raw,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Eval
    }
}

impl Mode {
    /// The mode `expr` was built with.
    #[inline]
    pub fn of(expr: &Expr) -> Self {
        if expr.is_evaluated() {
            Self::Eval
        } else {
            Self::Raw
        }
    }
}

/// Factories for every node kind.
///
/// `and`, `or` and `dual` are only called with at least one operand, so they cannot fail.
/// Fallible construction from arbitrary operand lists goes through [`build_dual`].
pub trait Algebra {
    fn truth(&self, value: bool) -> Expr {
        Expr::truth(value)
    }

    fn symbol(&self, arg: SymbolArg) -> Expr {
        Expr::symbol(arg)
    }

    fn not(&self, operand: Expr, mode: Mode) -> Expr {
        match mode {
            Mode::Eval => rewrite::simplify_not(self, operand),
            Mode::Raw => Expr::raw_not(operand),
        }
    }

    /// Builds an AND node. `operands` is not empty.
    fn and(&self, operands: Vec<Expr>, mode: Mode) -> Expr {
        dual_node(self, Op::And, operands, mode)
    }

    /// Builds an OR node. `operands` is not empty.
    fn or(&self, operands: Vec<Expr>, mode: Mode) -> Expr {
        dual_node(self, Op::Or, operands, mode)
    }

    /// Dispatches to [`Algebra::and`] or [`Algebra::or`].
    fn dual(&self, op: Op, operands: Vec<Expr>, mode: Mode) -> Expr {
        match op {
            Op::And => self.and(operands, mode),
            Op::Or => self.or(operands, mode),
        }
    }
}

/// The algebra used when none is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAlgebra;

impl Algebra for DefaultAlgebra {}

/// Default AND and OR construction. `operands` must not be empty.
pub fn dual_node<A: Algebra + ?Sized>(alg: &A, op: Op, operands: Vec<Expr>, mode: Mode) -> Expr {
    debug_assert!(!operands.is_empty(), "{} node without operands", op);
    match mode {
        Mode::Eval => rewrite::simplify_dual(alg, op, operands),
        Mode::Raw => Expr::raw_dual(op, operands),
    }
}

/// Builds an AND or OR node through `alg`, rejecting an empty operand list.
pub fn build_dual<A: Algebra + ?Sized>(
    alg: &A,
    op: Op,
    operands: Vec<Expr>,
    mode: Mode,
) -> Result<Expr, ConstructionError> {
    if operands.is_empty() {
        return Err(ConstructionError::NoOperands { op });
    }
    Ok(alg.dual(op, operands, mode))
}
