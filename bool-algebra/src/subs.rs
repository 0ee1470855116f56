// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Substitution of sub-expressions.

use crate::{
    algebra::{Algebra, Mode},
    expr::{Expr, ExprKind},
};
use std::collections::BTreeMap;

/// Replaces every sub-expression of `expr` that is a key of `substitutions` with its value.
///
/// Matching is top-down: a replaced sub-expression is not searched again. Rebuilt nodes
/// keep the mode they were built with, so evaluated nodes are simplified again. Subtrees
/// with nothing to replace are returned as-is.
pub fn subs<A: Algebra + ?Sized>(
    alg: &A,
    expr: &Expr,
    substitutions: &BTreeMap<Expr, Expr>,
) -> Expr {
    if let Some(value) = substitutions.get(expr) {
        return value.clone();
    }
    match expr.kind() {
        ExprKind::Base(_) | ExprKind::Symbol(_) => expr.clone(),
        ExprKind::Not(operand) => {
            let replaced = subs(alg, operand, substitutions);
            if replaced.ptr_eq(operand) {
                expr.clone()
            } else {
                alg.not(replaced, Mode::of(expr))
            }
        }
        ExprKind::Dual(op, operands) => {
            let replaced: Vec<Expr> = operands
                .iter()
                .map(|operand| subs(alg, operand, substitutions))
                .collect();
            if replaced.iter().zip(operands).all(|(new, old)| new.ptr_eq(old)) {
                expr.clone()
            } else {
                alg.dual(*op, replaced, Mode::of(expr))
            }
        }
    }
}
