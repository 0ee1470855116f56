// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    algebra::{Algebra, Mode},
    expr::{Expr, ExprKind, Op},
};
use itertools::Itertools;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// The literals of one term: each symbol with its polarity.
pub(super) type Term = BTreeMap<Expr, bool>;

/// Returns the terms of `expr`'s normal form with respect to `op`, in canonical order.
///
/// For [`Op::And`] the terms are the clauses of a conjunctive normal form, for
/// [`Op::Or`] the products of a disjunctive normal form. Joining the terms with `op`
/// gives an expression equivalent to `expr`. Terms containing both `x` and `~x` are
/// dropped, as are terms whose literals are a strict superset of another term's.
///
/// Distribution is exponential in the number of nested terms.
pub fn normalize<A: Algebra + ?Sized>(alg: &A, op: Op, expr: &Expr) -> Vec<Expr> {
    let terms: BTreeSet<Term> = expand(op, expr).into_iter().collect();
    let minimal: Vec<&Term> = terms
        .iter()
        .filter(|term| {
            !terms
                .iter()
                .any(|other| other.len() < term.len() && subsumes(other, term))
        })
        .collect();
    debug!(
        "normalize {}: {} distinct terms, {} after subsumption",
        op,
        terms.len(),
        minimal.len()
    );

    if minimal.is_empty() {
        return vec![alg.truth(op.identity_value())];
    }

    minimal
        .into_iter()
        .map(|term| build_term(alg, op, term))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Expands `expr` into terms whose `op` is equivalent to it, each term read with
/// `op.dual()`. NOT is pushed down to the symbols, constants are folded away and terms
/// containing both `x` and `~x` are dropped.
///
/// An empty result is the identity of `op`; an empty term is its annihilator.
pub(super) fn expand(op: Op, expr: &Expr) -> Vec<Term> {
    expand_impl(op, expr, false)
}

fn expand_impl(op: Op, expr: &Expr, negated: bool) -> Vec<Term> {
    match expr.kind() {
        ExprKind::Base(value) if (*value != negated) == op.identity_value() => Vec::new(),
        ExprKind::Base(_) => vec![Term::new()],
        ExprKind::Symbol(_) => vec![std::iter::once((expr.clone(), !negated)).collect()],
        ExprKind::Not(operand) => expand_impl(op, operand, !negated),
        ExprKind::Dual(child_op, operands) => {
            // De Morgan: a negated AND is an OR of negated operands.
            let effective = if negated { child_op.dual() } else { *child_op };
            if effective == op {
                return operands
                    .iter()
                    .flat_map(|operand| expand_impl(op, operand, negated))
                    .collect();
            }
            // Distribute: one term per operand, merged.
            operands.iter().fold(vec![Term::new()], |acc, operand| {
                let terms = expand_impl(op, operand, negated);
                acc.iter()
                    .cartesian_product(&terms)
                    .filter_map(|(left, right)| merge(left, right))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
        }
    }
}

/// Joins two terms, or `None` if they hold opposite literals.
fn merge(left: &Term, right: &Term) -> Option<Term> {
    let mut merged = left.clone();
    for (atom, &polarity) in right {
        if *merged.entry(atom.clone()).or_insert(polarity) != polarity {
            return None;
        }
    }
    Some(merged)
}

/// Every literal of `smaller` is in `larger`.
fn subsumes(smaller: &Term, larger: &Term) -> bool {
    smaller
        .iter()
        .all(|(atom, polarity)| larger.get(atom) == Some(polarity))
}

fn build_term<A: Algebra + ?Sized>(alg: &A, op: Op, term: &Term) -> Expr {
    let mut literals: Vec<Expr> = term
        .iter()
        .map(|(atom, &polarity)| {
            if polarity {
                atom.clone()
            } else {
                alg.not(atom.clone(), Mode::Eval)
            }
        })
        .collect();
    match literals.len() {
        0 => alg.truth(!op.identity_value()),
        1 => literals.remove(0),
        _ => alg.dual(op.dual(), literals, Mode::Eval),
    }
}
