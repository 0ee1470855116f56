// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The canonical order on expressions.
//!
//! Leading NOTs are stripped first. The remaining cores compare by class
//! (constants, then symbols, then AND, then OR) and within a class by content.
//! Ties are broken by the number of NOTs stripped, which puts every symbol
//! directly before its negation.

use crate::expr::{Expr, ExprKind, Op};
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

impl Expr {
    /// Strips leading NOTs, returning the first non-NOT node and how many were removed.
    pub(crate) fn strip_not(&self) -> (&Expr, usize) {
        let mut core = self;
        let mut depth = 0;
        while let ExprKind::Not(operand) = core.kind() {
            core = operand;
            depth += 1;
        }
        (core, depth)
    }

    fn class_rank(&self) -> u8 {
        match self.kind() {
            ExprKind::Base(_) => 0,
            ExprKind::Symbol(_) => 1,
            ExprKind::Not(_) => 2,
            ExprKind::Dual(Op::And, _) => 3,
            ExprKind::Dual(Op::Or, _) => 4,
        }
    }
}

fn cmp_core(a: &Expr, b: &Expr) -> Ordering {
    match (a.kind(), b.kind()) {
        (ExprKind::Base(x), ExprKind::Base(y)) => x.cmp(y),
        (ExprKind::Symbol(x), ExprKind::Symbol(y)) => x.cmp(y),
        (ExprKind::Dual(x, _), ExprKind::Dual(y, _)) if x == y => {
            let (a, b) = (a.sorted_operands(), b.sorted_operands());
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        _ => a.class_rank().cmp(&b.class_rank()),
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }
        let (a, a_depth) = self.strip_not();
        let (b, b_depth) = other.strip_not();
        cmp_core(a, b).then(a_depth.cmp(&b_depth))
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (core, depth) = self.strip_not();
        depth.hash(state);
        match core.kind() {
            ExprKind::Base(value) => (0_u8, value).hash(state),
            ExprKind::Symbol(arg) => (1_u8, arg).hash(state),
            ExprKind::Dual(op, _) => {
                (2_u8, op).hash(state);
                core.sorted_operands().hash(state);
            }
            ExprKind::Not(_) => unreachable!("leading NOTs were stripped"),
        }
    }
}
