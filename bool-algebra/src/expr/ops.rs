// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator overloads. All of them build evaluated nodes.

use crate::{
    algebra::DefaultAlgebra,
    expr::{Expr, Op},
    rewrite,
};
use std::ops::{Add, BitAnd, BitOr, Mul, Not};

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        rewrite::simplify_not(&DefaultAlgebra, self)
    }
}

impl<'a> Not for &'a Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        rewrite::simplify_not(&DefaultAlgebra, self.clone())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Self::Output {
                rewrite::simplify_dual(&DefaultAlgebra, $op, vec![self, rhs])
            }
        }

        impl<'a> $trait<&'a Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &'a Expr) -> Self::Output {
                rewrite::simplify_dual(&DefaultAlgebra, $op, vec![self, rhs.clone()])
            }
        }

        impl<'a> $trait<Expr> for &'a Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Self::Output {
                rewrite::simplify_dual(&DefaultAlgebra, $op, vec![self.clone(), rhs])
            }
        }

        impl<'a, 'b> $trait<&'a Expr> for &'b Expr {
            type Output = Expr;

            fn $method(self, rhs: &'a Expr) -> Self::Output {
                rewrite::simplify_dual(&DefaultAlgebra, $op, vec![self.clone(), rhs.clone()])
            }
        }
    };
}

impl_binary_op!(Mul, mul, Op::And);
impl_binary_op!(BitAnd, bitand, Op::And);
impl_binary_op!(Add, add, Op::Or);
impl_binary_op!(BitOr, bitor, Op::Or);
