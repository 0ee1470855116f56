// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Symbolic Boolean algebra.
//!
//! Expressions are immutable trees of constants, symbols, NOT, AND and OR. Trees built in
//! evaluated mode are simplified as they are constructed, and redundant terms collapse
//! into a canonical tree:
//!
//! ```
//! use bool_algebra::parse;
//!
//! let left = parse("a*b + a*~b").unwrap();
//! let right = parse("a").unwrap();
//! assert_eq!(left, right);
//! ```
//!
//! Trees can also be built unevaluated with [`parse_unevaluated`] or [`Mode::Raw`], and
//! then reshaped with the transforms in [`rewrite`].

pub mod algebra;
pub mod cover;
pub mod cube;
pub mod errors;
pub mod expr;
pub mod parser;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
pub mod rewrite;
pub mod subs;
pub mod truth_table;

pub use algebra::{Algebra, DefaultAlgebra, Mode};
pub use errors::*;
pub use expr::{symbols, Expr, ExprKind, Op, Operand, SymbolArg, FALSE, TRUE};
pub use parser::{parse, parse_unevaluated, Parser};
pub use truth_table::{truth_table, truth_table_strings, StringRow, TruthRow};

/// Returns the terms of the normal form of `expr` with respect to `op`.
///
/// See [`rewrite::normalize`].
pub fn normalize(op: Op, expr: &Expr) -> Vec<Expr> {
    rewrite::normalize(&DefaultAlgebra, op, expr)
}
