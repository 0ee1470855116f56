// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    algebra::{Algebra, DefaultAlgebra, Mode},
    cover::Cover,
    cube::Cube,
    expr::{Expr, Op},
};
use proptest::prelude::*;

const SYMBOL_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const DEFAULT_WIDTH: usize = 5;

impl Arbitrary for Expr {
    /// The mode nodes are built with.
    type Parameters = Mode;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(mode: Self::Parameters) -> Self::Strategy {
        let leaf = prop_oneof![
            1 => any::<bool>().prop_map(Expr::truth),
            4 => prop::sample::select(SYMBOL_NAMES).prop_map(Expr::symbol),
        ];
        leaf.prop_recursive(4, 24, 4, move |inner| {
            prop_oneof![
                inner
                    .clone()
                    .prop_map(move |operand| DefaultAlgebra.not(operand, mode)),
                (
                    prop_oneof![Just(Op::And), Just(Op::Or)],
                    prop::collection::vec(inner, 2..4),
                )
                    .prop_map(move |(op, operands)| DefaultAlgebra.dual(op, operands, mode)),
            ]
        })
        .boxed()
    }
}

/// Expressions over the symbols `a` to `e`, kept exactly as generated.
pub fn raw_expr_strategy() -> BoxedStrategy<Expr> {
    any_with::<Expr>(Mode::Raw)
}

impl Arbitrary for Cube {
    /// Width, five if not given.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(width: Self::Parameters) -> Self::Strategy {
        let width = width.unwrap_or(DEFAULT_WIDTH);
        prop::collection::vec(any::<Option<bool>>(), width)
            .prop_map(Cube::new)
            .boxed()
    }
}

impl Arbitrary for Cover {
    /// Width and maximum cube count.
    type Parameters = Option<(usize, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (width, max_size) = params.unwrap_or((DEFAULT_WIDTH, 12));
        prop::collection::btree_set(any_with::<Cube>(Some(width)), 0..max_size)
            .prop_map(move |elements| Cover::new(width, elements))
            .boxed()
    }
}
