// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Truth tables.

use crate::{
    algebra::DefaultAlgebra,
    errors::{ConstructionError, Error},
    expr::{Expr, Operand},
    rewrite, subs,
};
use std::collections::BTreeMap;

/// One assignment of the symbols of an expression, with the resulting value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthRow {
    /// Each symbol mapped to `TRUE` or `FALSE`.
    pub assignment: BTreeMap<Expr, Expr>,
    /// The evaluated expression under `assignment`.
    pub value: Expr,
}

/// A [`TruthRow`] rendered with printed forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringRow {
    /// Symbols and their values, in canonical symbol order.
    pub assignment: Vec<(String, String)>,
    pub value: String,
}

/// Returns one row per assignment of the symbols of `value`.
///
/// Symbols are taken in canonical order. The first symbol varies slowest and the all-`FALSE`
/// assignment comes first. A constant yields a single row mapping itself to itself.
///
/// Returns [`ConstructionError::TooManySymbols`] if the rows cannot be counted in a `usize`.
pub fn truth_table(value: impl Into<Operand>) -> Result<Vec<TruthRow>, Error> {
    let expr = Expr::coerce(value)?;
    if expr.is_base() {
        let assignment = std::iter::once((expr.clone(), expr.clone())).collect();
        return Ok(vec![TruthRow {
            assignment,
            value: expr,
        }]);
    }

    let symbols: Vec<Expr> = expr.symbols().into_iter().collect();
    let count = symbols.len();
    let row_count = u32::try_from(count)
        .ok()
        .and_then(|shift| 1_usize.checked_shl(shift))
        .ok_or(ConstructionError::TooManySymbols { count })?;

    let rows = (0..row_count)
        .map(|row| {
            let assignment: BTreeMap<Expr, Expr> = symbols
                .iter()
                .enumerate()
                .map(|(ix, symbol)| {
                    let bit = (row >> (count - 1 - ix)) & 1 == 1;
                    (symbol.clone(), Expr::truth(bit))
                })
                .collect();
            let substituted = subs::subs(&DefaultAlgebra, &expr, &assignment);
            let value = rewrite::eval(&DefaultAlgebra, &substituted);
            TruthRow { assignment, value }
        })
        .collect();
    Ok(rows)
}

/// Like [`truth_table`], with symbols and values rendered as text.
pub fn truth_table_strings(value: impl Into<Operand>) -> Result<Vec<StringRow>, Error> {
    let rows = truth_table(value)?;
    Ok(rows
        .into_iter()
        .map(|row| StringRow {
            assignment: row
                .assignment
                .iter()
                .map(|(symbol, value)| (symbol.to_string(), value.to_string()))
                .collect(),
            value: row.value.to_string(),
        })
        .collect())
}
