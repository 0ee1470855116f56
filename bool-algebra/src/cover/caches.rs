// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::Cube;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

/// Lazily computed data about a cover. Covers are immutable, so nothing is invalidated.
#[derive(Clone, Debug, Default)]
pub(super) struct CoverCache {
    columns: OnceCell<ColumnSummary>,
}

impl CoverCache {
    pub(super) fn columns(&self, width: usize, elements: &BTreeSet<Cube>) -> &ColumnSummary {
        self.columns
            .get_or_init(|| ColumnSummary::new(width, elements))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct ColumnSummary {
    columns: Vec<ColumnData>,
}

impl ColumnSummary {
    fn new(width: usize, elements: &BTreeSet<Cube>) -> Self {
        let mut columns = vec![ColumnData::default(); width];
        for element in elements {
            for (column, value) in columns.iter_mut().zip(&element.input) {
                match value {
                    Some(true) => column.ones += 1,
                    Some(false) => column.zeroes += 1,
                    None => {}
                }
            }
        }
        Self { columns }
    }

    /// The binate column with the most literals. Ties go to the lowest index.
    pub(super) fn most_binate(&self) -> Option<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_unate())
            .rev()
            .max_by_key(|(_, c)| c.ones + c.zeroes)
            .map(|(ix, _)| ix)
    }
}

/// Literal counts in one input column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct ColumnData {
    ones: u32,
    zeroes: u32,
}

impl ColumnData {
    /// Only one polarity appears, if any.
    #[inline]
    fn is_unate(self) -> bool {
        self.ones == 0 || self.zeroes == 0
    }
}
