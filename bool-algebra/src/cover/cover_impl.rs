// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::CoverAlgebraicDisplay, cube::Cube};
use itertools::Itertools;
use std::{collections::BTreeSet, ops::BitOr};

use super::caches::CoverCache;

#[derive(Clone, Default)]
pub struct Cover {
    width: usize,
    elements: BTreeSet<Cube>,
    cache: CoverCache,
}

impl Cover {
    pub fn new(width: usize, elements: impl IntoIterator<Item = Cube>) -> Self {
        let elements: BTreeSet<_> = elements.into_iter().collect();
        debug_assert!(
            elements.iter().all(|cube| cube.width() == width),
            "all cubes must have width {}",
            width
        );
        Self {
            width,
            elements,
            cache: CoverCache::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_numeric(width: usize, numeric: &[&[u8]]) -> Self {
        Self::new(width, numeric.iter().map(|input| Cube::from_numeric(input)))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn elements(&self) -> &BTreeSet<Cube> {
        &self.elements
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of literals over all cubes.
    pub fn literal_count(&self) -> usize {
        self.elements.iter().map(Cube::literal_count).sum()
    }

    #[inline]
    pub fn contains_universe(&self) -> bool {
        self.elements.iter().any(Cube::is_universe)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CoverAlgebraicDisplay<'_> {
        CoverAlgebraicDisplay::new(self)
    }

    pub fn cofactor(&self, p: &Cube) -> Self {
        Self::new(
            self.width,
            self.elements.iter().filter_map(|elem| elem.cofactor(p)),
        )
    }

    /// Returns this cover with `cube` removed.
    pub fn without(&self, cube: &Cube) -> Self {
        Self::new(
            self.width,
            self.elements.iter().filter(|elem| *elem != cube).cloned(),
        )
    }

    /// Returns true if every point of `cube` is covered by this cover.
    pub fn covers(&self, cube: &Cube) -> bool {
        self.cofactor(cube).is_tautology()
    }

    /// Evaluates the cover as a sum of products.
    #[cfg(test)]
    pub(crate) fn evaluate(&self, values: &[bool]) -> bool {
        self.elements.iter().any(|elem| elem.evaluate(values))
    }

    /// Returns the cover back if it is unate, or else the column to split on.
    pub fn make_unate_or_select_binate(self) -> Result<Self, (Self, usize)> {
        match self.cache.columns(self.width, &self.elements).most_binate() {
            None => Ok(self),
            Some(split_ix) => Err((self, split_ix)),
        }
    }

    pub fn single_cube_containment(&self) -> Self {
        let simplified = self
            .elements
            .iter()
            .filter(|elem| {
                let contains = self
                    .elements
                    .iter()
                    .any(|contains| contains.strictly_contains(elem));
                !contains
            })
            .cloned();
        Self::new(self.width, simplified)
    }

    pub fn consensus(&self, other: &Self) -> Self {
        let elements = self
            .elements
            .iter()
            .cartesian_product(other.elements())
            .filter_map(|(c, d)| c.consensus(d));
        Self::new(self.width, elements)
    }

    #[inline]
    pub fn shannon_expansion(&self, split_ix: usize) -> ShannonExpansion {
        ShannonExpansion::new(self, split_ix)
    }

    fn union_impl(&self, other: &Self) -> Self {
        let elements = self.elements.iter().chain(other.elements()).cloned();
        Self::new(self.width, elements)
    }
}

impl BitOr for Cover {
    type Output = Cover;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union_impl(&rhs)
    }
}

impl<'a> BitOr<&'a Cover> for Cover {
    type Output = Cover;

    fn bitor(self, rhs: &'a Cover) -> Self::Output {
        self.union_impl(rhs)
    }
}

impl<'a, 'b> BitOr<&'a Cover> for &'b Cover {
    type Output = Cover;

    fn bitor(self, rhs: &'a Cover) -> Self::Output {
        self.union_impl(rhs)
    }
}

impl PartialEq for Cover {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.elements == other.elements
    }
}

impl Eq for Cover {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShannonExpansion {
    positive: Cover,
    negative: Cover,
}

impl ShannonExpansion {
    pub fn new(cover: &Cover, split_ix: usize) -> Self {
        let width = cover.width();
        let positive = cover.cofactor(&Cube::positive_half_space(width, split_ix));
        let negative = cover.cofactor(&Cube::negative_half_space(width, split_ix));
        Self { positive, negative }
    }

    #[inline]
    pub fn positive(&self) -> &Cover {
        &self.positive
    }

    #[inline]
    pub fn negative(&self) -> &Cover {
        &self.negative
    }
}
