// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cubes: single rows of a two-level cover.
//!
//! A cube assigns each symbol of an AND or OR node one of three states: the symbol
//! appears positively (`Some(true)`), negated (`Some(false)`), or not at all
//! (`None`, "don't care"). Read as a product, a cube is an AND of literals; read
//! as a clause, it is an OR of literals. All the operations here are symmetric
//! under that duality, so the cover engine never needs to know which reading
//! is in use.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cube {
    pub input: Vec<Option<bool>>,
}

impl Cube {
    #[inline]
    pub fn new(input: Vec<Option<bool>>) -> Self {
        Self { input }
    }

    // Uses the representation in the Espresso book.
    #[cfg(test)]
    pub(crate) fn from_numeric(input_numeric: &[u8]) -> Self {
        let input = input_numeric
            .iter()
            .map(|val| match val {
                0 => Some(false),
                1 => Some(true),
                2 => None,
                other => panic!("invalid cube value {}", other),
            })
            .collect();
        Self { input }
    }

    /// The cube with no literals: the annihilator of the enclosing operator.
    pub fn universe(width: usize) -> Self {
        Self {
            input: vec![None; width],
        }
    }

    pub fn positive_half_space(width: usize, input_ix: usize) -> Self {
        let mut input = vec![None; width];
        input[input_ix] = Some(true);
        Self { input }
    }

    pub fn negative_half_space(width: usize, input_ix: usize) -> Self {
        let mut input = vec![None; width];
        input[input_ix] = Some(false);
        Self { input }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.input.len()
    }

    /// Number of literals in this cube.
    #[inline]
    pub fn literal_count(&self) -> usize {
        self.input.iter().filter(|c| c.is_some()).count()
    }

    #[inline]
    pub fn is_universe(&self) -> bool {
        self.input.iter().all(|c| c.is_none())
    }

    #[inline]
    pub fn algebraic_display(&self) -> CubeAlgebraicDisplay<'_> {
        CubeAlgebraicDisplay::new(self)
    }

    pub fn strictly_contains(&self, other: &Cube) -> bool {
        let mut any_strictly = false;
        let all_contain = self.input.iter().zip(&other.input).all(|(&c, &d)| {
            match CubeContains::input_contains(c, d) {
                CubeContains::Strictly => {
                    any_strictly = true;
                    true
                }
                CubeContains::Contains => true,
                CubeContains::DoesNotContain => false,
            }
        });
        all_contain && any_strictly
    }

    /// Number of positions where `self` and `other` carry opposite literals.
    pub fn distance(&self, other: &Cube) -> usize {
        self.input
            .iter()
            .zip(&other.input)
            .filter(|(&c, &d)| meet(c, d).is_none())
            .count()
    }

    /// The cube implied by `self` and `other` together, if they are at distance at most one.
    ///
    /// At distance one the conflicting position is dropped; at distance zero this is the
    /// intersection.
    pub fn consensus(&self, other: &Cube) -> Option<Self> {
        match self.distance(other) {
            0 => self.intersection(other),
            1 => Some(Self {
                input: self
                    .input
                    .iter()
                    .zip(&other.input)
                    .map(|(&c, &d)| meet(c, d).flatten())
                    .collect(),
            }),
            _ => None,
        }
    }

    pub fn intersection(&self, other: &Cube) -> Option<Self> {
        let input = self
            .input
            .iter()
            .zip(&other.input)
            .map(|(&c, &d)| meet(c, d))
            .collect::<Option<_>>()?;
        Some(Self { input })
    }

    /// Restricts this cube to the subspace `p`, or `None` if they do not meet.
    pub fn cofactor(&self, p: &Self) -> Option<Self> {
        let input = self
            .input
            .iter()
            .zip(&p.input)
            .map(|(&c, &p_k)| meet(c, p_k).map(|_| if p_k.is_some() { None } else { c }))
            .collect::<Option<_>>()?;
        Some(Self { input })
    }

    /// Evaluates the cube as a product of literals.
    #[cfg(test)]
    pub(crate) fn evaluate(&self, values: &[bool]) -> bool {
        self.input
            .iter()
            .zip(values)
            .all(|(variable, value)| match variable {
                Some(v) => v == value,
                None => true,
            })
    }
}

/// Intersects one position. `None` if the literals conflict.
#[inline]
fn meet(c: Option<bool>, d: Option<bool>) -> Option<Option<bool>> {
    match (c, d) {
        (Some(x), Some(y)) if x != y => None,
        (Some(x), _) | (_, Some(x)) => Some(Some(x)),
        (None, None) => Some(None),
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum CubeContains {
    DoesNotContain,
    Contains,
    Strictly,
}

impl CubeContains {
    fn input_contains(c: Option<bool>, d: Option<bool>) -> Self {
        match (c, d) {
            (None, Some(_)) => Self::Strictly,
            _ if c == d => Self::Contains,
            _ => Self::DoesNotContain,
        }
    }
}

pub struct CubeAlgebraicDisplay<'a> {
    cube: &'a Cube,
}

impl<'a> CubeAlgebraicDisplay<'a> {
    pub fn new(cube: &'a Cube) -> Self {
        Self { cube }
    }
}

impl<'a> fmt::Display for CubeAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cube.is_universe() {
            return write!(f, "1");
        }
        for (input_ix, input) in self.cube.input.iter().enumerate() {
            match input {
                Some(true) => write!(f, "{}", AlgebraicSymbol::input(input_ix))?,
                Some(false) => write!(f, "{}'", AlgebraicSymbol::input(input_ix))?,
                None => {}
            };
        }
        Ok(())
    }
}

const INPUT_ALGEBRAIC_SYMBOLS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Column name used when printing cubes: `a` to `z`, then `ba`, `bb` and so on.
#[derive(Debug)]
pub(crate) enum AlgebraicSymbol {
    Char(char),
    String(String),
}

impl AlgebraicSymbol {
    pub(crate) fn input(ix: usize) -> Self {
        if ix < 26 {
            return Self::Char(INPUT_ALGEBRAIC_SYMBOLS[ix]);
        }
        let rest = ix / 26;
        let last_ch = INPUT_ALGEBRAIC_SYMBOLS[ix % 26];

        match Self::input(rest) {
            Self::Char(ch) => Self::String(format!("{}{}", ch, last_ch)),
            Self::String(mut s) => {
                s.push(last_ch);
                Self::String(s)
            }
        }
    }
}

impl fmt::Display for AlgebraicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", *ch),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}
