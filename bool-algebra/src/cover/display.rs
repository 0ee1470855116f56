// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::Cube};
use itertools::{Itertools, Position};
use std::fmt;

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&format_args!("{}", self.algebraic_display()))
            .finish()
    }
}

/// Prints a cover as a sum of products over the column names `a`, `b`, `c` and so on.
pub struct CoverAlgebraicDisplay<'a> {
    elements: Vec<&'a Cube>,
}

impl<'a> CoverAlgebraicDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        let mut elements: Vec<_> = cover.elements().iter().collect();
        // Within a column `a` comes first, then `a'`, then cubes without a.
        elements.sort_by_cached_key(|cube| {
            cube.input.iter().map(|&x| column_rank(x)).collect::<Vec<_>>()
        });
        Self { elements }
    }
}

fn column_rank(value: Option<bool>) -> u8 {
    match value {
        Some(true) => 0,
        Some(false) => 1,
        None => 2,
    }
}

impl<'a> fmt::Display for CoverAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "(none)");
        }
        for elem in self.elements.iter().with_position() {
            match elem {
                Position::First(cube) | Position::Middle(cube) => {
                    write!(f, "{} + ", cube.algebraic_display())?;
                }
                Position::Last(cube) | Position::Only(cube) => {
                    write!(f, "{}", cube.algebraic_display())?;
                }
            }
        }
        Ok(())
    }
}
