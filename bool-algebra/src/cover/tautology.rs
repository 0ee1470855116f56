// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cover::Cover;

impl Cover {
    /// Returns true if this cover, read as a sum of products, is true for every input.
    pub fn is_tautology(&self) -> bool {
        // The empty cover is not a tautology.
        if self.is_empty() {
            return false;
        }

        // The tautological cube is present in this cover.
        if self.contains_universe() {
            return true;
        }

        // A unate cover is a tautology iff it contains the universe cube, which was checked
        // above. Otherwise split on the most binate column.
        match self.clone().make_unate_or_select_binate() {
            Ok(_) => false,
            Err((cover, max_binate_ix)) => {
                let expansion = cover.shannon_expansion(max_binate_ix);
                expansion.positive().is_tautology() && expansion.negative().is_tautology()
            }
        }
    }

    #[cfg(test)]
    fn is_tautology_exhaustive(&self) -> bool {
        let width = self.width();
        (0..2_u32.pow(width as u32)).all(|input_bits| {
            let values: Vec<_> = (0..width).map(|bit| (input_bits >> bit) & 1 == 1).collect();
            self.evaluate(&values)
        })
    }
}
