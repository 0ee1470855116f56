// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::Cube};
use log::{debug, trace};
use std::{cmp::Reverse, collections::BTreeSet};

/// Largest number of columns for which a minimum cover is searched exactly. Wider covers
/// get an irredundant cover instead.
const MAX_EXACT_COLUMNS: usize = 16;

impl Cover {
    /// Computes all prime implicants of this cover by iterated consensus.
    ///
    /// The result depends only on the function the cover represents, not on the cubes it
    /// happens to be written with.
    pub fn prime_implicants(&self) -> Self {
        let mut current = self.single_cube_containment();
        loop {
            let consensus = current.consensus(&current);
            let next = (&current | &consensus).single_cube_containment();
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Returns a smallest subset of the prime implicants that still covers this function.
    ///
    /// Among covers with the fewest cubes, the one with the fewest literals wins. The search
    /// only looks at the primes, so equivalent covers always get the same answer.
    ///
    /// Beyond 16 columns with literals, returns an irredundant subset of the primes
    /// instead, which need not be the smallest.
    pub fn minimum_cover(&self) -> Self {
        let primes = self.prime_implicants();
        if primes.contains_universe() {
            return Cover::new(self.width(), [Cube::universe(self.width())]);
        }

        let candidates: Vec<&Cube> = primes.elements().iter().collect();
        let table = match CoverTable::new(&candidates) {
            Some(table) => table,
            None => {
                debug!(
                    "{} primes over more than {} columns, keeping an irredundant cover",
                    candidates.len(),
                    MAX_EXACT_COLUMNS
                );
                return primes.irredundant();
            }
        };
        let chosen = table.solve();
        trace!(
            "{} primes, {} distinct rows, chose {:?}",
            candidates.len(),
            table.rows.len(),
            chosen
        );
        Cover::new(
            self.width(),
            chosen.into_iter().map(|ix| candidates[ix].clone()),
        )
    }

    /// Drops cubes covered by the rest, last cube first.
    fn irredundant(&self) -> Self {
        let mut kept = self.clone();
        for cube in self.elements().iter().rev() {
            let rest = kept.without(cube);
            if rest.covers(cube) {
                kept = rest;
            }
        }
        kept
    }
}

/// The covering problem for a set of primes: every minterm of the function must be
/// covered by some chosen prime.
struct CoverTable {
    /// For each distinct set of primes covering some minterm, the prime indexes in
    /// ascending order.
    rows: Vec<Vec<usize>>,
    /// Literal count of each prime.
    costs: Vec<usize>,
}

impl CoverTable {
    /// Returns `None` if more than [`MAX_EXACT_COLUMNS`] columns carry a literal.
    fn new(primes: &[&Cube]) -> Option<Self> {
        let width = primes.first().map_or(0, |prime| prime.width());
        let columns: Vec<usize> = (0..width)
            .filter(|&ix| primes.iter().any(|prime| prime.input[ix].is_some()))
            .collect();
        if columns.len() > MAX_EXACT_COLUMNS {
            return None;
        }

        // Each prime as a (mask, value) pair over the columns in use.
        let masks: Vec<(u32, u32)> = primes
            .iter()
            .map(|prime| {
                columns
                    .iter()
                    .enumerate()
                    .fold((0, 0), |(mask, value), (bit, &column)| {
                        match prime.input[column] {
                            Some(polarity) => {
                                (mask | 1 << bit, value | u32::from(polarity) << bit)
                            }
                            None => (mask, value),
                        }
                    })
            })
            .collect();

        let all = (1_u32 << columns.len()) - 1;
        let mut minterms = BTreeSet::new();
        for &(mask, value) in &masks {
            // Walk every subset of the free columns.
            let free = all & !mask;
            let mut subset = free;
            loop {
                minterms.insert(value | subset);
                if subset == 0 {
                    break;
                }
                subset = (subset - 1) & free;
            }
        }

        let rows: BTreeSet<Vec<usize>> = minterms
            .into_iter()
            .map(|minterm| {
                masks
                    .iter()
                    .enumerate()
                    .filter(|&(_, &(mask, value))| minterm & mask == value)
                    .map(|(ix, _)| ix)
                    .collect()
            })
            .collect();

        Some(Self {
            rows: rows.into_iter().collect(),
            costs: primes.iter().map(|prime| prime.literal_count()).collect(),
        })
    }

    /// Indexes of the chosen primes, ascending.
    fn solve(&self) -> Vec<usize> {
        let mut search = Search {
            table: self,
            chosen: Vec::new(),
            literals: 0,
            best: None,
        };
        search.visit((0..self.rows.len()).collect());

        let mut chosen = search.best.map_or_else(Vec::new, |best| best.chosen);
        chosen.sort_unstable();
        chosen
    }

    #[inline]
    fn covers(&self, row: usize, prime: usize) -> bool {
        self.rows[row].binary_search(&prime).is_ok()
    }
}

struct Best {
    /// Cube count, then literal count.
    cost: (usize, usize),
    chosen: Vec<usize>,
}

/// Depth-first branch and bound over a [`CoverTable`].
struct Search<'a> {
    table: &'a CoverTable,
    chosen: Vec<usize>,
    literals: usize,
    best: Option<Best>,
}

impl<'a> Search<'a> {
    fn visit(&mut self, uncovered: Vec<usize>) {
        if uncovered.is_empty() {
            let cost = (self.chosen.len(), self.literals);
            if self.best.as_ref().map_or(true, |best| cost < best.cost) {
                self.best = Some(Best {
                    cost,
                    chosen: self.chosen.clone(),
                });
            }
            return;
        }
        if let Some(best) = &self.best {
            if self.lower_bound(&uncovered) >= best.cost {
                return;
            }
        }

        // Branch on the row with the fewest primes: one of them must be chosen.
        let table = self.table;
        let row = match uncovered.iter().min_by_key(|&&row| table.rows[row].len()) {
            Some(&row) => row,
            None => return,
        };
        let mut branches = table.rows[row].clone();
        branches.sort_by_cached_key(|&prime| {
            let gain = uncovered
                .iter()
                .filter(|&&other| table.covers(other, prime))
                .count();
            (Reverse(gain), table.costs[prime], prime)
        });

        for prime in branches {
            let remaining = uncovered
                .iter()
                .copied()
                .filter(|&other| !table.covers(other, prime))
                .collect();
            self.chosen.push(prime);
            self.literals += table.costs[prime];
            self.visit(remaining);
            self.literals -= table.costs[prime];
            self.chosen.pop();
        }
    }

    /// Rows that share no prime each need a different one, so they bound what any
    /// completion of the current choice costs.
    fn lower_bound(&self, uncovered: &[usize]) -> (usize, usize) {
        let table = self.table;
        let mut rows = uncovered.to_vec();
        rows.sort_by_key(|&row| (table.rows[row].len(), row));

        let mut used = vec![false; table.costs.len()];
        let (mut cubes, mut literals) = (self.chosen.len(), self.literals);
        for row in rows {
            let primes = &table.rows[row];
            if primes.iter().any(|&prime| used[prime]) {
                continue;
            }
            cubes += 1;
            literals += primes
                .iter()
                .map(|&prime| table.costs[prime])
                .min()
                .unwrap_or(0);
            for &prime in primes {
                used[prime] = true;
            }
        }
        (cubes, literals)
    }
}
