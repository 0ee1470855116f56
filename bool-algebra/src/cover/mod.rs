// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-level covers: sets of cubes read as a sum of products or, dually, as a
//! product of clauses.

mod caches;
mod cover_impl;
mod display;
mod primes;
mod tautology;

pub use cover_impl::*;
pub use display::*;
