// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for exercising the evaluator on checked-in and generated formulas.

mod all;
mod value_generator;

pub use all::*;
pub use value_generator::*;
