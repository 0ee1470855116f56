// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use proptest::{
    strategy::{Strategy, ValueTree},
    test_runner::{Config, RngAlgorithm, TestRng, TestRunner},
};
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Generates values from proptest strategies, deterministically for a given seed.
#[derive(Debug)]
pub struct ValueGenerator {
    runner: TestRunner,
}

impl ValueGenerator {
    /// Creates a generator whose output depends only on `seed`.
    pub fn from_seed(seed: impl AsRef<[u8]>) -> Self {
        let seed = seed.as_ref();
        // ChaCha takes 32 bytes: four 64-bit hashes of the seed.
        let mut bytes = [0_u8; 32];
        for (ix, chunk) in bytes.chunks_exact_mut(8).enumerate() {
            let mut hasher = XxHash64::with_seed(ix as u64);
            hasher.write(seed);
            chunk.copy_from_slice(&hasher.finish().to_le_bytes());
        }
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &bytes);
        Self {
            runner: TestRunner::new_with_rng(Config::default(), rng),
        }
    }

    /// Forks a generator off this one. Advances this generator's state.
    pub fn partial_clone(&mut self) -> Self {
        Self {
            runner: TestRunner::new_with_rng(self.runner.config().clone(), self.runner.new_rng()),
        }
    }

    /// Generates a single value from `strategy`.
    pub fn generate<S: Strategy>(&mut self, strategy: S) -> S::Value {
        strategy
            .new_tree(&mut self.runner)
            .expect("fixture strategies do not reject values")
            .current()
    }
}
