// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use fixture_details::AllFixtures;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log every formula checked.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Check checked-in formulas and a batch of generated ones.
    Check {
        /// Number of generated formulas.
        #[clap(long, short, default_value_t = 256)]
        count: usize,
    },
    /// Summarize how generated formulas simplify.
    Stats {
        #[clap(long, short, default_value_t = 256)]
        count: usize,
    },
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        let fixtures = AllFixtures::get();
        match self {
            Self::Check { count } => fixtures.check(count),
            Self::Stats { count } => fixtures.stats(count),
        }
    }
}
