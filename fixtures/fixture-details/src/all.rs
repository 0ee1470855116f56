// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::value_generator::ValueGenerator;
use bool_algebra::{parse, proptest_helpers::raw_expr_strategy, truth_table, Expr, ExprKind};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, eyre, WrapErr},
    Result,
};
use log::{debug, info};
use once_cell::sync::Lazy;
use std::fs;

/// A checked-in formula and the expression it must evaluate to.
#[derive(Clone, Debug)]
pub struct FormulaFixture {
    pub line: usize,
    pub input: String,
    pub expected: String,
}

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details lives under fixtures/")
            .join("data");
        Self { dir }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Reads `formulas.txt`: one `input ; expected` pair per line, `#` starts a comment.
    pub fn formulas(&self) -> Result<Vec<FormulaFixture>> {
        let path = self.dir.join("formulas.txt");
        let contents =
            fs::read_to_string(&path).wrap_err_with(|| format!("failed to read {}", path))?;

        let mut fixtures = Vec::new();
        for (ix, line) in contents.lines().enumerate() {
            let line_no = ix + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (input, expected) = line
                .split_once(';')
                .ok_or_else(|| eyre!("{}:{}: missing ';' separator", path, line_no))?;
            fixtures.push(FormulaFixture {
                line: line_no,
                input: input.trim().to_owned(),
                expected: expected.trim().to_owned(),
            });
        }
        Ok(fixtures)
    }

    /// Checks every checked-in formula, then `count` generated ones.
    pub fn check(&self, count: usize) -> Result<()> {
        let formulas = self.formulas()?;
        for fixture in &formulas {
            let actual = parse(&fixture.input)
                .wrap_err_with(|| format!("line {}: failed to parse input", fixture.line))?;
            let expected = parse(&fixture.expected)
                .wrap_err_with(|| format!("line {}: failed to parse expected", fixture.line))?;
            if actual != expected {
                bail!(
                    "line {}: {} evaluated to {}, expected {}",
                    fixture.line,
                    fixture.input,
                    actual,
                    expected
                );
            }
            debug!("line {}: {} => {}", fixture.line, fixture.input, actual);
        }
        info!("{} checked-in formulas evaluate as expected", formulas.len());

        let mut value_gen = ValueGenerator::from_seed("bool-algebra-check");
        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let raw = gen.generate(raw_expr_strategy());
            check_generated(ix, &raw)?;
        }
        info!("{} generated formulas evaluate soundly", count);

        Ok(())
    }

    /// Logs how generated formulas behave under evaluation.
    pub fn stats(&self, count: usize) -> Result<()> {
        let mut value_gen = ValueGenerator::from_seed("bool-algebra-stats");

        let mut tautology_count = 0;
        let mut contradiction_count = 0;
        let mut literal_count = 0;
        let mut raw_nodes = 0;
        let mut evaluated_nodes = 0;
        for _ in 0..count {
            let mut gen = value_gen.partial_clone();
            let raw = gen.generate(raw_expr_strategy());
            let evaluated = raw.eval();
            match evaluated.as_bool() {
                Some(true) => tautology_count += 1,
                Some(false) => contradiction_count += 1,
                None if evaluated.is_literal() => literal_count += 1,
                None => {}
            }
            raw_nodes += node_count(&raw);
            evaluated_nodes += node_count(&evaluated);
        }

        info!("formulas: {}", count);
        info!("tautologies: {}", tautology_count);
        info!("contradictions: {}", contradiction_count);
        info!("reduced to a literal: {}", literal_count);
        info!(
            "nodes before evaluation: {}, after: {}",
            raw_nodes, evaluated_nodes
        );

        Ok(())
    }
}

fn check_generated(ix: usize, raw: &Expr) -> Result<()> {
    let evaluated = raw.eval();
    if evaluated.eval() != evaluated {
        bail!("formula {}: evaluating {} twice changed it", ix, raw);
    }

    // Compare over the raw formula's symbols, since evaluation may drop some.
    let raw_rows = truth_table(raw)?;
    for row in raw_rows {
        let value = evaluated.subs(&row.assignment).eval();
        if value != row.value {
            bail!(
                "formula {}: {} evaluated to {}, which differs at {:?}",
                ix,
                raw,
                evaluated,
                row.assignment
            );
        }
    }
    Ok(())
}

fn node_count(expr: &Expr) -> usize {
    match expr.kind() {
        ExprKind::Base(_) | ExprKind::Symbol(_) => 1,
        ExprKind::Not(operand) => 1 + node_count(operand),
        ExprKind::Dual(_, operands) => 1 + operands.iter().map(node_count).sum::<usize>(),
    }
}
