// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simplification and structural transforms.
//!
//! Every function here is pure: it returns a new tree and never modifies its input. Nodes
//! are built through the [`Algebra`] passed in.
//!
//! `eval` simplifies an AND or OR node by expanding its operands into a two-level form
//! over symbols: NOT is pushed down with De Morgan's law and nested operators are
//! distributed. Each term of that form becomes one [`Cube`], and the resulting [`Cover`] is
//! reduced to a minimum cover of prime implicants. That applies absorption, elimination
//! and consensus at once, so the result depends only on the operator and the function,
//! not on how the operands were grouped or written.

mod normalize;

pub use normalize::normalize;

use crate::{
    algebra::{Algebra, Mode},
    cover::Cover,
    cube::Cube,
    expr::{Expr, ExprKind, Op},
};
use itertools::Itertools;
use log::trace;
use normalize::{expand, Term};
use std::collections::BTreeSet;

/// Returns the fully simplified form of `expr`.
pub fn eval<A: Algebra + ?Sized>(alg: &A, expr: &Expr) -> Expr {
    if expr.is_evaluated() {
        return expr.clone();
    }
    match expr.kind() {
        ExprKind::Base(_) | ExprKind::Symbol(_) => expr.clone(),
        ExprKind::Not(operand) => simplify_not(alg, operand.clone()),
        ExprKind::Dual(op, operands) => simplify_dual(alg, *op, operands.clone()),
    }
}

/// Evaluating NOT.
pub(crate) fn simplify_not<A: Algebra + ?Sized>(alg: &A, operand: Expr) -> Expr {
    let operand = eval(alg, &operand);
    match operand.kind() {
        ExprKind::Base(value) => alg.truth(!value),
        ExprKind::Not(inner) => inner.clone(),
        ExprKind::Symbol(_) | ExprKind::Dual(..) => Expr::evaluated_not(operand),
    }
}

/// Evaluating AND or OR.
pub(crate) fn simplify_dual<A: Algebra + ?Sized>(alg: &A, op: Op, operands: Vec<Expr>) -> Expr {
    let identity = alg.truth(op.identity_value());
    let annihilator = alg.truth(!op.identity_value());

    // Associativity, then idempotence.
    let mut set = BTreeSet::new();
    for operand in &operands {
        let operand = eval(alg, operand);
        match operand.kind() {
            ExprKind::Dual(child_op, children) if *child_op == op => {
                set.extend(children.iter().cloned())
            }
            _ => {
                set.insert(operand);
            }
        }
    }

    set.remove(&identity);
    if set.contains(&annihilator) {
        return annihilator;
    }
    if set.len() < 2 {
        return set.into_iter().next().unwrap_or(identity);
    }

    let two_level = TwoLevel::new(op, &set);
    let minimized = two_level.cover.minimum_cover();
    trace!(
        "{} over {} symbols: {:?} -> {:?}",
        op,
        two_level.atoms.len(),
        two_level.cover,
        minimized
    );

    if minimized.contains_universe() {
        return annihilator;
    }
    let rebuilt: BTreeSet<Expr> = minimized
        .elements()
        .iter()
        .map(|cube| two_level.rebuild(alg, cube))
        .collect();
    if rebuilt.len() < 2 {
        return rebuilt.into_iter().next().unwrap_or(identity);
    }
    Expr::evaluated_dual(op, rebuilt.into_iter().collect())
}

/// The operands of a node expanded into a cover over its symbols.
struct TwoLevel {
    op: Op,
    atoms: Vec<Expr>,
    cover: Cover,
}

impl TwoLevel {
    fn new(op: Op, operands: &BTreeSet<Expr>) -> Self {
        let terms: BTreeSet<Term> = operands
            .iter()
            .flat_map(|operand| expand(op, operand))
            .collect();
        let atoms: Vec<Expr> = terms
            .iter()
            .flat_map(|term| term.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let cubes = terms.iter().map(|term| {
            let mut input = vec![None; atoms.len()];
            for (atom, &polarity) in term {
                if let Ok(ix) = atoms.binary_search(atom) {
                    input[ix] = Some(polarity);
                }
            }
            Cube::new(input)
        });
        let cover = Cover::new(atoms.len(), cubes);

        Self { op, atoms, cover }
    }

    fn rebuild<A: Algebra + ?Sized>(&self, alg: &A, cube: &Cube) -> Expr {
        let mut literals: Vec<Expr> = cube
            .input
            .iter()
            .zip(&self.atoms)
            .filter_map(|(value, atom)| match value {
                Some(true) => Some(atom.clone()),
                Some(false) => Some(alg.not(atom.clone(), Mode::Eval)),
                None => None,
            })
            .collect();
        match literals.len() {
            1 => literals.remove(0),
            _ => alg.dual(self.op.dual(), literals, Mode::Eval),
        }
    }
}

/// Collapses a stack of NOTs by parity.
pub fn cancel<A: Algebra + ?Sized>(alg: &A, expr: &Expr) -> Expr {
    let (core, depth) = expr.strip_not();
    match depth {
        0 | 1 => expr.clone(),
        depth if depth % 2 == 0 => core.clone(),
        _ => alg.not(core.clone(), Mode::Raw),
    }
}

/// Applies De Morgan's law to a negated AND or OR: `~(a*b) = ~a+~b`.
///
/// Anything else is returned unchanged.
pub fn demorgan<A: Algebra + ?Sized>(alg: &A, expr: &Expr) -> Expr {
    let inner = match expr.kind() {
        ExprKind::Not(inner) => inner,
        _ => return expr.clone(),
    };
    match inner.kind() {
        ExprKind::Dual(op, operands) => {
            let negated = operands
                .iter()
                .map(|operand| alg.not(operand.clone(), Mode::Eval))
                .collect();
            alg.dual(op.dual(), negated, Mode::Eval)
        }
        _ => expr.clone(),
    }
}

/// Splices operands of nested nodes with the same operator into their parent, keeping
/// the written order. The result is raw.
pub fn flatten<A: Algebra + ?Sized>(alg: &A, expr: &Expr) -> Expr {
    match expr.kind() {
        ExprKind::Base(_) | ExprKind::Symbol(_) => expr.clone(),
        ExprKind::Not(operand) => alg.not(flatten(alg, operand), Mode::Raw),
        ExprKind::Dual(op, operands) => {
            let mut spliced = Vec::with_capacity(operands.len());
            for operand in operands {
                let operand = flatten(alg, operand);
                match operand.kind() {
                    ExprKind::Dual(child_op, children) if child_op == op => {
                        spliced.extend(children.iter().cloned())
                    }
                    _ => spliced.push(operand),
                }
            }
            alg.dual(*op, spliced, Mode::Raw)
        }
    }
}

/// Distributes an AND over OR operands (or an OR over AND operands).
///
/// `a*(b+c)*(d+e)` becomes `a*b*d + a*b*e + a*c*d + a*c*e`. The number of terms is the
/// product of the operand counts of the distributed operands.
pub fn distributive<A: Algebra + ?Sized>(alg: &A, expr: &Expr) -> Expr {
    let (op, operands) = match expr.kind() {
        ExprKind::Dual(op, operands) => (*op, operands),
        _ => return expr.clone(),
    };
    let dual = op.dual();
    if !operands.iter().any(|operand| operand.operator() == Some(dual)) {
        return expr.clone();
    }

    let terms = operands
        .iter()
        .map(|operand| match operand.kind() {
            ExprKind::Dual(child_op, children) if *child_op == dual => children.clone(),
            _ => vec![operand.clone()],
        })
        .multi_cartesian_product()
        .map(|choice| {
            let term = alg.dual(op, choice, Mode::Eval);
            distributive(alg, &term)
        })
        .collect();
    alg.dual(dual, terms, Mode::Eval)
}

/// Returns an equivalent expression where NOT only applies to constants and symbols.
pub fn literalize<A: Algebra + ?Sized>(alg: &A, expr: &Expr) -> Expr {
    match expr.kind() {
        ExprKind::Base(_) | ExprKind::Symbol(_) => expr.clone(),
        ExprKind::Not(_) => {
            let cancelled = cancel(alg, expr);
            match cancelled.kind() {
                ExprKind::Not(inner) if inner.operator().is_some() => {
                    literalize(alg, &demorgan(alg, &cancelled))
                }
                ExprKind::Not(_) => cancelled,
                _ => literalize(alg, &cancelled),
            }
        }
        ExprKind::Dual(op, operands) => {
            let literalized: Vec<Expr> = operands
                .iter()
                .map(|operand| literalize(alg, operand))
                .collect();
            if literalized
                .iter()
                .zip(operands)
                .all(|(new, old)| new.ptr_eq(old))
            {
                expr.clone()
            } else {
                alg.dual(*op, literalized, Mode::of(expr))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algebra::DefaultAlgebra,
        expr::{symbols, FALSE, TRUE},
        parse, parse_unevaluated,
        proptest_helpers::raw_expr_strategy,
        truth_table::truth_table,
    };
    use proptest::prelude::*;
    use std::collections::BTreeMap;
    use test_log::test;

    #[test]
    fn test_not_eval() {
        let a = Expr::symbol("a");
        assert_eq!(a, parse_unevaluated("~~a").unwrap().eval());
        assert_eq!(!&a, parse_unevaluated("~~~a").unwrap().eval());
        assert_eq!(!(&a * &a * &a), !(&a * &a * &a));
        assert_eq!(parse_unevaluated("~1").unwrap().eval(), *FALSE);
    }

    #[test]
    fn test_cancel() {
        let a = Expr::symbol("a");
        assert_eq!(!&a, (!&a).cancel());
        assert_eq!(a, parse_unevaluated("~~a").unwrap().cancel());
        assert_eq!(!&a, parse_unevaluated("~~~a").unwrap().cancel());
        assert_eq!(a, parse_unevaluated("~~~~a").unwrap().cancel());
        assert!(a.cancel().ptr_eq(&a));
    }

    #[test]
    fn test_demorgan() {
        let [a, b] = symbols(["a", "b"]);
        assert_eq!(
            parse_unevaluated("~(a*b)").unwrap().demorgan(),
            !&a + !&b
        );
        assert_eq!(
            parse_unevaluated("~(a+b+c)").unwrap().demorgan(),
            parse_unevaluated("~a*~b*~c").unwrap()
        );
        assert_eq!(
            parse_unevaluated("~(~a*b)").unwrap().demorgan(),
            &a + !&b
        );
        assert!(a.demorgan().ptr_eq(&a));
    }

    #[test]
    fn test_literalize() {
        assert_eq!(parse("~a").unwrap().literalize(), parse("~a").unwrap());
        assert_eq!(
            parse("~(a*b)").unwrap().literalize(),
            parse("~a+~b").unwrap()
        );
        assert_eq!(
            parse("~(a+b)").unwrap().literalize(),
            parse("~a*~b").unwrap()
        );
        assert_eq!(
            parse("a+~(b+c)").unwrap().literalize(),
            parse("a+(~b*~c)").unwrap()
        );
    }

    #[test]
    fn test_eval_laws() {
        let [a, b, c] = symbols(["a", "b", "c"]);
        let (t, f) = (TRUE.clone(), FALSE.clone());

        // Idempotence, with associativity.
        assert_eq!(a, &a * &a);
        assert_eq!(&a + &b, &a + (&a + &b));
        // Annihilation.
        assert_eq!(f, &a * &f);
        assert_eq!(t, &a + &t);
        // Identity.
        assert_eq!(a, &a * &t);
        assert_eq!(a, &a + &f);
        // Complementation.
        assert_eq!(f, &a * !&a);
        assert_eq!(t, &a + !&a);
        // Absorption.
        assert_eq!(a, &a * (&a + &b));
        assert_eq!(a, &a + (&a * &b));
        assert_eq!(&b * &a, (&b * &a) + (&b * &a * &c));
        // Negative absorption.
        assert_eq!(&a + &b, &a + (!&a * &b));
        assert_eq!(&a * &b, &a * (!&a + &b));
        // Elimination.
        assert_eq!(a, (&a * !&b) + (&a * &b));
    }

    #[test]
    fn test_eval_minimization() {
        let expr = parse("(~a*b*c) + (a*~b*c) + (a*b*~c) + (a*b*c)").unwrap();
        assert_eq!(expr, parse("(a*b)+(b*c)+(a*c)").unwrap());

        let expr = parse(
            "(~a*b*~c*~d) + (a*~b*~c*~d) + (a*~b*c*~d) +\
             (a*~b*c*d) + (a*b*~c*~d) + (a*b*c*d)",
        )
        .unwrap();
        assert_eq!(expr, parse("(~b*~d*a) + (~c*~d*b) + (a*c*d)").unwrap());

        let expr = parse("(a*b*c*d) + (b*d)").unwrap();
        assert_eq!(expr, parse("b*d").unwrap());

        let expr = parse("(a+b)*(a+~b)").unwrap();
        assert_eq!(expr, Expr::symbol("a"));
    }

    #[test]
    fn test_eval_spliced_operands() {
        // Complements hidden inside an operand's own operands.
        assert_eq!(parse("a*b*~(a*b)").unwrap(), *FALSE);
        assert_eq!(parse("(a*b)*~(a*b)").unwrap(), *FALSE);
        assert_eq!(parse("a*(b*~(a*b))").unwrap(), *FALSE);
        assert_eq!(parse("a+b+~(a+b)").unwrap(), *TRUE);

        // Negative absorption over a compound operand.
        let x = parse("a*b").unwrap();
        let c = Expr::symbol("c");
        let absorbed = &x + (!&x * &c);
        assert_eq!(absorbed, &x + &c);
        assert_eq!(absorbed.to_string(), "c+a∙b");

        // NOT over an operator stays put at the top, and is pushed down inside one.
        assert_eq!(parse("~(a*b)").unwrap().to_string(), "(a∙b)'");
        assert_eq!(parse("c*~(a*b)").unwrap().to_string(), "c∙(a'+b')");
    }

    #[test]
    fn test_eval_cycle() {
        let six = "a*~b + b*~c + c*~d + d*~e + e*~f + f*~a";
        let expr = parse(six).unwrap();
        assert_eq!(expr.operands().len(), 6);
        assert_equivalent(&parse_unevaluated(six).unwrap(), &expr);

        let eight = parse("a*~b + b*~c + c*~d + d*~e + e*~f + f*~g + g*~h + h*~a").unwrap();
        assert_eq!(eight.operands().len(), 8);
        assert_eq!(eight.eval(), eight);
    }

    #[test]
    fn test_eval_ten_terms_is_sound() {
        let raw = parse_unevaluated(
            "(~a*~b*~c*~d) + (~a*~b*~c*d) + (~a*b*~c*~d) +\
             (~a*b*c*d) + (~a*b*~c*d) + (~a*b*c*~d) +\
             (a*~b*~c*d) + (~a*b*c*d) + (a*~b*c*d) + (a*b*c*d)",
        )
        .unwrap();
        let evaluated = raw.eval();
        assert_eq!(evaluated.eval(), evaluated);
        assert_equivalent(&raw, &evaluated);
    }

    #[test]
    fn test_flatten() {
        let t1 = parse_unevaluated("a * (b*c)").unwrap();
        let t2 = parse_unevaluated("a*b*c").unwrap();
        assert_ne!(t1, t2);
        assert_eq!(t1.flatten(), t2);

        let t1 = parse_unevaluated("a + ((b*c) + (a*c)) + b").unwrap();
        let t2 = parse_unevaluated("a + (b*c) + (a*c) + b").unwrap();
        assert_ne!(t1, t2);
        assert_eq!(t1.flatten(), t2);
        assert_eq!(t1.flatten().to_string(), "a+b∙c+a∙c+b");
    }

    #[test]
    fn test_distributive() {
        let [a, b, c, d, e] = symbols(["a", "b", "c", "d", "e"]);
        assert_eq!((&a * (&b + &c)).distributive(), (&a * &b) + (&a * &c));

        let t1 = Expr::and([a.clone(), &b + &c, &d + &e]).unwrap();
        let t2 = Expr::or([
            Expr::and([a.clone(), b.clone(), d.clone()]).unwrap(),
            Expr::and([a.clone(), b.clone(), e.clone()]).unwrap(),
            Expr::and([a.clone(), c.clone(), d.clone()]).unwrap(),
            Expr::and([a.clone(), c.clone(), e.clone()]).unwrap(),
        ])
        .unwrap();
        assert_eq!(t1.distributive(), t2);
        assert_eq!(t2.operands().len(), 4);
        assert!(a.distributive().ptr_eq(&a));
    }

    fn assert_equivalent(left: &Expr, right: &Expr) {
        for row in truth_table(left).unwrap() {
            assert_eq!(
                right.subs(&row.assignment).eval(),
                row.value,
                "{} and {} differ at {:?}",
                left,
                right,
                row.assignment
            );
        }
    }

    fn equivalent(left: &Expr, right: &Expr) -> bool {
        let symbols: Vec<_> = left.symbols().union(&right.symbols()).cloned().collect();
        (0..1_u32 << symbols.len()).all(|bits| {
            let assignment: BTreeMap<_, _> = symbols
                .iter()
                .enumerate()
                .map(|(ix, symbol)| (symbol.clone(), Expr::truth((bits >> ix) & 1 == 1)))
                .collect();
            left.subs(&assignment).eval() == right.subs(&assignment).eval()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn proptest_laws(a in any::<Expr>()) {
            prop_assert_eq!(&a * &a, a.clone(), "idempotence");
            prop_assert_eq!(&a + &a, a.clone(), "idempotence");
            prop_assert_eq!(&a * &*TRUE, a.clone(), "identity");
            prop_assert_eq!(&a + &*FALSE, a.clone(), "identity");
            prop_assert_eq!(&a * &*FALSE, FALSE.clone(), "annihilation");
            prop_assert_eq!(&a + &*TRUE, TRUE.clone(), "annihilation");
            prop_assert_eq!(&a * !&a, FALSE.clone(), "complementation");
            prop_assert_eq!(&a + !&a, TRUE.clone(), "complementation");
        }

        #[test]
        fn proptest_eval_ignores_grouping(raw in raw_expr_strategy()) {
            prop_assert_eq!(raw.eval(), raw.flatten().eval(), "{}", raw);
        }

        #[test]
        fn proptest_complement_in_chain(
            a in raw_expr_strategy(),
            op in prop_oneof![Just(Op::And), Just(Op::Or)],
        ) {
            // `a`'s operands spliced into one node next to `~a`.
            let mut operands = match a.kind() {
                ExprKind::Dual(a_op, children) if *a_op == op => children.clone(),
                _ => vec![a.clone()],
            };
            operands.push(DefaultAlgebra.not(a.clone(), Mode::Raw));
            let chained = DefaultAlgebra.dual(op, operands, Mode::Raw);

            let annihilator = Expr::truth(!op.identity_value());
            prop_assert_eq!(chained.eval(), annihilator.clone(), "{}", chained);
            let printed = chained.to_string();
            prop_assert_eq!(parse(&printed).unwrap(), annihilator, "{}", printed);
        }

        #[test]
        fn proptest_cancel_parity(a in any::<Expr>(), k in 1_usize..=4) {
            let core = a.strip_not().0.clone();
            let mut stacked = core.clone();
            for _ in 0..k {
                stacked = DefaultAlgebra.not(stacked, Mode::Raw);
            }
            let cancelled = stacked.cancel();
            if k % 2 == 0 {
                prop_assert_eq!(cancelled, core);
            } else {
                prop_assert_eq!(cancelled, DefaultAlgebra.not(core, Mode::Raw));
            }
        }

        #[test]
        fn proptest_eval_sound(raw in raw_expr_strategy()) {
            let evaluated = raw.eval();
            prop_assert!(evaluated.is_evaluated());
            prop_assert!(equivalent(&raw, &evaluated), "{} => {}", raw, evaluated);
        }

        #[test]
        fn proptest_eval_fixed_point(raw in raw_expr_strategy()) {
            let evaluated = raw.eval();
            // Rebuilding from the evaluated operands reaches the same node.
            let again = match evaluated.kind() {
                ExprKind::Dual(op, operands) => {
                    simplify_dual(&DefaultAlgebra, *op, operands.clone())
                }
                ExprKind::Not(operand) => simplify_not(&DefaultAlgebra, operand.clone()),
                _ => evaluated.clone(),
            };
            prop_assert_eq!(again, evaluated);
        }

        #[test]
        fn proptest_literalize(raw in raw_expr_strategy()) {
            let literalized = raw.literalize();
            prop_assert_eq!(literalized.literalize(), literalized.clone(), "idempotent");
            prop_assert!(equivalent(&raw, &literalized), "{} => {}", raw, literalized);
            prop_assert!(only_literal_nots(&literalized), "{}", literalized);
        }

        #[test]
        fn proptest_distributive_sound(a in any::<Expr>()) {
            let distributed = a.distributive();
            prop_assert!(equivalent(&a, &distributed), "{} => {}", a, distributed);
        }

        #[test]
        fn proptest_flatten_sound(raw in raw_expr_strategy()) {
            let flattened = raw.flatten();
            prop_assert!(equivalent(&raw, &flattened), "{} => {}", raw, flattened);
            prop_assert_eq!(flattened.flatten(), flattened);
        }
    }

    fn only_literal_nots(expr: &Expr) -> bool {
        match expr.kind() {
            ExprKind::Not(_) => expr.is_literal(),
            _ => expr.operands().iter().all(only_literal_nots),
        }
    }
}
