// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The expression tree.
//!
//! An [`Expr`] is a cheap-to-clone handle to an immutable node. Nodes are either built
//! *evaluated* (simplified as they are constructed, see [`Mode::Eval`]) or *raw* (kept
//! exactly as written). Both kinds compare by structure: operand order inside AND and OR
//! never matters.

mod display;
mod ops;
mod ordering;

use crate::{
    algebra::{build_dual, Algebra, DefaultAlgebra, Mode},
    errors::{ConstructionError, Error},
    parser, rewrite, subs,
};
use once_cell::sync::{Lazy, OnceCell};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering as AtomicOrdering},
        Arc,
    },
};

/// The constant true.
pub static TRUE: Lazy<Expr> =
    Lazy::new(|| Expr::from_node(ExprKind::Base(true), Vec::new(), true));

/// The constant false.
pub static FALSE: Lazy<Expr> =
    Lazy::new(|| Expr::from_node(ExprKind::Base(false), Vec::new(), true));

static NEXT_ANONYMOUS: AtomicU64 = AtomicU64::new(0);

/// A Boolean expression.
#[derive(Clone)]
pub struct Expr(Arc<Node>);

struct Node {
    kind: ExprKind,
    // Canonically sorted operands of a Dual node, empty otherwise.
    sorted: Vec<Expr>,
    evaluated: bool,
    literals: OnceCell<BTreeSet<Expr>>,
}

/// The shape of an expression node.
#[derive(Clone, Debug)]
pub enum ExprKind {
    /// `TRUE` or `FALSE`.
    Base(bool),
    /// A variable.
    Symbol(SymbolArg),
    /// Negation.
    Not(Expr),
    /// AND or OR over one or more operands, in insertion order.
    Dual(Op, Vec<Expr>),
}

/// The identity of a symbol.
///
/// Ordered `Int < Name < Anonymous`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolArg {
    /// Printed as the bare number. `0` and `1` read back as constants and negative
    /// numbers do not parse, so only symbols from 2 up survive a round trip through text.
    Int(i64),
    Name(String),
    /// Created by [`Expr::anonymous`]. Equal only to itself.
    Anonymous(u64),
}

impl From<i64> for SymbolArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for SymbolArg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for SymbolArg {
    fn from(value: &str) -> Self {
        Self::Name(value.to_owned())
    }
}

impl From<String> for SymbolArg {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl fmt::Display for SymbolArg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Name(name) => write!(f, "{}", name),
            Self::Anonymous(id) => write!(f, "#{}", id),
        }
    }
}

/// The two dual operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    And,
    Or,
}

impl Op {
    /// The operator obtained by exchanging AND and OR.
    #[inline]
    pub fn dual(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }

    /// The value `x` such that `op(x, y) == y` for all `y`.
    #[inline]
    pub fn identity(self) -> Expr {
        Expr::truth(self.identity_value())
    }

    /// The value `x` such that `op(x, y) == x` for all `y`.
    #[inline]
    pub fn annihilator(self) -> Expr {
        Expr::truth(!self.identity_value())
    }

    #[inline]
    pub fn identity_value(self) -> bool {
        matches!(self, Self::And)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// A value that can be turned into an expression with [`Expr::coerce`].
#[derive(Clone, Debug)]
pub enum Operand {
    Expr(Expr),
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<Expr> for Operand {
    fn from(value: Expr) -> Self {
        Self::Expr(value)
    }
}

impl From<&Expr> for Operand {
    fn from(value: &Expr) -> Self {
        Self::Expr(value.clone())
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl Expr {
    pub(crate) fn from_node(kind: ExprKind, sorted: Vec<Expr>, evaluated: bool) -> Self {
        Self(Arc::new(Node {
            kind,
            sorted,
            evaluated,
            literals: OnceCell::new(),
        }))
    }

    /// Returns `TRUE` or `FALSE`.
    #[inline]
    pub fn truth(value: bool) -> Self {
        if value {
            TRUE.clone()
        } else {
            FALSE.clone()
        }
    }

    /// Creates a named or numbered variable.
    pub fn symbol(arg: impl Into<SymbolArg>) -> Self {
        Self::from_node(ExprKind::Symbol(arg.into()), Vec::new(), true)
    }

    /// Creates a variable distinct from every other variable.
    pub fn anonymous() -> Self {
        let id = NEXT_ANONYMOUS.fetch_add(1, AtomicOrdering::Relaxed);
        Self::symbol(SymbolArg::Anonymous(id))
    }

    /// Evaluating negation.
    pub fn not(operand: Expr) -> Self {
        DefaultAlgebra.not(operand, Mode::Eval)
    }

    /// Evaluating conjunction.
    pub fn and(operands: impl IntoIterator<Item = Expr>) -> Result<Self, ConstructionError> {
        build_dual(&DefaultAlgebra, Op::And, operands.into_iter().collect(), Mode::Eval)
    }

    /// Evaluating disjunction.
    pub fn or(operands: impl IntoIterator<Item = Expr>) -> Result<Self, ConstructionError> {
        build_dual(&DefaultAlgebra, Op::Or, operands.into_iter().collect(), Mode::Eval)
    }

    pub(crate) fn raw_not(operand: Expr) -> Self {
        Self::from_node(ExprKind::Not(operand), Vec::new(), false)
    }

    pub(crate) fn evaluated_not(operand: Expr) -> Self {
        debug_assert!(operand.is_evaluated(), "operand must be evaluated");
        Self::from_node(ExprKind::Not(operand), Vec::new(), true)
    }

    pub(crate) fn raw_dual(op: Op, operands: Vec<Expr>) -> Self {
        assert!(!operands.is_empty(), "{} node built without operands", op);
        let mut sorted = operands.clone();
        sorted.sort();
        Self::from_node(ExprKind::Dual(op, operands), sorted, false)
    }

    /// `operands` must be evaluated, sorted and free of duplicates.
    pub(crate) fn evaluated_dual(op: Op, operands: Vec<Expr>) -> Self {
        assert!(!operands.is_empty(), "{} node built without operands", op);
        debug_assert!(
            operands.windows(2).all(|pair| pair[0] < pair[1]),
            "operands must be sorted and deduplicated"
        );
        Self::from_node(ExprKind::Dual(op, operands.clone()), operands, true)
    }

    /// Converts a value into an expression.
    ///
    /// Existing expressions are returned unchanged, `0` and `1` map to `FALSE` and `TRUE`,
    /// and text is parsed.
    pub fn coerce(value: impl Into<Operand>) -> Result<Self, Error> {
        match value.into() {
            Operand::Expr(expr) => Ok(expr),
            Operand::Text(text) => Ok(parser::parse(&text)?),
            other => Ok(Self::truth_value(other)?),
        }
    }

    /// Converts a value into `TRUE` or `FALSE`.
    ///
    /// Accepts bools, `0`, `1`, and the existing constants.
    pub fn truth_value(value: impl Into<Operand>) -> Result<Self, ConstructionError> {
        match value.into() {
            Operand::Bool(value) => Ok(Self::truth(value)),
            Operand::Int(0) => Ok(FALSE.clone()),
            Operand::Int(1) => Ok(TRUE.clone()),
            Operand::Expr(expr) if expr.is_base() => Ok(expr),
            Operand::Expr(expr) => Err(ConstructionError::NotCoercible {
                value: format!("{:?}", expr),
            }),
            Operand::Int(value) => Err(ConstructionError::NotCoercible {
                value: value.to_string(),
            }),
            Operand::Text(text) => Err(ConstructionError::NotCoercible {
                value: format!("{:?}", text),
            }),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// The operator of an AND or OR node.
    #[inline]
    pub fn operator(&self) -> Option<Op> {
        match self.kind() {
            ExprKind::Dual(op, _) => Some(*op),
            _ => None,
        }
    }

    /// Child expressions, in insertion order.
    pub fn operands(&self) -> &[Expr] {
        match self.kind() {
            ExprKind::Not(operand) => std::slice::from_ref(operand),
            ExprKind::Dual(_, operands) => operands.as_slice(),
            ExprKind::Base(_) | ExprKind::Symbol(_) => &[],
        }
    }

    #[inline]
    pub(crate) fn sorted_operands(&self) -> &[Expr] {
        &self.0.sorted
    }

    /// Returns true if this node was built by the evaluating constructors.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.0.evaluated
    }

    /// Returns true if both handles point at the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub fn is_base(&self) -> bool {
        matches!(self.kind(), ExprKind::Base(_))
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind() {
            ExprKind::Base(value) => Some(*value),
            _ => None,
        }
    }

    /// The opposite constant, for `TRUE` and `FALSE`.
    pub fn dual(&self) -> Option<Self> {
        self.as_bool().map(|value| Self::truth(!value))
    }

    /// Returns true for constants, symbols, and the negation of either.
    pub fn is_literal(&self) -> bool {
        match self.kind() {
            ExprKind::Base(_) | ExprKind::Symbol(_) => true,
            ExprKind::Not(operand) => {
                matches!(operand.kind(), ExprKind::Base(_) | ExprKind::Symbol(_))
            }
            ExprKind::Dual(..) => false,
        }
    }

    /// Symbols and negated symbols reachable from this node.
    pub fn literals(&self) -> BTreeSet<Expr> {
        match self.kind() {
            ExprKind::Base(_) => BTreeSet::new(),
            ExprKind::Symbol(_) => std::iter::once(self.clone()).collect(),
            ExprKind::Not(operand) if matches!(operand.kind(), ExprKind::Symbol(_)) => {
                std::iter::once(self.clone()).collect()
            }
            // Non-literal sets hold only descendants, so caching them creates no cycles.
            ExprKind::Not(_) | ExprKind::Dual(..) => self
                .0
                .literals
                .get_or_init(|| {
                    self.operands()
                        .iter()
                        .flat_map(|operand| operand.literals())
                        .collect()
                })
                .clone(),
        }
    }

    /// Symbol leaves of this expression.
    pub fn symbols(&self) -> BTreeSet<Expr> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<Expr>) {
        match self.kind() {
            ExprKind::Symbol(_) => {
                out.insert(self.clone());
            }
            _ => {
                for operand in self.operands() {
                    operand.collect_symbols(out);
                }
            }
        }
    }

    /// Fully simplified equivalent expression.
    pub fn eval(&self) -> Self {
        rewrite::eval(&DefaultAlgebra, self)
    }

    /// Equivalent expression in which NOT applies only to constants and symbols.
    pub fn literalize(&self) -> Self {
        rewrite::literalize(&DefaultAlgebra, self)
    }

    /// Collapses stacked NOTs.
    pub fn cancel(&self) -> Self {
        rewrite::cancel(&DefaultAlgebra, self)
    }

    /// Pushes a NOT over AND or OR one level inward.
    pub fn demorgan(&self) -> Self {
        rewrite::demorgan(&DefaultAlgebra, self)
    }

    /// Splices nested operands of the same operator into their parent.
    pub fn flatten(&self) -> Self {
        rewrite::flatten(&DefaultAlgebra, self)
    }

    /// Distributes this operator over operands of the dual operator.
    pub fn distributive(&self) -> Self {
        rewrite::distributive(&DefaultAlgebra, self)
    }

    /// The terms of this expression's normal form with respect to `op`.
    pub fn normalize(&self, op: Op) -> Vec<Self> {
        rewrite::normalize(&DefaultAlgebra, op, self)
    }

    /// Replaces sub-expressions found in `substitutions`.
    pub fn subs(&self, substitutions: &BTreeMap<Expr, Expr>) -> Self {
        subs::subs(&DefaultAlgebra, self, substitutions)
    }
}

/// Creates one symbol per argument.
pub fn symbols<T: Into<SymbolArg>, const N: usize>(args: [T; N]) -> [Expr; N] {
    args.map(|arg| Expr::symbol(arg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ParseErrorKind, parse, parse_unevaluated};
    use test_log::test;

    #[test]
    fn test_creation() {
        let text = "(a+b+c)*d*(~e+(f*g))";
        let expr = parse(text).unwrap();
        assert!(Expr::coerce(&expr).unwrap().ptr_eq(&expr));
        assert_eq!(Expr::coerce(text).unwrap(), expr);
        assert!(Expr::coerce(1).unwrap().ptr_eq(&TRUE));
        assert!(Expr::coerce(true).unwrap().ptr_eq(&TRUE));
        assert!(Expr::coerce(0).unwrap().ptr_eq(&FALSE));
        assert!(Expr::coerce(false).unwrap().ptr_eq(&FALSE));
        assert!(matches!(
            Expr::coerce(2),
            Err(Error::Construction(ConstructionError::NotCoercible { .. }))
        ));
        assert!(matches!(
            Expr::coerce(""),
            Err(Error::Parse(err)) if *err.kind() == ParseErrorKind::Empty
        ));
    }

    #[test]
    fn test_truth_value() {
        assert!(Expr::truth_value(1).unwrap().ptr_eq(&TRUE));
        assert!(Expr::truth_value(true).unwrap().ptr_eq(&TRUE));
        assert!(Expr::truth_value(&*TRUE).unwrap().ptr_eq(&TRUE));
        assert!(Expr::truth_value(0).unwrap().ptr_eq(&FALSE));
        assert!(Expr::truth_value(false).unwrap().ptr_eq(&FALSE));
        assert!(Expr::truth_value(&*FALSE).unwrap().ptr_eq(&FALSE));
        assert!(Expr::truth_value(2).is_err());
        assert!(Expr::truth_value("a").is_err());
        assert!(Expr::truth_value(Expr::symbol("a")).is_err());
    }

    #[test]
    fn test_base() {
        assert!(TRUE.literals().is_empty());
        assert!(FALSE.literals().is_empty());
        assert!(TRUE.literalize().ptr_eq(&TRUE));
        assert!(FALSE.literalize().ptr_eq(&FALSE));
        assert!(TRUE.eval().ptr_eq(&TRUE));
        assert!(FALSE.eval().ptr_eq(&FALSE));
        assert_eq!(TRUE.dual(), Some(FALSE.clone()));
        assert_eq!(FALSE.dual(), Some(TRUE.clone()));
        assert_eq!(*TRUE, *TRUE);
        assert_ne!(*TRUE, *FALSE);
        assert!(Expr::symbol("a").dual().is_none());
    }

    #[test]
    fn test_symbol() {
        let s1 = Expr::symbol(1);
        let s2 = Expr::symbol(1);
        assert!(s1.is_literal());
        assert!(s1.literals().contains(&s1));
        assert!(s1.literals().contains(&s2));
        assert!(s2.literals().contains(&s1));
        assert!(s1.literalize().ptr_eq(&s1));
        assert!(s1.eval().ptr_eq(&s1));

        let a = Expr::symbol("a");
        let b = Expr::symbol("a");
        let c = Expr::symbol("b");
        let d = Expr::anonymous();
        let e = Expr::anonymous();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(d, d);
        assert_ne!(d, e);
        assert_ne!(a, d);
        assert_ne!(Expr::symbol(1), *TRUE);
    }

    #[test]
    fn test_not() {
        let a = Expr::symbol("a");
        assert!(Expr::not(TRUE.clone()).ptr_eq(&FALSE));
        assert!(Expr::not(FALSE.clone()).ptr_eq(&TRUE));

        let not_a = !&a;
        assert!(not_a.is_literal());
        assert!(Expr::not(Expr::symbol(1)).is_literal());
        assert!(!parse("~(a+b)").unwrap().is_literal());
        assert_eq!(not_a.literals().len(), 1);
        assert!(not_a.literals().contains(&not_a));

        let raw = parse_unevaluated("~(a*a)").unwrap();
        assert!(!raw.is_literal());
        assert_eq!(raw.literals().len(), 1);
        assert!(raw.literals().contains(&a));

        assert_eq!(!&a, !&a);
        assert_ne!(a, parse_unevaluated("~~a").unwrap());
        assert_eq!(a, !!&a);
        assert_eq!(!&a, !!!&a);
        assert_eq!(a, !!!!&a);
    }

    #[test]
    fn test_dual_nodes() {
        let [a, b, c] = symbols(["a", "b", "c"]);
        let raw = |ops: Vec<Expr>| DefaultAlgebra.and(ops, Mode::Raw);
        let t1 = raw(vec![a.clone(), b.clone()]);
        let t2 = raw(vec![a.clone(), b.clone(), c.clone()]);
        let t3 = raw(vec![a.clone(), a.clone()]);
        let t4 = raw(vec![
            Expr::coerce("a").unwrap(),
            Expr::coerce("b").unwrap(),
            Expr::coerce("c").unwrap(),
        ]);
        assert!(matches!(
            Expr::and(Vec::new()),
            Err(ConstructionError::NoOperands { op: Op::And })
        ));

        for term in [&t1, &t2, &t3, &t4] {
            assert!(!term.is_literal());
            assert!(term.literals().contains(&a));
        }
        for term in [&t1, &t2, &t4] {
            assert!(term.literals().contains(&b));
        }
        for term in [&t2, &t4] {
            assert!(term.literals().contains(&c));
        }

        let u1 = raw(vec![b.clone(), a.clone()]);
        let u2 = raw(vec![b, c, a]);
        assert_eq!(u1, u1);
        assert_eq!(t1, u1);
        assert_eq!(t2, u2);
        assert_ne!(u1, u2);
        assert_ne!(u1, *TRUE);
        assert_ne!(t3, t1);
    }

    #[test]
    fn test_operators() {
        assert_eq!(Op::And.dual(), Op::Or);
        assert_eq!(Op::Or.dual(), Op::And);
        assert!(Op::And.annihilator().ptr_eq(&FALSE));
        assert!(Op::Or.annihilator().ptr_eq(&TRUE));
        assert!(Op::Or.identity().ptr_eq(&FALSE));
        assert!(Op::And.identity().ptr_eq(&TRUE));
        assert_eq!(parse("a+b").unwrap().operator(), Some(Op::Or));
        assert_eq!(
            parse("a*b").unwrap().operator().map(Op::dual),
            Some(Op::Or)
        );
        assert_eq!(Expr::symbol("a").operator(), None);
    }

    #[test]
    fn test_symbols() {
        let expr = parse("a*~b + c*(a+~d) + 1").unwrap();
        let expected: BTreeSet<_> = symbols(["a", "b", "c", "d"]).into_iter().collect();
        assert_eq!(parse_unevaluated("a*~b + c*(a+~d)").unwrap().symbols(), expected);
        assert!(expr.symbols().is_empty(), "expression collapses to TRUE");
    }
}
