// Copyright (c) The bool-algebra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::expr::{Expr, ExprKind, Op, SymbolArg};
use itertools::{Itertools, Position};
use std::fmt;

/// The text form read by [`parse`](crate::parse). [`SymbolArg::Int`] symbols below 2 are
/// the exception: `0` and `1` read back as constants and negative numbers do not parse.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ExprKind::Base(true) => write!(f, "1"),
            ExprKind::Base(false) => write!(f, "0"),
            ExprKind::Symbol(arg) => write!(f, "{}", arg),
            ExprKind::Not(operand) if operand.operator().is_some() => write!(f, "({})'", operand),
            ExprKind::Not(operand) => write!(f, "{}'", operand),
            ExprKind::Dual(op, operands) => {
                let separator = match op {
                    Op::And => "∙",
                    Op::Or => "+",
                };
                for operand in operands.iter().with_position() {
                    let (operand, last) = match operand {
                        Position::First(operand) | Position::Middle(operand) => (operand, false),
                        Position::Last(operand) | Position::Only(operand) => (operand, true),
                    };
                    if *op == Op::And && operand.operator() == Some(Op::Or) {
                        write!(f, "({})", operand)?;
                    } else {
                        write!(f, "{}", operand)?;
                    }
                    if !last {
                        write!(f, "{}", separator)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ExprKind::Base(true) => write!(f, "TRUE"),
            ExprKind::Base(false) => write!(f, "FALSE"),
            ExprKind::Symbol(SymbolArg::Name(name)) => write!(f, "Symbol('{}')", name),
            ExprKind::Symbol(arg) => write!(f, "Symbol({})", arg),
            ExprKind::Not(operand) => write!(f, "NOT({:?})", operand),
            ExprKind::Dual(op, operands) => {
                write!(f, "{}(", op)?;
                for operand in operands.iter().with_position() {
                    match operand {
                        Position::First(operand) | Position::Middle(operand) => {
                            write!(f, "{:?}, ", operand)?
                        }
                        Position::Last(operand) | Position::Only(operand) => {
                            write!(f, "{:?}", operand)?
                        }
                    }
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        expr::{Expr, FALSE, TRUE},
        parse, parse_unevaluated,
    };
    use test_log::test;

    #[test]
    fn test_base_printing() {
        assert_eq!(TRUE.to_string(), "1");
        assert_eq!(FALSE.to_string(), "0");
        assert_eq!(format!("{:?}", *TRUE), "TRUE");
        assert_eq!(format!("{:?}", *FALSE), "FALSE");
    }

    #[test]
    fn test_symbol_printing() {
        assert_eq!(Expr::symbol("a").to_string(), "a");
        assert_eq!(Expr::symbol(1).to_string(), "1");
        assert_eq!(format!("{:?}", Expr::symbol("a")), "Symbol('a')");
        assert_eq!(format!("{:?}", Expr::symbol(1)), "Symbol(1)");
        assert!(Expr::anonymous().to_string().starts_with('#'));
    }

    #[test]
    fn test_int_symbol_text() {
        assert_eq!(parse(&Expr::symbol(42).to_string()).unwrap(), Expr::symbol(42));

        // Small and negative integers have no text form of their own.
        assert_eq!(parse(&Expr::symbol(0).to_string()).unwrap(), *FALSE);
        assert_eq!(parse(&Expr::symbol(1).to_string()).unwrap(), *TRUE);
        assert_eq!(Expr::symbol(-3).to_string(), "-3");
        assert!(parse(&Expr::symbol(-3).to_string()).is_err());
    }

    #[test]
    fn test_not_printing() {
        let a = Expr::symbol("a");
        assert_eq!((!&a).to_string(), "a'");
        assert_eq!(format!("{:?}", !&a), "NOT(Symbol('a'))");

        let expr = parse_unevaluated("~(a*a)").unwrap();
        assert_eq!(expr.to_string(), "(a∙a)'");
        assert_eq!(format!("{:?}", expr), "NOT(AND(Symbol('a'), Symbol('a')))");
        assert_eq!(parse_unevaluated("~~a").unwrap().to_string(), "a''");
    }

    #[test]
    fn test_dual_printing() {
        let expr = parse_unevaluated("a*a").unwrap();
        assert_eq!(expr.to_string(), "a∙a");
        assert_eq!(format!("{:?}", expr), "AND(Symbol('a'), Symbol('a'))");

        let expr = parse_unevaluated("a+a").unwrap();
        assert_eq!(expr.to_string(), "a+a");
        assert_eq!(format!("{:?}", expr), "OR(Symbol('a'), Symbol('a'))");

        let expr = parse_unevaluated("(a+b)*c").unwrap();
        assert_eq!(expr.to_string(), "(a+b)∙c");
        assert_eq!(
            format!("{:?}", expr),
            "AND(OR(Symbol('a'), Symbol('b')), Symbol('c'))"
        );

        let expr = parse_unevaluated("a*b + ~c").unwrap();
        assert_eq!(expr.to_string(), "a∙b+c'");
    }
}
