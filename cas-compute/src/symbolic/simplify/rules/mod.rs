//! Implementation of many simplification rules.
//!
//! Each rule in this module is a function that takes the expression to simplify as an argument,
//! and returns `Some(expr)` with the simplified expression if the rule applies, or `None` if the
//! rule does not apply. Rules only look at the node they are given; the simplifier takes care of
//! simplifying children.

pub mod add;
pub mod function;
pub mod multiply;
pub mod power;
pub mod trigonometry;

use crate::symbolic::expr::{Expr, Func, Primary};
use super::{step::{Step, StepCollector}, SimplifyOptions};

/// A rule that does not depend on the options.
pub(crate) type Rule = fn(&Expr, &mut dyn StepCollector<Step>) -> Option<Expr>;

/// If the expression is a call to the given function, calls the given transformation function
/// with the argument.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_call(expr: &Expr, func: Func, f: impl FnOnce(&Expr) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Primary(Primary::Call(target, arg)) if *target == func => f(arg),
        _ => None,
    }
}

/// If the expression is an add expression, calls the given transformation function with the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_add(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a multiplication expression, calls the given transformation function with
/// the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_multiply(expr: &Expr, f: impl FnOnce(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a power expression, calls the given transformation function with the base
/// and exponent of the power.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
pub(crate) fn do_power(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Exp(base, exp) = expr {
        f(base, exp)
    } else {
        None
    }
}

/// Applies all rules.
pub fn all(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    add::all(expr, options, step_collector)
        .or_else(|| multiply::all(expr, options, step_collector))
        .or_else(|| power::all(expr, options, step_collector))
        .or_else(|| function::all(expr, options, step_collector))
        .or_else(|| trigonometry::all(expr, options, step_collector))
}
