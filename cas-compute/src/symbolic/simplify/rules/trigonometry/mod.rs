//! Simplification rules for trigonometric functions.
//!
//! Circular functions are evaluated exactly at rational multiples of `pi/12`, and their inverses
//! are evaluated at the values those produce.

mod table;

use crate::consts::ZERO_TOLERANCE;
use crate::numerical::eval;
use crate::primitive::rational;
use crate::symbolic::{
    expr::{Expr, Func},
    simplify::{fraction::make_fraction, rules::Rule, step::{Step, StepCollector}, SimplifyOptions},
};
use rug::{Float, Rational};

/// If the argument is a rational multiple of `pi`, returns the multiple.
fn pi_multiple(arg: &Expr) -> Option<Rational> {
    if let Some(n) = arg.as_number() {
        return n.cmp0().is_eq().then(|| rational(0));
    }
    let (coeff, rest) = arg.split_coefficient();
    (rest == Expr::pi()).then_some(coeff)
}

/// `sin(r*pi)`, if `r` is a multiple of `1/12`.
fn sin_of(r: &Rational) -> Option<Expr> {
    // reduce into [0, 2)
    let two = rational(2);
    let turns = Rational::from(r / &two).floor();
    let mut r = Rational::from(r - turns * &two);

    let negate = r >= 1;
    if negate {
        r -= 1;
    }
    if r > rational((1, 2)) {
        r = Rational::from(1 - r);
    }

    let (_, value) = table::SIN_TABLE.iter().find(|(angle, _)| *angle == r)?;
    Some(if negate { -value.clone() } else { value.clone() })
}

/// `cos(r*pi)`, if `r` is a multiple of `1/12`.
fn cos_of(r: &Rational) -> Option<Expr> {
    sin_of(&Rational::from(r + rational((1, 2))))
}

/// `numerator / denominator`, or [`None`] if the denominator is zero.
fn quotient(numerator: Expr, denominator: Expr) -> Option<Expr> {
    if denominator.is_number_eq(0) {
        None
    } else {
        Some(make_fraction(numerator, denominator))
    }
}

/// Evaluates the six circular functions at multiples of `pi/12`.
///
/// `sin(pi/6) = 1/2`
/// `cos(pi) = -1`
/// `tan(pi/4) = 1`
pub fn evaluate(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    if !func.is_trigonometric() {
        return None;
    }
    let r = pi_multiple(arg)?;

    let opt = match func {
        Func::Sin => sin_of(&r),
        Func::Cos => cos_of(&r),
        Func::Tan => quotient(sin_of(&r)?, cos_of(&r)?),
        Func::Cot => quotient(cos_of(&r)?, sin_of(&r)?),
        Func::Sec => quotient(Expr::num(1), cos_of(&r)?),
        Func::Cosec => quotient(Expr::num(1), sin_of(&r)?),
        _ => None,
    }?;

    step_collector.push(Step::Trigonometric);
    Some(opt)
}

/// Finds the angle `r` in the table whose value matches `|value|`, and returns it with the sign
/// of `value`.
fn match_angle(value: &Float, table: &[(Rational, Float)]) -> Option<Rational> {
    let magnitude = value.clone().abs();
    let (angle, _) = table.iter()
        .find(|(_, known)| Float::with_val(known.prec(), known - &magnitude).abs() < *ZERO_TOLERANCE)?;
    Some(if value.is_sign_negative() { -angle.clone() } else { angle.clone() })
}

/// Evaluates inverse circular functions of constants that are exact values of a circular function
/// at a multiple of `pi/12`.
///
/// `arcsin(1/2) = pi/6`
/// `arccos(-1) = pi`
/// `arctan(sqrt(3)) = pi/3`
pub fn evaluate_inverse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    if !matches!(func, Func::Arcsin | Func::Arccos | Func::Arctan | Func::Arccot)
        || !arg.is_constant()
    {
        return None;
    }
    let value = eval(arg).ok()?;
    let half = rational((1, 2));

    let r = match func {
        Func::Arcsin => match_angle(&value, &table::SIN_VALUES)?,
        Func::Arccos => Rational::from(&half - match_angle(&value, &table::SIN_VALUES)?),
        Func::Arctan => match_angle(&value, &table::TAN_VALUES)?,
        Func::Arccot => Rational::from(&half - match_angle(&value, &table::TAN_VALUES)?),
        _ => return None,
    };

    step_collector.push(Step::InverseTrigonometric);
    Some(Expr::from(r) * Expr::pi())
}

/// Applies all trigonometric rules.
pub fn all(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if expr.as_call().is_none() {
        return None;
    }

    let rules: [(bool, Rule); 2] = [
        (options.trivial, evaluate),
        (options.trivial, evaluate_inverse),
    ];
    rules.iter()
        .filter(|(enabled, _)| *enabled)
        .find_map(|(_, rule)| rule(expr, step_collector))
}
