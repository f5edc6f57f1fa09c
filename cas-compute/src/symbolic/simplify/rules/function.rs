//! Simplification rules for exponentials, logarithms, and general function identities.

use crate::symbolic::{
    expr::{Expr, Func, Parity, Primary},
    simplify::{rules::{power::factorize, Rule}, step::{Step, StepCollector}, SimplifyOptions},
};
use rug::{Integer, Rational};

/// Returns `k` if `n = 10^k` for a nonnegative integer `k`.
fn power_of_ten(n: &Integer) -> Option<u32> {
    if n.cmp0().is_le() {
        return None;
    }
    let mut n = n.clone();
    let mut k = 0;
    while n.is_divisible_u(10) {
        n /= 10;
        k += 1;
    }
    (n == 1).then_some(k)
}

/// If `lg` of the number is an integer, returns it.
fn exact_lg(n: &Rational) -> Option<Expr> {
    if *n.numer() == 1 {
        power_of_ten(n.denom()).map(|k| Expr::from(-Integer::from(k)))
    } else if *n.denom() == 1 {
        power_of_ten(n.numer()).map(|k| Expr::from(Integer::from(k)))
    } else {
        None
    }
}

/// `exp(0) = 1`
/// `ln(1) = 0`, `lg(1) = 0`
/// `lg(10^k) = k`
/// `exp(c*ln(a)) = a^c`
pub fn exponential(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = match expr.as_call()? {
        (Func::Exp, arg) if arg.is_number_eq(0) => Some(Expr::num(1)),
        (Func::Ln | Func::Lg, arg) if arg.is_number_eq(1) => Some(Expr::num(0)),
        (Func::Lg, Expr::Primary(Primary::Number(n))) => exact_lg(n),
        (Func::Lg, Expr::Exp(base, exp)) if base.is_number_eq(10) => Some((**exp).clone()),
        (Func::Exp, arg @ Expr::Mul(_)) => {
            let (coeff, rest) = arg.split_coefficient();
            match rest.as_call() {
                Some((Func::Ln, inner)) => Some(inner.clone().pow(Expr::from(coeff))),
                _ => None,
            }
        },
        _ => None,
    }?;

    step_collector.push(Step::Exponential);
    Some(opt)
}

/// Splits logarithms of positive products, quotients and powers.
///
/// `ln(ab) = ln(a)+ln(b)`
/// `ln(a^c) = c*ln(a)`
/// `ln(12) = 2*ln(2)+ln(3)`
pub fn expand_logarithm(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func @ (Func::Ln | Func::Lg), arg) = expr.as_call()? else {
        return None;
    };

    let opt = match arg {
        Expr::Mul(factors) if factors.iter().all(Expr::is_positive) => Some(Expr::Add(
            factors.iter().map(|factor| Expr::call(func, factor.clone())).collect(),
        )),
        Expr::Exp(base, exp) if base.is_positive() => {
            Some((**exp).clone() * Expr::call(func, (**base).clone()))
        },
        Expr::Primary(Primary::Number(n)) if n.cmp0().is_gt() && *n.denom() != 1 => {
            Some(Expr::call(func, Expr::from(n.numer().clone()))
                - Expr::call(func, Expr::from(n.denom().clone())))
        },
        Expr::Primary(Primary::Number(n)) if n.cmp0().is_gt() => {
            let factors = factorize(n.numer())?;
            if factors.len() == 1 && factors[0].1 == 1 {
                return None;
            }
            Some(Expr::Add(factors.into_iter()
                .map(|(prime, mult)| {
                    Expr::from(Integer::from(mult)) * Expr::call(func, Expr::from(Integer::from(prime)))
                })
                .collect()))
        },
        _ => None,
    }?;

    step_collector.push(Step::ExpandLogarithm);
    Some(opt)
}

/// `abs(-3) = 3`
/// `abs(abs(a)) = abs(a)`
/// `abs(a) = a` for nonnegative `a`, `abs(a) = -a` for negative `a`
/// `sgn(a) = 1` for positive `a`, and so on
pub fn abs_sign(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = match expr.as_call()? {
        (Func::Abs, Expr::Primary(Primary::Number(n))) => Some(Expr::from(n.clone().abs())),
        (Func::Abs, arg @ Expr::Primary(Primary::Call(Func::Abs, _))) => Some(arg.clone()),
        (Func::Abs, arg) if arg.is_nonnegative() => Some(arg.clone()),
        (Func::Abs, arg) if arg.is_negative() => Some(-arg.clone()),
        (Func::Sgn, arg) if arg.is_number_eq(0) => Some(Expr::num(0)),
        (Func::Sgn, arg) if arg.is_positive() => Some(Expr::num(1)),
        (Func::Sgn, arg) if arg.is_negative() => Some(Expr::num(-1)),
        _ => None,
    }?;

    step_collector.push(Step::AbsSign);
    Some(opt)
}

/// Evaluates hyperbolic functions and their inverses where the result is an integer.
///
/// `sinh(0) = 0`, `cosh(0) = 1`, `arcosh(1) = 0`
pub fn hyperbolic(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    let opt = if arg.is_number_eq(0) {
        match func {
            Func::Sinh | Func::Tanh | Func::Arsinh | Func::Artanh => Some(Expr::num(0)),
            Func::Cosh | Func::Sech => Some(Expr::num(1)),
            _ => None,
        }
    } else if arg.is_number_eq(1) {
        matches!(func, Func::Arcosh | Func::Arsech).then(|| Expr::num(0))
    } else {
        None
    }?;

    step_collector.push(Step::Hyperbolic);
    Some(opt)
}

/// Moves a negative coefficient out of the argument of an odd or even function.
///
/// `sin(-a) = -sin(a)`
/// `cos(-a) = cos(a)`
pub fn parity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (func, arg) = expr.as_call()?;
    if !arg.has_negative_coefficient() {
        return None;
    }

    let opt = match func.parity() {
        Parity::Odd => -Expr::call(func, -arg.clone()),
        Parity::Even => Expr::call(func, -arg.clone()),
        Parity::None => return None,
    };

    step_collector.push(Step::Parity);
    Some(opt)
}

/// `f(g(a)) = a`, where `g` is a right inverse of `f`.
///
/// `ln(exp(a)) = a`
/// `sin(arcsin(a)) = a`
pub fn inverse(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let (outer, arg) = expr.as_call()?;
    let (inner, inner_arg) = arg.as_call()?;
    if outer.right_inverse() != Some(inner) {
        return None;
    }

    step_collector.push(Step::Inverse);
    Some(inner_arg.clone())
}

/// Applies all function rules enabled by the options.
pub fn all(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if expr.as_call().is_none() {
        return None;
    }

    let rules: [(bool, Rule); 6] = [
        (options.trivial, exponential),
        (options.trivial, abs_sign),
        (options.trivial, hyperbolic),
        (options.functional_relations, parity),
        (options.functional_relations, inverse),
        (options.expand_logarithms, expand_logarithm),
    ];
    rules.iter()
        .filter(|(enabled, _)| *enabled)
        .find_map(|(_, rule)| rule(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse_expr, simplify, simplify_with, SimplifyOptions};
    use pretty_assertions::assert_eq;

    fn simplified(input: &str) -> String {
        simplify(&parse_expr(input).unwrap()).to_string()
    }

    #[test]
    fn exponentials_and_logarithms() {
        assert_eq!(simplified("exp(0)"), "1");
        assert_eq!(simplified("lg(1000)"), "3");
        assert_eq!(simplified("lg(1/100)"), "-2");
        assert_eq!(simplified("exp(2ln(x))"), "x^2");
        assert_eq!(simplified("exp(ln(x))"), "x");
    }

    #[test]
    fn signs() {
        assert_eq!(simplified("abs(abs(x))"), "abs(x)");
        assert_eq!(simplified("abs(-x)"), "abs(x)");
        assert_eq!(simplified("abs(x^2 + 1)"), "x^2 + 1");
        assert_eq!(simplified("sgn(-5)"), "-1");
        assert_eq!(simplified("sgn(exp(x))"), "1");
    }

    #[test]
    fn hyperbolic_values() {
        assert_eq!(simplified("cosh(0)"), "1");
        assert_eq!(simplified("artanh(0)"), "0");
        assert_eq!(simplified("arcosh(1)"), "0");
        assert_eq!(simplified("cosh(-x)"), "cosh(x)");
    }

    #[test]
    fn expanded_logarithms() {
        let options = SimplifyOptions::default().with_expand_logarithms(true);
        let expand = |input: &str| simplify_with(&parse_expr(input).unwrap(), &options).to_string();
        assert_eq!(expand("ln(12)"), "2*ln(2) + ln(3)");
        assert_eq!(expand("ln(2/3)"), "ln(2) - ln(3)");
        assert_eq!(expand("ln(exp(2)*pi)"), "ln(pi) + 2");
    }
}
