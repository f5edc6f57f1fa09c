//! Simplification rules for powers, including exact powers and roots of numbers.

use crate::primitive::int;
use crate::symbolic::{
    expr::{Expr, Func},
    simplify::{rules::{do_power, Rule}, step::{Step, StepCollector}, SimplifyOptions},
};
use rug::{ops::Pow, Integer, Rational};

/// The largest number of bits an exact power of a number may have.
const MAX_POWER_BITS: u64 = 1 << 16;

/// Integers above this bound are not factored when extracting radicals.
const MAX_FACTORED: u64 = 1_000_000_000_000;

/// The largest number of terms [`expand_power`] is allowed to produce.
const MAX_EXPANDED_TERMS: usize = 4096;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Factors a positive integer into primes by trial division. Returns [`None`] if the integer is
/// too large.
pub(crate) fn factorize(n: &Integer) -> Option<Vec<(u64, u32)>> {
    let mut n = n.to_u64().filter(|n| *n <= MAX_FACTORED)?;
    let mut factors = Vec::new();
    let mut d = 2;
    while d * d <= n {
        let mut mult = 0;
        while n % d == 0 {
            n /= d;
            mult += 1;
        }
        if mult > 0 {
            factors.push((d, mult));
        }
        d += 1;
    }
    if n > 1 {
        factors.push((n, 1));
    }
    Some(factors)
}

/// Computes `base^exp` exactly, if the result is not too large.
fn exact_power(base: &Rational, exp: &Integer) -> Option<Rational> {
    let e = exp.to_i32()?;
    if base.cmp0().is_eq() && e < 0 {
        return None;
    }
    let bits = base.numer().significant_bits().max(base.denom().significant_bits()) as u64;
    if bits * e.unsigned_abs() as u64 > MAX_POWER_BITS {
        return None;
    }
    Some(base.clone().pow(e))
}

/// Rewrites `n^(p/q)`, with `0 < p/q < 1`, as `a*m^(1/k)` with the largest possible integer `a`
/// and smallest possible index `k`.
///
/// `20^(1/2) = 2*5^(1/2)`
/// `4^(1/4) = 2^(1/2)`
fn extract_radical(n: &Integer, p: u32, q: u32) -> Option<Expr> {
    let q = q as u64;
    let mut outside = int(1);
    let mut inside = Vec::new();
    for (prime, mult) in factorize(n)? {
        let total = mult as u64 * p as u64;
        outside *= Integer::from(prime).pow(u32::try_from(total / q).ok()?);
        inside.push((prime, total % q));
    }

    let g = inside.iter().fold(q, |g, (_, r)| gcd(g, *r));
    let mut radicand = int(1);
    for (prime, r) in inside {
        radicand *= Integer::from(prime).pow(u32::try_from(r / g).ok()?);
    }

    let radical = (radicand != 1)
        .then(|| Expr::from(radicand).pow(Expr::from(Rational::from((1, q / g)))));
    Some(match radical {
        None => Expr::from(outside),
        Some(radical) if outside == 1 => radical,
        Some(radical) => Expr::from(outside) * radical,
    })
}

/// `a^0 = 1`
/// `a^1 = a`
/// `1^a = 1`
/// `0^a = 0` for positive `a`
pub fn power_identity(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        if exp.is_number_eq(0) || base.is_number_eq(1) {
            Some(Expr::num(1))
        } else if exp.is_number_eq(1) {
            Some(base.clone())
        } else if base.is_number_eq(0) && exp.as_number().map_or(false, |n| n.cmp0().is_gt()) {
            Some(Expr::num(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure
    step_collector.push(Step::PowerIdentity);
    Some(opt)
}

/// `exp(a)^b = exp(ab)`
pub fn exp_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        match base.as_call() {
            Some((Func::Exp, arg)) => Some(Expr::call(Func::Exp, arg.clone() * exp.clone())),
            _ => None,
        }
    })?;

    step_collector.push(Step::Exponential);
    Some(opt)
}

/// Evaluates powers of numbers with rational exponents.
///
/// Integer powers are computed exactly. Roots are reduced so that the exponent lies between `0`
/// and `1`, the radicand is a positive integer, and no perfect power is left inside the radical.
/// Odd roots of negative numbers are real.
///
/// `2^10 = 1024`
/// `(-8)^(1/3) = -2`
/// `4^(-1/2) = 1/2`
/// `12^(3/2) = 24*3^(1/2)`
pub fn number_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let b = base.as_number()?;
        let e = exp.as_number()?;
        if *e.denom() == 1 {
            return exact_power(b, e.numer()).map(Expr::from);
        }

        if b.cmp0().is_lt() {
            if e.denom().is_even() {
                return None;
            }
            let magnitude = Expr::from(Rational::from(-b)).pow(exp.clone());
            return Some(if e.numer().is_odd() { -magnitude } else { magnitude });
        }
        if b.cmp0().is_eq() {
            return None;
        }

        // (p/q)^e = p^e * q^-e
        if *b.denom() != 1 {
            let mut factors = vec![Expr::from(b.denom().clone()).pow(Expr::from(Rational::from(-e)))];
            if *b.numer() != 1 {
                factors.insert(0, Expr::from(b.numer().clone()).pow(exp.clone()));
            }
            return Some(Expr::Mul(factors).downgrade());
        }

        // n^e = n^floor(e) * n^(e - floor(e))
        let floor = e.clone().floor();
        if floor.cmp0().is_ne() {
            let frac = Rational::from(e - &floor);
            return Some(Expr::from(b.clone()).pow(Expr::from(floor)) * Expr::from(b.clone()).pow(Expr::from(frac)));
        }

        let p = e.numer().to_u32()?;
        let q = e.denom().to_u32()?;
        let result = extract_radical(b.numer(), p, q)?;
        (result != *expr).then_some(result)
    })?;

    step_collector.push(Step::NumberPower);
    Some(opt)
}

/// `(a^b)^c = a^(bc)`
///
/// This holds when `c` is an integer, when `a` is nonnegative, or when both exponents are
/// rational. The one exception is an even power under an even root, where the sign of `a` is
/// lost: `(a^2)^(1/2) = abs(a)`.
pub fn power_of_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, c| {
        let Expr::Exp(a, b) = base else {
            return None;
        };
        let exp = (**b).clone() * c.clone();

        if c.is_integer_constant() || a.is_always_nonnegative() {
            return Some((**a).clone().pow(exp));
        }

        let b = b.as_number()?;
        let c = c.as_number()?;
        if b.denom().is_odd() && b.numer().is_even() && c.denom().is_even() {
            Some(Expr::call(Func::Abs, (**a).clone()).pow(exp))
        } else {
            Some((**a).clone().pow(exp))
        }
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// `(ab)^c = a^c*b^c`
///
/// This holds when `c` is a rational number with an odd denominator (including integers), or when
/// at most one of the factors can be negative.
pub fn power_of_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, c| {
        let Expr::Mul(factors) = base else {
            return None;
        };
        let n = c.as_number()?;
        let allowed = n.denom().is_odd()
            || factors.iter().filter(|factor| !factor.is_nonnegative()).count() <= 1;
        if !allowed {
            return None;
        }

        Some(Expr::Mul(factors.iter().map(|factor| factor.clone().pow(c.clone())).collect()))
    })?;

    step_collector.push(Step::PowerOfProduct);
    Some(opt)
}

/// `abs(a)^n = a^n` for even `n`, including rational `n` with an even numerator and odd
/// denominator.
pub fn abs_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let (Func::Abs, arg) = base.as_call()? else {
            return None;
        };
        let n = exp.as_number()?;
        (n.numer().is_even() && n.denom().is_odd()).then(|| arg.clone().pow(exp.clone()))
    })?;

    step_collector.push(Step::AbsSign);
    Some(opt)
}

/// Expands a small positive integer power of a sum.
///
/// `(a+b)^2 = a^2+2ab+b^2`
pub fn expand_power(
    expr: &Expr,
    max_power: u32,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_power(expr, |base, exp| {
        let Expr::Add(terms) = base else {
            return None;
        };
        let n = exp.as_integer()?.to_u32().filter(|n| (2..=max_power).contains(n))?;
        if terms.len().checked_pow(n).map_or(true, |count| count > MAX_EXPANDED_TERMS) {
            return None;
        }

        let mut products: Vec<Vec<Expr>> = vec![Vec::new()];
        for _ in 0..n {
            products = products.iter()
                .flat_map(|product| terms.iter().map(move |term| {
                    let mut product = product.clone();
                    product.push(term.clone());
                    product
                }))
                .collect();
        }
        Some(Expr::Add(products.into_iter().map(Expr::Mul).collect()))
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all power rules enabled by the options.
pub fn all(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if !matches!(expr, Expr::Exp(..)) {
        return None;
    }

    let rules: [(bool, Rule); 6] = [
        (options.trivial, power_identity),
        (options.trivial, exp_power),
        (options.trivial, number_power),
        (options.trivial, power_of_power),
        (options.trivial, power_of_product),
        (options.functional_relations, abs_power),
    ];
    rules.iter()
        .filter(|(enabled, _)| *enabled)
        .find_map(|(_, rule)| rule(expr, step_collector))
        .or_else(|| {
            options.expand
                .then(|| expand_power(expr, options.max_expand_power, step_collector))
                .flatten()
        })
}
