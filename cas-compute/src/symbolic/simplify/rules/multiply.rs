//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Expr, Func},
    simplify::{rules::{do_multiply, Rule}, step::{Step, StepCollector}, SimplifyOptions},
};
use rug::Rational;

/// The largest number of terms [`distribute`] is allowed to produce.
const MAX_EXPANDED_TERMS: usize = 4096;

/// `a*(b*c) = a*b*c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.len() < 2 {
            return Some(Expr::Mul(factors.to_vec()).downgrade());
        }
        if !factors.iter().any(|factor| matches!(factor, Expr::Mul(_))) {
            return None;
        }

        let flat = factors.iter()
            .flat_map(|factor| factor.factors().iter().cloned())
            .collect::<Vec<_>>();
        Some(Expr::Mul(flat).downgrade())
    })?;

    // keep the step collection logic outside of the closure
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        factors.iter()
            .any(|factor| factor.is_number_eq(0))
            .then(|| Expr::num(0))
    })?;

    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Multiplies all numeric factors together, dropping the product if it is one.
///
/// `2*a*3 = 6*a`
/// `1*a = a`
pub fn multiply_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let count = factors.iter().filter(|factor| factor.is_number()).count();
        let has_one = factors.iter().any(|factor| factor.is_number_eq(1));
        if count == 0 || (count == 1 && !has_one) {
            return None;
        }

        let mut product = rational(1);
        let mut new_factors = Vec::with_capacity(factors.len() - count + 1);
        for factor in factors {
            match factor.as_number() {
                Some(n) => product *= n,
                None => new_factors.push(factor.clone()),
            }
        }
        if product.cmp0().is_eq() {
            return Some(Expr::num(0));
        }
        if product != 1 {
            new_factors.insert(0, Expr::from(product));
        }
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `a*a = a^2`
///
/// Unless `reduce_quotients` is set, factors in the numerator are not combined with factors in
/// the denominator, so `x*x^-1` is left as is.
pub fn combine_like_factors(
    expr: &Expr,
    reduce_quotients: bool,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    // which side of the fraction bar a factor is on
    let side = |exp: &Expr| -> i8 {
        match exp.as_number() {
            _ if reduce_quotients => 0,
            Some(n) if n.cmp0().is_lt() => -1,
            Some(_) => 1,
            None => 0,
        }
    };

    let opt = do_multiply(expr, |factors| {
        // (base, side, exponents); plain numbers are kept in their own group
        let mut groups: Vec<(Expr, i8, Vec<Expr>)> = Vec::with_capacity(factors.len());
        for factor in factors {
            if factor.is_number() {
                groups.push((factor.clone(), 2, vec![Expr::num(1)]));
                continue;
            }

            let (base, exp) = factor.as_base_exp();
            let s = side(&exp);
            match groups.iter_mut().find(|(b, bs, _)| *bs == s && b == base) {
                Some((_, _, exps)) => exps.push(exp),
                None => groups.push((base.clone(), s, vec![exp])),
            }
        }

        if groups.len() == factors.len() {
            return None;
        }

        let new_factors = groups.into_iter()
            .filter_map(|(base, _, mut exps)| {
                let exp = if exps.len() == 1 {
                    exps.remove(0)
                } else if exps.iter().all(Expr::is_number) {
                    let sum = exps.iter()
                        .filter_map(Expr::as_number)
                        .fold(Rational::new(), |acc, n| acc + n);
                    Expr::from(sum)
                } else {
                    Expr::Add(exps)
                };

                if exp.is_number_eq(0) {
                    None
                } else if exp.is_number_eq(1) {
                    Some(base)
                } else {
                    Some(base.pow(exp))
                }
            })
            .collect::<Vec<_>>();
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// `exp(a)*exp(b) = exp(a+b)`
pub fn combine_exponentials(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let is_exp = |factor: &Expr| factor.as_call().map_or(false, |(func, _)| func == Func::Exp);
        if factors.iter().filter(|factor| is_exp(factor)).count() < 2 {
            return None;
        }

        let mut args = Vec::new();
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_call() {
                Some((Func::Exp, arg)) => args.push(arg.clone()),
                _ => new_factors.push(factor.clone()),
            }
        }
        new_factors.push(Expr::call(Func::Exp, Expr::Add(args)));
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::Exponential);
    Some(opt)
}

/// If the factor is a positive number raised to a non-integer rational power, returns the base and
/// the exponent.
fn numeric_radical(factor: &Expr) -> Option<(&Rational, &Rational)> {
    match factor {
        Expr::Exp(base, exp) => {
            let base = base.as_number().filter(|n| n.cmp0().is_gt())?;
            let exp = exp.as_number().filter(|n| *n.denom() != 1)?;
            Some((base, exp))
        },
        _ => None,
    }
}

/// Combines radicals of numbers with the same exponent.
///
/// `2^(1/2)*3^(1/2) = 6^(1/2)`
pub fn combine_radicals(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let radicals = factors.iter().filter_map(numeric_radical).collect::<Vec<_>>();
        let (_, exp) = radicals.iter().enumerate().find_map(|(i, (_, exp))| {
            radicals[i + 1..].iter().any(|(_, other)| other == exp).then_some((i, *exp))
        })?;
        let exp = exp.clone();

        let mut base = rational(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match numeric_radical(factor) {
                Some((b, e)) if *e == exp => base *= b,
                _ => new_factors.push(factor.clone()),
            }
        }
        new_factors.push(Expr::from(base).pow(Expr::from(exp)));
        Some(Expr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::CombineRadicals);
    Some(opt)
}

/// Distributes a numeric factor over a sum.
///
/// `2(a+b) = 2a+2b`
/// `-(a-b) = b-a`
pub fn distribute_number(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        let [a, b] = factors else {
            return None;
        };
        let (n, terms) = match (a, b) {
            (Expr::Add(terms), n) | (n, Expr::Add(terms)) if n.is_number() => (n, terms),
            _ => return None,
        };

        Some(Expr::Add(terms.iter().map(|term| n.clone() * term.clone()).collect()))
    })?;

    step_collector.push(Step::DistributeNumber);
    Some(opt)
}

/// Distributes a product over all of its sums.
///
/// `a(b+c) = ab+ac`
/// `(a+b)(c+d) = ac+ad+bc+bd`
pub fn distribute(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Add(_))) {
            return None;
        }

        let mut products: Vec<Vec<Expr>> = vec![Vec::new()];
        for factor in factors {
            match factor {
                Expr::Add(terms) => {
                    if products.len() * terms.len() > MAX_EXPANDED_TERMS {
                        return None;
                    }
                    products = products.iter()
                        .flat_map(|product| terms.iter().map(move |term| {
                            let mut product = product.clone();
                            product.push(term.clone());
                            product
                        }))
                        .collect();
                },
                other => products.iter_mut().for_each(|product| product.push(other.clone())),
            }
        }

        Some(Expr::Add(products.into_iter().map(Expr::Mul).collect()))
    })?;

    step_collector.push(Step::Distribute);
    Some(opt)
}

/// Sorts the factors into canonical order, with the numeric coefficient first.
pub fn sort_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_multiply(expr, |factors| {
        if factors.windows(2).all(|pair| pair[0].factor_cmp(&pair[1]).is_le()) {
            return None;
        }

        let mut sorted = factors.to_vec();
        sorted.sort_by(Expr::factor_cmp);
        Some(Expr::Mul(sorted))
    })?;

    step_collector.push(Step::SortFactors);
    Some(opt)
}

/// Applies all multiplication rules enabled by the options.
pub fn all(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if !matches!(expr, Expr::Mul(_)) {
        return None;
    }

    let folding: [(bool, Rule); 6] = [
        (options.trivial, flatten),
        (options.trivial, multiply_zero),
        (options.trivial, multiply_numbers),
        (options.trivial, combine_exponentials),
        (options.trivial, combine_radicals),
        (options.trivial, distribute_number),
    ];
    folding.iter()
        .filter(|(enabled, _)| *enabled)
        .find_map(|(_, rule)| rule(expr, step_collector))
        .or_else(|| {
            options.trivial
                .then(|| combine_like_factors(expr, options.reduce_quotients, step_collector))
                .flatten()
        })
        .or_else(|| options.expand.then(|| distribute(expr, step_collector)).flatten())
        .or_else(|| options.canonical_ordering.then(|| sort_factors(expr, step_collector)).flatten())
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse_expr, simplify, simplify_with, SimplifyOptions};
    use pretty_assertions::assert_eq;

    #[test]
    fn numerator_and_denominator_stay_apart() {
        let options = SimplifyOptions::default().with_reduce_quotients(false);
        let expr = simplify_with(&parse_expr("x^2/x").unwrap(), &options);
        assert_eq!(expr.to_string(), "x^2/x");

        let expr = simplify(&parse_expr("x^2/x").unwrap());
        assert_eq!(expr.to_string(), "x");
    }

    #[test]
    fn exponentials_combine() {
        let expr = simplify(&parse_expr("exp(x) * exp(2x)").unwrap());
        assert_eq!(expr.to_string(), "exp(3*x)");
    }

    #[test]
    fn numbers_distribute() {
        let expr = simplify(&parse_expr("-(x - 2)").unwrap());
        assert_eq!(expr.to_string(), "-x + 2");
    }
}
