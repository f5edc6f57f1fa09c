//! Simplification rules for expressions involving addition, including combining like terms.

use crate::primitive::rational;
use crate::symbolic::{
    expr::{Expr, Func},
    simplify::{rules::{do_add, Rule}, step::{Step, StepCollector}, SimplifyOptions},
};
use rug::Rational;

/// Rebuilds a term from its coefficient and the remaining factors. Returns [`None`] if the term
/// is zero.
fn scaled(coeff: Rational, rest: Expr) -> Option<Expr> {
    if coeff.cmp0().is_eq() {
        None
    } else if rest.is_number_eq(1) {
        Some(Expr::from(coeff))
    } else if coeff == 1 {
        Some(rest)
    } else {
        Some(Expr::from(coeff) * rest)
    }
}

/// `a+(b+c) = a+b+c`
pub fn flatten(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if terms.len() < 2 {
            return Some(Expr::Add(terms.to_vec()).downgrade());
        }
        if !terms.iter().any(|term| matches!(term, Expr::Add(_))) {
            return None;
        }

        let flat = terms.iter()
            .flat_map(|term| term.terms().iter().cloned())
            .collect::<Vec<_>>();
        Some(Expr::Add(flat).downgrade())
    })?;

    // keep the step collection logic outside of the closure
    step_collector.push(Step::Flatten);
    Some(opt)
}

/// Adds all numeric terms together, dropping the sum if it is zero.
///
/// `2+x+3 = x+5`
/// `x+0 = x`
pub fn add_numbers(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let count = terms.iter().filter(|term| term.is_number()).count();
        let has_zero = terms.iter().any(|term| term.is_number_eq(0));
        if count == 0 || (count == 1 && !has_zero) {
            return None;
        }

        let mut sum = rational(0);
        let mut new_terms = Vec::with_capacity(terms.len() - count + 1);
        for term in terms {
            match term.as_number() {
                Some(n) => sum += n,
                None => new_terms.push(term.clone()),
            }
        }
        if sum.cmp0().is_ne() {
            new_terms.push(Expr::from(sum));
        }
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `2a+3a = 5a`
/// `2a-2a = 0`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        // this is O(n^2) worst case, due to scanning the groups for each term
        let mut groups: Vec<(Expr, Rational)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = term.split_coefficient();
            match groups.iter_mut().find(|(r, _)| *r == rest) {
                Some((_, c)) => *c += coeff,
                None => groups.push((rest, coeff)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
            .filter_map(|(rest, coeff)| scaled(coeff, rest))
            .collect::<Vec<_>>();
        Some(Expr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// If the term contains the factor `func(u)^2`, returns `u`, the numeric coefficient of the term,
/// and the remaining factors.
fn split_square(term: &Expr, func: Func) -> Option<(Expr, Rational, Expr)> {
    let (coeff, rest) = term.split_coefficient();
    let factors = rest.factors();
    let idx = factors.iter().position(|factor| match factor {
        Expr::Exp(base, exp) => exp.is_number_eq(2) && base.as_call().map_or(false, |(f, _)| f == func),
        _ => false,
    })?;

    let arg = match &factors[idx] {
        Expr::Exp(base, _) => base.as_call()?.1.clone(),
        _ => return None,
    };
    let others = factors.iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, factor)| factor.clone())
        .collect::<Vec<_>>();
    Some((arg, coeff, Expr::Mul(others).downgrade()))
}

/// Finds two terms `c*r*f(u)^2` and `k*c*r*g(u)^2` and replaces them with `c*r`.
fn pythagorean_pair(terms: &[Expr], f: Func, g: Func, k: i32) -> Option<Expr> {
    for (i, term) in terms.iter().enumerate() {
        let Some((arg, coeff, rest)) = split_square(term, f) else {
            continue;
        };

        let partner = terms.iter().enumerate().position(|(j, other)| {
            j != i && split_square(other, g).map_or(false, |(other_arg, other_coeff, other_rest)| {
                other_arg == arg && other_rest == rest && other_coeff == Rational::from(&coeff * k)
            })
        });
        let Some(partner) = partner else {
            continue;
        };

        let mut new_terms = terms.iter()
            .enumerate()
            .filter(|(j, _)| *j != i && *j != partner)
            .map(|(_, term)| term.clone())
            .collect::<Vec<_>>();
        new_terms.extend(scaled(coeff, rest));
        return Some(Expr::Add(new_terms).downgrade());
    }

    None
}

/// `sin(x)^2+cos(x)^2 = 1`
/// `cosh(x)^2-sinh(x)^2 = 1`
pub fn pythagorean(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        pythagorean_pair(terms, Func::Sin, Func::Cos, 1)
            .or_else(|| pythagorean_pair(terms, Func::Cosh, Func::Sinh, -1))
    })?;

    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// If the term is `n*f(a)` with integer `n` and a positive argument `a`, returns `a^n`.
fn log_argument(term: &Expr, func: Func) -> Option<Expr> {
    let (coeff, rest) = term.split_coefficient();
    let (f, arg) = rest.as_call()?;
    if f != func || *coeff.denom() != 1 || !arg.is_positive() {
        return None;
    }
    if coeff == 1 {
        Some(arg.clone())
    } else {
        Some(arg.clone().pow(Expr::from(coeff)))
    }
}

/// Combines logarithms of positive arguments.
///
/// `ln(2)+ln(3) = ln(6)`
/// `2ln(3)-ln(2) = ln(9/2)`
pub fn fold_logarithms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        [Func::Ln, Func::Lg].into_iter().find_map(|func| {
            let arguments = terms.iter()
                .map(|term| log_argument(term, func))
                .collect::<Vec<_>>();
            if arguments.iter().filter(|arg| arg.is_some()).count() < 2 {
                return None;
            }

            let mut new_terms = Vec::new();
            let mut product = Vec::new();
            for (term, arg) in terms.iter().zip(arguments) {
                match arg {
                    Some(arg) => product.push(arg),
                    None => new_terms.push(term.clone()),
                }
            }
            new_terms.push(Expr::call(func, Expr::Mul(product)));
            Some(Expr::Add(new_terms).downgrade())
        })
    })?;

    step_collector.push(Step::FoldLogarithms);
    Some(opt)
}

/// Returns the non-numeric factors of the term as `(base, exponent)` pairs, where the exponent is
/// a positive number.
fn positive_powers(term: &Expr) -> Vec<(Expr, Rational)> {
    term.factors()
        .iter()
        .filter(|factor| !factor.is_number())
        .filter_map(|factor| {
            let (base, exp) = factor.as_base_exp();
            exp.as_number()
                .filter(|n| n.cmp0().is_gt())
                .map(|n| (base.clone(), n.clone()))
        })
        .collect()
}

/// Divides the common factors out of the term.
fn divide_out(term: &Expr, common: &[(Expr, Rational)]) -> Expr {
    let mut factors = Vec::with_capacity(term.factors().len());
    for factor in term.factors() {
        let (base, exp) = factor.as_base_exp();
        match (common.iter().find(|(b, _)| b == base), exp.as_number()) {
            (Some((_, c)), Some(e)) if !factor.is_number() => {
                let remaining = Rational::from(e - c);
                if remaining.cmp0().is_ne() {
                    factors.push(base.clone().pow(Expr::from(remaining)));
                }
            },
            _ => factors.push(factor.clone()),
        }
    }
    Expr::Mul(factors).downgrade()
}

/// Pulls factors shared by every term out of the sum, using the smallest exponent that occurs.
///
/// `x^3+x^2 = x^2(x+1)`
/// `a*b+a*c = a(b+c)`
pub fn factor_common(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        let (first, rest) = terms.split_first()?;
        let mut common = positive_powers(first);
        for term in rest {
            if common.is_empty() {
                break;
            }
            let powers = positive_powers(term);
            common.retain_mut(|(base, exp)| {
                match powers.iter().find(|(b, _)| b == base) {
                    Some((_, e)) => {
                        if *e < *exp {
                            *exp = e.clone();
                        }
                        true
                    },
                    None => false,
                }
            });
        }

        if common.is_empty() {
            return None;
        }

        let sum = Expr::Add(terms.iter().map(|term| divide_out(term, &common)).collect());
        let mut factors = common.into_iter()
            .map(|(base, exp)| if exp == 1 { base } else { base.pow(Expr::from(exp)) })
            .collect::<Vec<_>>();
        factors.push(sum);
        Some(Expr::Mul(factors))
    })?;

    step_collector.push(Step::FactorCommon);
    Some(opt)
}

/// Sorts the terms into canonical order.
pub fn sort_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        if terms.windows(2).all(|pair| pair[0].term_cmp(&pair[1]).is_le()) {
            return None;
        }

        let mut sorted = terms.to_vec();
        sorted.sort_by(Expr::term_cmp);
        Some(Expr::Add(sorted))
    })?;

    step_collector.push(Step::SortTerms);
    Some(opt)
}

/// Applies all addition rules enabled by the options.
pub fn all(
    expr: &Expr,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    if !matches!(expr, Expr::Add(_)) {
        return None;
    }

    let rules: [(bool, Rule); 7] = [
        (options.trivial, flatten),
        (options.trivial, add_numbers),
        (options.trivial, combine_like_terms),
        (options.functional_relations, pythagorean),
        (options.fold_logarithms && !options.expand_logarithms, fold_logarithms),
        (options.factor_common_terms && !options.expand, factor_common),
        (options.canonical_ordering, sort_terms),
    ];
    rules.iter()
        .filter(|(enabled, _)| *enabled)
        .find_map(|(_, rule)| rule(expr, step_collector))
}
