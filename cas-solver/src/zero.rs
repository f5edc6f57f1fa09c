//! Solving `f = 0`.
//!
//! [`solve_zero`] looks at the shape of `f` and tries, in order: splitting products, clearing
//! denominators, powers, function inversion, sums of nonnegative terms, polynomials, polynomials
//! in a fractional power of the variable, the exponential and trigonometric reducers, and the
//! substitution engine. As a last resort, functions are rewritten in terms of `sin`, `cos` and
//! `exp` and the whole process is retried once.

use cas_compute::symbolic::{simplify::fraction::{has_denominator_with, together}, Expr, Func, Primary};
use log::debug;
use rug::Integer;
use crate::catalog::invert;
use crate::ctxt::Ctxt;
use crate::param::{fresh_parameter, ParamKind};
use crate::poly::{self, Polynomial};
use crate::solution::SolutionSet;
use crate::special::{solve_exponential, solve_trigonometric};
use crate::substitution::solve_by_substitution;
use crate::validate::{positive_or_symbolic_at, vanishes_at};

/// Solves `f = 0` for `var`.
pub(crate) fn solve_zero(f: &Expr, var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    solve_zero_inner(f, var, ctxt, true)
}

fn solve_zero_inner(f: &Expr, var: &str, ctxt: &mut Ctxt, rewrite_allowed: bool) -> SolutionSet {
    if !ctxt.tick() {
        return SolutionSet::empty();
    }
    let f = ctxt.simplify(f);
    debug!("solving {} = 0 for {}", f, var);

    if !f.contains(var) {
        return if f.is_zero() {
            SolutionSet::AllReals
        } else if f.is_constant() {
            SolutionSet::NoSolutions
        } else {
            SolutionSet::empty()
        };
    }

    if let Expr::Mul(factors) = &f {
        return solve_product(factors, var, ctxt);
    }

    if let Expr::Exp(base, exp) = &f {
        if exp.as_number().map_or(false, |e| e.cmp0().is_lt()) {
            // `1/b` is never zero
            return SolutionSet::NoSolutions;
        }
        if base.contains(var) {
            return solve_zero(base, var, ctxt)
                .retain(|root| positive_or_symbolic_at(exp, var, root));
        }
    }

    if let Some((func, arg)) = f.as_call() {
        if let Some(set) = invert(func, arg, &Expr::num(0), var, ctxt) {
            return set;
        }
    }

    if f.is_always_nonnegative() {
        if f.is_always_positive() {
            return SolutionSet::NoSolutions;
        }
        if let Expr::Add(terms) = &f {
            debug!("sum of nonnegative terms: every term must vanish");
            let sets = terms.iter()
                .map(|term| solve_zero(term, var, ctxt))
                .collect::<Vec<_>>();
            return sets.into_iter()
                .reduce(SolutionSet::intersection)
                .unwrap_or_default();
        }
    }

    if let Some(poly) = Polynomial::from_expr(&f, var, ctxt.options.max_degree) {
        return solve_polynomial(poly, var, ctxt).0;
    }

    if let Some(set) = solve_fractional_power(&f, var, ctxt) {
        return set;
    }

    if let Some(set) = solve_exponential(&f, var, ctxt) {
        return set;
    }
    if let Some(set) = solve_trigonometric(&f, var, ctxt) {
        return set;
    }

    if has_denominator_with(&f, var) {
        let (numer, denom) = together(&f);
        let denom = ctxt.simplify(&denom);
        if denom.contains(var) {
            debug!("clearing denominator {}", denom);
            return solve_zero(&numer, var, ctxt)
                .retain(|root| !vanishes_at(&denom, var, root));
        }
    }

    if let Some(set) = solve_by_substitution(&f, var, ctxt) {
        return set;
    }

    if rewrite_allowed {
        let rewritten = rewrite_definitions(&f, var);
        if rewritten != f {
            debug!("rewriting {} as {}", f, rewritten);
            return solve_zero_inner(&rewritten, var, ctxt, false);
        }
    }

    debug!("no strategy applies to {} = 0", f);
    SolutionSet::empty()
}

/// Solves `p_1 * p_2 * ... = 0`. If some factors are denominators, solves the numerator and
/// drops the roots of the denominator.
fn solve_product(factors: &[Expr], var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    let is_denominator = |factor: &Expr| match factor {
        Expr::Exp(base, exp) => base.contains(var) && exp.as_number().map_or(false, |e| e.cmp0().is_lt()),
        _ => false,
    };
    let (denoms, numers): (Vec<&Expr>, Vec<&Expr>) = factors.iter()
        .filter(|factor| factor.contains(var))
        .partition(|factor| is_denominator(factor));

    if numers.is_empty() {
        return SolutionSet::NoSolutions;
    }

    let sets = numers.into_iter()
        .map(|factor| solve_zero(factor, var, ctxt))
        .collect::<Vec<_>>();
    let set = SolutionSet::union_all(sets);
    if denoms.is_empty() {
        return set;
    }

    let denom = Expr::Mul(denoms.into_iter().map(|d| d.clone().recip()).collect()).downgrade();
    let denom = ctxt.simplify(&denom);
    debug!("excluding roots of the denominator {}", denom);
    set.retain(|root| !vanishes_at(&denom, var, root))
}

/// Solves a polynomial equation, dividing out `var^k` first. The flag is true if the roots found
/// are all of its real roots.
fn solve_polynomial(mut poly: Polynomial, var: &str, ctxt: &mut Ctxt) -> (SolutionSet, bool) {
    let k = poly.order_at_zero();
    if k == 0 {
        return poly::find_roots(&poly, var, ctxt);
    }

    debug!("0 is a root of multiplicity {}", k);
    poly.shift_down(k);
    let (rest, complete) = if poly.degree() > 0 {
        poly::find_roots(&poly, var, ctxt)
    } else {
        (SolutionSet::empty(), true)
    };
    (SolutionSet::single(Expr::num(0)).union(rest), complete)
}

/// Solves `f = 0` for `var`, also reporting whether the solutions found are all of them.
///
/// Only products of polynomials with constant coefficients are ever known to be solved
/// completely. Anything else goes through [`solve_zero`] and is reported incomplete.
pub(crate) fn solve_zero_exhaustive(f: &Expr, var: &str, ctxt: &mut Ctxt) -> (SolutionSet, bool) {
    let f = ctxt.simplify(f);
    if f.factors().iter().any(|factor| !factor.contains(var) && !factor.is_constant()) {
        return (solve_zero(&f, var, ctxt), false);
    }
    let max_degree = ctxt.options.max_degree;
    let polys = f.factors()
        .iter()
        .filter(|factor| factor.contains(var))
        .map(|factor| {
            Polynomial::from_expr(factor, var, max_degree)
                .filter(|poly| (0..=poly.degree()).all(|i| poly.coeff(i).is_constant()))
        })
        .collect::<Option<Vec<_>>>();
    let Some(polys) = polys.filter(|polys| !polys.is_empty()) else {
        return (solve_zero(&f, var, ctxt), false);
    };

    let mut set = SolutionSet::NoSolutions;
    let mut complete = true;
    for poly in polys {
        if !ctxt.tick() {
            return (SolutionSet::empty(), false);
        }
        let (roots, done) = solve_polynomial(poly, var, ctxt);
        set = set.union(roots);
        complete &= done;
    }
    (set, complete)
}

/// Returns the least common multiple of the denominators of the exponents of `var`, if every
/// occurrence of `var` is a rational power of it.
fn root_degree(expr: &Expr, var: &str) -> Option<Integer> {
    match expr {
        Expr::Exp(base, exp) if base.as_symbol() == Some(var) => {
            exp.as_number().map(|e| e.denom().clone())
        },
        Expr::Primary(Primary::Symbol(sym)) if sym == var => Some(Integer::from(1)),
        _ if !expr.contains(var) => Some(Integer::from(1)),
        Expr::Primary(_) => None,
        Expr::Add(children) | Expr::Mul(children) => children.iter()
            .map(|child| root_degree(child, var))
            .try_fold(Integer::from(1), |acc, d| Some(acc.lcm(&d?))),
        Expr::Exp(base, exp) => {
            let base = root_degree(base, var)?;
            let exp = root_degree(exp, var)?;
            Some(base.lcm(&exp))
        },
    }
}

/// Replaces `var^(p/q)` with `y^(p*m/q)`, and `var` with `y^m`.
fn to_root_variable(expr: &Expr, var: &str, y: &Expr, m: &Integer) -> Expr {
    match expr {
        Expr::Exp(base, exp) if base.as_symbol() == Some(var) => match exp.as_number() {
            Some(e) => y.clone().pow(Expr::from(e.clone() * m.clone())),
            None => expr.clone(),
        },
        Expr::Primary(Primary::Symbol(sym)) if sym == var => y.clone().pow(Expr::from(m.clone())),
        expr => expr.map_children(|child| to_root_variable(child, var, y, m)),
    }
}

/// Solves `f = 0` where `var` occurs only as rational powers with a common root degree `m > 1`,
/// by substituting `var = y^m`.
fn solve_fractional_power(f: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    let m = root_degree(f, var).filter(|m| *m > 1)?;
    let y_name = fresh_parameter(ParamKind::Placeholder, &[f]);
    let y = Expr::sym(&y_name);
    let reduced = ctxt.simplify(&to_root_variable(f, var, &y, &m));
    debug!("substituting {} = {}^{}: {} = 0", var, y_name, m, reduced);

    let even = m.is_even();
    let exponent = Expr::from(m);
    let set = solve_zero(&reduced, &y_name, ctxt)
        .retain(|root| !even || !root.is_constant() || root.is_nonnegative())
        .map(|root| ctxt.simplify(&root.pow(exponent.clone())));
    Some(set)
}

/// Rewrites secant, cosecant, tangent and cotangent in terms of sine and cosine, and the
/// hyperbolic functions in terms of `exp`.
fn rewrite_definitions(expr: &Expr, var: &str) -> Expr {
    let expr = expr.map_children(|child| rewrite_definitions(child, var));
    let Some((func, arg)) = expr.as_call() else {
        return expr;
    };
    if !arg.contains(var) {
        return expr;
    }

    let arg = arg.clone();
    let sin = || Expr::call(Func::Sin, arg.clone());
    let cos = || Expr::call(Func::Cos, arg.clone());
    let exp_pos = || Expr::call(Func::Exp, arg.clone());
    let exp_neg = || Expr::call(Func::Exp, -arg.clone());
    let half = |e: Expr| e * Expr::num((1, 2));
    match func {
        Func::Sec => cos().recip(),
        Func::Cosec => sin().recip(),
        Func::Tan => sin() / cos(),
        Func::Cot => cos() / sin(),
        Func::Sinh => half(exp_pos() - exp_neg()),
        Func::Cosh => half(exp_pos() + exp_neg()),
        Func::Tanh => (exp_pos() - exp_neg()) / (exp_pos() + exp_neg()),
        Func::Coth => (exp_pos() + exp_neg()) / (exp_pos() - exp_neg()),
        Func::Sech => Expr::num(2) / (exp_pos() + exp_neg()),
        Func::Cosech => Expr::num(2) / (exp_pos() - exp_neg()),
        _ => expr,
    }
}

#[cfg(test)]
mod tests {
    use cas_compute::symbolic::parse_expr;
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn zeros(f: &str) -> SolutionSet {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        solve_zero(&parse_expr(f).unwrap(), "x", &mut ctxt)
    }

    #[test]
    fn constants() {
        assert_eq!(zeros("0"), SolutionSet::AllReals);
        assert_eq!(zeros("3"), SolutionSet::NoSolutions);
        assert_eq!(zeros("a"), SolutionSet::empty());
    }

    #[test]
    fn products_and_powers() {
        let set = zeros("x^3 + x^2");
        assert_eq!(set.len(), Some(2));
        assert!(set.iter().any(|e| e.is_number_eq(0)));
        assert!(set.iter().any(|e| e.is_number_eq(-1)));
        assert_eq!(zeros("(x - 3)^2").to_string(), "{3}");
        assert_eq!(zeros("1/(x - 3)"), SolutionSet::NoSolutions);
    }

    #[test]
    fn denominators() {
        assert_eq!(zeros("(x^2 + 5x - 14)/(x - 2)").to_string(), "{-7}");
        assert_eq!(zeros("x/(x - 1) - 2/(x - 1)").to_string(), "{2}");
    }

    #[test]
    fn nonnegative_sums() {
        assert_eq!(zeros("x^4 + 2"), SolutionSet::NoSolutions);
        assert_eq!(zeros("x^2 + abs(x)").to_string(), "{0}");
    }

    #[test]
    fn fractional_powers() {
        let set = zeros("x - 3x^(1/2) + 2");
        assert_eq!(set.len(), Some(2), "{}", set);
        assert!(set.iter().any(|e| e.is_number_eq(1)));
        assert!(set.iter().any(|e| e.is_number_eq(4)));
    }

    #[test]
    fn cross_definitions() {
        let set = zeros("sinh(x) + cosh(x) - 2");
        assert_eq!(set.to_string(), "{ln(2)}");
    }

    #[test]
    fn completeness() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let mut exhaustive = |f: &str| solve_zero_exhaustive(&parse_expr(f).unwrap(), "x", &mut ctxt);

        let (set, complete) = exhaustive("(x - 1)(x^2 + 1)");
        assert_eq!(set.to_string(), "{1}");
        assert!(complete);
        assert_eq!(exhaustive("x^2 + 1"), (SolutionSet::NoSolutions, true));

        // no stage of the root engine applies to this quartic
        assert_eq!(exhaustive("x^4 + x - 3"), (SolutionSet::empty(), false));
        assert!(!exhaustive("a*(x - 1)").1);
        assert!(!exhaustive("sin(x)").1);
    }

    #[test]
    fn exhausted_budget() {
        let mut budget = Budget::new(0);
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let set = solve_zero(&parse_expr("x - 1").unwrap(), "x", &mut ctxt);
        assert_eq!(set, SolutionSet::empty());
    }
}
