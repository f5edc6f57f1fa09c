//! Solving `f = g`.
//!
//! [`solve`] normalizes the equation, then applies transformations that keep it equivalent:
//! moving terms and factors free of the variable to the right-hand side, taking roots of both
//! sides, and inverting functions. Transformations that may add roots (raising both sides to a
//! power, clearing denominators) are followed by a check of every candidate. Anything else is
//! handed to [`solve_zero`] as `f - g = 0`.

use cas_compute::primitive::int;
use cas_compute::symbolic::{
    simplify::fraction::{has_denominator_with, together},
    simplify_with,
    Expr,
    Func,
    SimplifyOptions,
};
use log::debug;
use rug::{Integer, Rational};
use crate::catalog::invert;
use crate::ctxt::Ctxt;
use crate::solution::SolutionSet;
use crate::validate::{satisfies, vanishes_at};
use crate::zero::solve_zero;

/// Solves `f = g` for `var`.
pub(crate) fn solve(f: &Expr, g: &Expr, var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    if !ctxt.tick() {
        return SolutionSet::empty();
    }
    let f = ctxt.simplify(f);
    let g = ctxt.simplify(g);
    debug!("solving {} = {} for {}", f, g, var);

    if ctxt.equivalent(&f, &g) {
        return SolutionSet::AllReals;
    }
    match (f.contains(var), g.contains(var)) {
        (false, false) => {
            // a difference with other symbols may vanish for some of their values, so only a
            // nonzero constant difference proves there is no solution
            let difference = ctxt.simplify(&(f.clone() - g.clone()));
            return if difference.is_constant() {
                SolutionSet::NoSolutions
            } else {
                SolutionSet::empty()
            };
        },
        (false, true) => return solve(&g, &f, var, ctxt),
        _ => {},
    }

    if let Some((f, g)) = cancel_common_terms(&f, &g) {
        debug!("cancelled common terms: {} = {}", f, g);
        return solve(&f, &g, var, ctxt);
    }

    if !g.contains(var) {
        if let Some(set) = isolate(&f, &g, var, ctxt) {
            return set;
        }
    } else if let Some(set) = solve_both_sides(&f, &g, var, ctxt) {
        return set;
    }

    solve_zero(&(f - g), var, ctxt)
}

/// Removes terms that occur on both sides of the equation. Returns [`None`] if there are none.
fn cancel_common_terms(f: &Expr, g: &Expr) -> Option<(Expr, Expr)> {
    let mut g_terms = g.terms().to_vec();
    let mut f_terms = Vec::with_capacity(f.terms().len());
    for term in f.terms() {
        match g_terms.iter().position(|other| other == term) {
            Some(i) => {
                g_terms.remove(i);
            },
            None => f_terms.push(term.clone()),
        }
    }
    (f_terms.len() < f.terms().len()).then(|| {
        (Expr::Add(f_terms).downgrade(), Expr::Add(g_terms).downgrade())
    })
}

/// Solves `f = g` where only `f` contains `var`, by undoing the outermost operation of `f`.
fn isolate(f: &Expr, g: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    if f.as_symbol() == Some(var) {
        return Some(SolutionSet::single(g.clone()));
    }

    match f {
        Expr::Add(terms) => {
            let (free, bound): (Vec<&Expr>, Vec<&Expr>) = terms.iter().partition(|t| !t.contains(var));
            if free.is_empty() {
                return None;
            }
            let moved = Expr::Add(free.into_iter().cloned().collect());
            let f = Expr::Add(bound.into_iter().cloned().collect()).downgrade();
            Some(solve(&f, &(g.clone() - moved), var, ctxt))
        },
        Expr::Mul(factors) => {
            let (free, bound): (Vec<&Expr>, Vec<&Expr>) = factors.iter().partition(|t| !t.contains(var));
            if free.is_empty() {
                return None;
            }
            let divisor = Expr::Mul(free.into_iter().cloned().collect()).downgrade();
            if ctxt.simplify(&divisor).is_zero() {
                return None;
            }
            let f = Expr::Mul(bound.into_iter().cloned().collect()).downgrade();
            Some(solve(&f, &(g.clone() / divisor), var, ctxt))
        },
        Expr::Exp(base, exp) if !exp.contains(var) => Some(isolate_base(base, exp, g, var, ctxt)),
        Expr::Exp(base, exp) if !base.contains(var) => isolate_exponent(base, exp, g, var, ctxt),
        Expr::Primary(_) => {
            let (func, arg) = f.as_call()?;
            invert(func, arg, g, var, ctxt)
        },
        _ => None,
    }
}

/// Solves `base^exp = g` for a constant `exp`.
fn isolate_base(base: &Expr, exp: &Expr, g: &Expr, var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    let root = || g.clone().pow(exp.clone().recip());
    let Some(e) = exp.as_number() else {
        debug!("taking the ({})th root of both sides", exp);
        return solve(base, &root(), var, ctxt);
    };

    let negative = g.is_constant() && g.is_negative();
    let zero = g.is_zero();
    if zero {
        return if e.cmp0().is_gt() {
            solve(base, &Expr::num(0), var, ctxt)
        } else {
            SolutionSet::NoSolutions
        };
    }

    if e.numer().is_even() {
        // `b^(2k/q) = g` means `b = ±g^(q/2k)`
        if negative {
            return SolutionSet::NoSolutions;
        }
        let root = root();
        let positive = solve(base, &root, var, ctxt);
        let negative = solve(base, &-root, var, ctxt);
        positive.union(negative)
    } else if e.denom().is_even() {
        // even roots are nonnegative
        if negative {
            return SolutionSet::NoSolutions;
        }
        solve(base, &root(), var, ctxt)
    } else {
        solve(base, &root(), var, ctxt)
    }
}

/// Solves `base^exp = g` for a positive constant `base` other than `1`.
fn isolate_exponent(base: &Expr, exp: &Expr, g: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    if !base.is_positive() || base.is_number_eq(1) {
        return None;
    }
    if g.is_constant() && !g.is_positive() {
        return Some(SolutionSet::NoSolutions);
    }
    let log = |e: Expr| Expr::call(Func::Ln, e);
    let rhs = simplify_with(
        &(log(g.clone()) / log(base.clone())),
        &SimplifyOptions::default().with_expand_logarithms(true),
    );
    Some(solve(exp, &rhs, var, ctxt))
}

/// Returns the denominator of a constant rational exponent, treating anything that is not a power
/// as a power with exponent `1`.
fn root_index(expr: &Expr) -> Option<Integer> {
    match expr {
        Expr::Exp(_, exp) => exp.as_number().map(|e| e.denom().clone()),
        _ => Some(int(1)),
    }
}

/// Applies the strategies that need both sides of the equation.
fn solve_both_sides(f: &Expr, g: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    if has_denominator_with(f, var) || has_denominator_with(g, var) {
        let (numer, denom) = together(&(f.clone() - g.clone()));
        let denom = ctxt.simplify(&denom);
        if denom.contains(var) {
            debug!("clearing denominator {}", denom);
            let set = solve_zero(&numer, var, ctxt)
                .retain(|root| !vanishes_at(&denom, var, root));
            return Some(set);
        }
    }

    if let (Some(a), Some(b)) = (root_index(f), root_index(g)) {
        let m = a.lcm(&b);
        if m > 1 {
            debug!("raising both sides to the power {}", m);
            let power = Expr::from(Rational::from(m.clone()));
            let raised = solve(
                &f.clone().pow(power.clone()),
                &g.clone().pow(power),
                var,
                ctxt,
            );
            return Some(if m.is_even() {
                raised.retain(|root| satisfies(f, g, var, root))
            } else {
                raised
            });
        }
    }

    if let (Some((func, arg)), Some((other, _))) = (f.as_call(), g.as_call()) {
        if func == other {
            return invert(func, arg, g, var, ctxt);
        }
    }

    if let Some(common) = common_factor(f, g, var) {
        debug!("cancelling the common factor {}", common);
        let reduced = solve(&(f.clone() / common.clone()), &(g.clone() / common.clone()), var, ctxt);
        let zeros = solve_zero(&common, var, ctxt);
        return Some(reduced.union(zeros));
    }

    None
}

/// Returns a factor containing `var` that occurs in both `f` and `g`.
fn common_factor(f: &Expr, g: &Expr, var: &str) -> Option<Expr> {
    f.factors()
        .iter()
        .filter(|factor| factor.contains(var))
        .find(|factor| g.factors().contains(factor))
        .cloned()
}

#[cfg(test)]
mod tests {
    use cas_compute::numerical::eval;
    use cas_compute::symbolic::parse_expr;
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn solved(f: &str, g: &str) -> SolutionSet {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        solve(&parse_expr(f).unwrap(), &parse_expr(g).unwrap(), "x", &mut ctxt)
    }

    fn sorted_values(set: &SolutionSet) -> Vec<f64> {
        let mut values = set.iter().map(|e| eval(e).unwrap().to_f64()).collect::<Vec<_>>();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    #[test]
    fn trivial_equations() {
        assert_eq!(solved("x + 1", "1 + x"), SolutionSet::AllReals);
        assert_eq!(solved("2", "3"), SolutionSet::NoSolutions);
        assert_eq!(solved("3", "x").to_string(), "{3}");
        assert_eq!(solved("x + y", "y + 2").to_string(), "{2}");
    }

    #[test]
    fn sides_free_of_the_variable() {
        assert_eq!(solved("a", "b"), SolutionSet::empty());
        assert_eq!(solved("a*y", "2"), SolutionSet::empty());
        assert_eq!(solved("a + 1", "a"), SolutionSet::NoSolutions);
        assert_eq!(solved("pi", "3"), SolutionSet::NoSolutions);
    }

    #[test]
    fn moving_terms_and_factors() {
        assert_eq!(solved("2x + 3", "7").to_string(), "{2}");
        assert_eq!(solved("a*x + b", "0").to_string(), "{-b/a}");
        assert_eq!(solved("0*x", "1"), SolutionSet::NoSolutions);
    }

    #[test]
    fn roots_of_both_sides() {
        assert_eq!(sorted_values(&solved("x^2", "9")), vec![-3.0, 3.0]);
        assert_eq!(solved("x^2", "-1"), SolutionSet::NoSolutions);
        assert_eq!(solved("x^(1/2)", "-1"), SolutionSet::NoSolutions);
        assert_eq!(solved("x^3", "-8").to_string(), "{-2}");
        assert_eq!(solved("x^(1/2)", "3").to_string(), "{9}");
    }

    #[test]
    fn exponential_equations() {
        assert_eq!(solved("2^x", "8").to_string(), "{3}");
        assert_eq!(solved("2^x", "-8"), SolutionSet::NoSolutions);
    }

    #[test]
    fn squaring_rejects_extra_roots() {
        assert_eq!(solved("(x + 2)^(1/2)", "x").to_string(), "{2}");
    }

    #[test]
    fn common_factors() {
        let set = solved("x(x + 1)", "2x");
        assert_eq!(sorted_values(&set), vec![0.0, 1.0]);
    }
}
