//! The substitution engine.
//!
//! If some subexpression `s` of `f` is the only way the variable occurs in `f` (up to rational
//! multiples and rational powers of `s`), then `f = 0` can be solved by writing `f` in terms of a
//! placeholder `X_i = s`, solving for `X_i`, and then solving `s = r` for each root `r`.
//!
//! `ln(x)^2 - 3ln(x) + 2 = 0` becomes `X_1^2 - 3X_1 + 2 = 0` with `X_1 = ln(x)`.

use cas_compute::symbolic::{derivative, simplify, Expr, Func, Primary};
use log::{debug, trace};
use rug::Rational;
use crate::ctxt::Ctxt;
use crate::dispatch::solve;
use crate::param::{fresh_parameter, ParamKind};
use crate::solution::SolutionSet;
use crate::zero::solve_zero_exhaustive;

/// The maximum nesting of rewrites attempted by [`substitute`].
const MAX_DEPTH: usize = 16;

/// Returns the first factor of `expr` that contains `var`.
fn leading_factor<'a>(expr: &'a Expr, var: &str) -> Option<&'a Expr> {
    expr.factors().iter().find(|factor| factor.contains(var))
}

/// Returns the first term of `expr` that contains `var`.
fn leading_term<'a>(expr: &'a Expr, var: &str) -> Option<&'a Expr> {
    expr.terms().iter().find(|term| term.contains(var))
}

/// If `term` is a rational multiple of `target`, returns the multiple.
fn multiple_of(term: &Expr, target: &Expr) -> Option<Rational> {
    let (coeff, rest) = term.split_coefficient();
    let (target_coeff, target_rest) = target.split_coefficient();
    (rest == target_rest && target_coeff.cmp0().is_ne()).then(|| coeff / target_coeff)
}

/// If `factor` is a rational power of `target`, returns the power.
fn power_of(factor: &Expr, target: &Expr) -> Option<Rational> {
    let (base, exp) = factor.as_base_exp();
    let (target_base, target_exp) = target.as_base_exp();
    if base != target_base {
        return None;
    }
    let exp = exp.as_number()?;
    let target_exp = target_exp.as_number().filter(|n| n.cmp0().is_ne())?;
    Some(Rational::from(exp / target_exp))
}

/// If `call` is `exp(c*u)` and `s` is `exp(u)` for a rational `c`, returns `c`.
fn exponential_power_of(call: &Expr, s: &Expr) -> Option<Rational> {
    match (call.as_call(), s.as_call()) {
        (Some((Func::Exp, arg)), Some((Func::Exp, target))) => multiple_of(arg, target),
        _ => None,
    }
}

/// Rewrites `f` with every occurrence of `s` replaced by `y`. The result contains `var` if the
/// rewrite was incomplete.
fn rewrite(f: &Expr, var: &str, s: &Expr, y: &Expr, depth: usize) -> Expr {
    if f == s {
        return y.clone();
    }
    if !f.contains(var) || depth > MAX_DEPTH {
        return f.clone();
    }

    if let Some(c) = exponential_power_of(f, s) {
        return y.clone().pow(Expr::from(c));
    }

    // a sum containing a multiple of `s`
    if let (Expr::Add(terms), Some(lead)) = (f, leading_term(s, var)) {
        if matches!(s, Expr::Add(_)) {
            if let Some(c) = terms.iter().find_map(|term| multiple_of(term, lead)) {
                let remainder = simplify(&(f.clone() - Expr::from(c.clone()) * s.clone()));
                trace!("{} = {}*({}) + {}", f, c, s, remainder);
                return Expr::from(c) * y.clone() + rewrite(&remainder, var, s, y, depth + 1);
            }
        }
    }

    // a product containing a power of `s`
    if let Some(lead) = leading_factor(s, var) {
        if !matches!(f, Expr::Add(_)) {
            let power = f.factors()
                .iter()
                .find_map(|factor| power_of(factor, lead).filter(|p| p.cmp0().is_ne()));
            if let Some(p) = power {
                let s_power = s.clone().pow(Expr::from(p.clone()));
                let remainder = simplify(&(f.clone() / s_power));
                if remainder != *f {
                    trace!("{} = ({})^{} * {}", f, s, p, remainder);
                    return y.clone().pow(Expr::from(p)) * rewrite(&remainder, var, s, y, depth + 1);
                }
            }
        }
    }

    f.map_children(|child| rewrite(child, var, s, y, depth + 1))
}

/// Writes `f` as an expression in the placeholder `y`, where `y` stands for `s`. Returns [`None`]
/// if `var` cannot be eliminated.
pub(crate) fn substitute(f: &Expr, var: &str, s: &Expr, y: &Expr) -> Option<Expr> {
    let rewritten = simplify(&rewrite(f, var, s, y, 0));
    (!rewritten.contains(var)).then_some(rewritten)
}

/// Proposes subexpressions of `f` to substitute, innermost first.
///
/// The candidates are calls containing `var` and their arguments, bases of powers with a constant
/// exponent (including fractional powers of `var` itself), and powers with a constant base
/// together with their exponents.
pub(crate) fn candidates(f: &Expr, var: &str) -> Vec<Expr> {
    let mut found: Vec<Expr> = Vec::new();
    let mut propose = |expr: &Expr| {
        if expr != f && expr.contains(var) && expr.as_symbol() != Some(var) && !found.contains(expr) {
            found.push(expr.clone());
        }
    };

    for expr in f.post_order_iter() {
        match expr {
            Expr::Primary(Primary::Call(_, arg)) => {
                propose(arg);
                propose(expr);
            },
            Expr::Exp(base, exp) if !exp.contains(var) => {
                if base.as_symbol() == Some(var) {
                    if exp.as_integer().is_none() {
                        propose(expr);
                    }
                } else {
                    propose(base);
                }
            },
            Expr::Exp(base, exp) if !base.contains(var) => {
                propose(expr);
                propose(exp);
            },
            _ => {},
        }
    }
    found
}

/// If `s` is `a*var + b` for constants `a != 0` and `b`, returns `a` and `b`.
fn linear_parts(s: &Expr, var: &str, ctxt: &Ctxt) -> Option<(Expr, Expr)> {
    let slope = ctxt.simplify(&derivative(s, var).ok()?);
    if slope.contains(var) || slope.is_zero() {
        return None;
    }
    let intercept = ctxt.simplify(&s.replace_variable(var, &Expr::num(0)));
    Some((slope, intercept))
}

/// Solves `s = root` for `var`.
fn back_substitute(s: &Expr, root: Expr, var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    match linear_parts(s, var, ctxt) {
        Some((slope, intercept)) => SolutionSet::single(ctxt.simplify(&((root - intercept) / slope))),
        None => solve(s, &root, var, ctxt),
    }
}

/// Solves `f = 0` by substituting each candidate subexpression in turn. Returns [`None`] if no
/// candidate leads anywhere.
pub(crate) fn solve_by_substitution(f: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    for s in candidates(f, var) {
        let y_name = fresh_parameter(ParamKind::Placeholder, &[f]);
        let y = Expr::sym(&y_name);
        let Some(reduced) = substitute(f, var, &s, &y) else {
            continue;
        };
        if !reduced.contains(&y_name) {
            continue;
        }

        debug!("substituting {} = {}: {} = 0", y_name, s, reduced);
        let (set, complete) = match solve_zero_exhaustive(&reduced, &y_name, ctxt) {
            (SolutionSet::NoSolutions, _) => return Some(SolutionSet::NoSolutions),
            (SolutionSet::AllReals, _) => continue,
            (set, _) if set.is_empty() => continue,
            found => found,
        };
        return Some(set.flat_map_with(complete, |root| back_substitute(&s, root, var, ctxt)));
    }
    None
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cas_compute::numerical::eval;
    use cas_compute::symbolic::parse_expr;
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(s: &str) -> Expr {
        simplify(&parse_expr(s).unwrap())
    }

    fn substituted(f: &str, s: &str) -> Option<String> {
        substitute(&expr(f), "x", &expr(s), &Expr::sym("y")).map(|e| e.to_string())
    }

    #[test]
    fn powers_of_a_function() {
        assert_eq!(substituted("ln(x)^2 - 3ln(x) + 2", "ln(x)").as_deref(), Some("y^2 - 3*y + 2"));
        assert_eq!(substituted("exp(2x) + exp(x)", "exp(x)").as_deref(), Some("y^2 + y"));
        assert_eq!(substituted("sin(x) + x", "sin(x)"), None);
    }

    #[test]
    fn fractional_powers() {
        assert_eq!(substituted("x - 3x^(1/2) + 2", "x^(1/2)").as_deref(), Some("y^2 - 3*y + 2"));
    }

    #[test]
    fn multiples_of_a_sum() {
        assert_eq!(substituted("(x^2 + 1)^2 + 2x^2 + 2", "x^2 + 1").as_deref(), Some("y^2 + 2*y"));
    }

    #[test]
    fn proposed_candidates() {
        let f = expr("sin(x^2 + 1) + 2^x");
        let found = candidates(&f, "x");
        assert!(found.contains(&expr("x^2 + 1")));
        assert!(found.contains(&expr("sin(x^2 + 1)")));
        assert!(found.contains(&expr("2^x")));
        assert!(!found.contains(&expr("x")));
    }

    #[test]
    fn linear_candidates() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let ctxt = Ctxt::new(&mut budget, &options);

        let (slope, intercept) = linear_parts(&expr("2x + 1"), "x", &ctxt).unwrap();
        assert_eq!(slope.to_string(), "2");
        assert_eq!(intercept.to_string(), "1");

        let (slope, intercept) = linear_parts(&expr("3 - x/2"), "x", &ctxt).unwrap();
        assert_eq!(slope.to_string(), "-1/2");
        assert_eq!(intercept.to_string(), "3");

        assert_eq!(linear_parts(&expr("x^2 + 1"), "x", &ctxt), None);
        assert_eq!(linear_parts(&expr("sin(x)"), "x", &ctxt), None);
        assert_eq!(linear_parts(&expr("y + 1"), "x", &ctxt), None);
    }

    #[test]
    fn back_substitution_of_a_linear_candidate() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let set = back_substitute(&expr("2x + 1"), Expr::num(5), "x", &mut ctxt);
        assert_eq!(set.to_string(), "{2}");

        // not linear: solved as an equation
        let set = back_substitute(&expr("x^3"), Expr::num(8), "x", &mut ctxt);
        assert_eq!(set.to_string(), "{2}");
    }

    #[test]
    fn logarithm_of_a_linear_argument() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let set = solve_by_substitution(&expr("ln(2x + 1)^2 - 1"), "x", &mut ctxt).unwrap();

        let mut values = set.iter().map(|e| eval(e).unwrap().to_f64()).collect::<Vec<_>>();
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(values.len(), 2, "{}", set);
        let e = std::f64::consts::E;
        assert_relative_eq!(values[0], (1.0 / e - 1.0) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(values[1], (e - 1.0) / 2.0, epsilon = 1e-9);
    }
}
