//! Reducers for equations in a single exponential or a single angle.
//!
//! If every occurrence of the variable is inside `exp(c*x + d)` for rational multiples `c`, the
//! equation is a rational function of `X = exp(t*x)`, where `t` is the greatest common divisor of
//! the multiples. Likewise, if every occurrence is inside `sin(c*x)` or `cos(c*x)`, the equation
//! is a polynomial in `sin(t*x)` and `cos(t*x)`, which the Pythagorean identity turns into a
//! polynomial in one of them.

use cas_compute::primitive::{int, rational};
use cas_compute::symbolic::{derivative, simplify_with, Expr, Func, Primary, SimplifyOptions};
use log::debug;
use rug::{Integer, Rational};
use crate::ctxt::Ctxt;
use crate::dispatch::solve;
use crate::param::{fresh_parameter, ParamKind};
use crate::solution::SolutionSet;
use crate::zero::solve_zero_exhaustive;

/// The largest multiple of the base angle expanded by the trigonometric reducer.
const MAX_ANGLE_MULTIPLE: usize = 32;

/// If `arg` is `c*var + d` with rational `c != 0` and `d` free of `var`, returns `c` and `d`.
fn linear_in(arg: &Expr, var: &str, ctxt: &Ctxt) -> Option<(Rational, Expr)> {
    let slope = ctxt.simplify(&derivative(arg, var).ok()?);
    let c = slope.as_number().filter(|c| c.cmp0().is_ne())?.clone();
    let d = ctxt.simplify(&(arg.clone() - Expr::from(c.clone()) * Expr::sym(var)));
    (!d.contains(var)).then_some((c, d))
}

/// Returns the arguments of every call in `f` that contains `var`, or [`None`] if some call is not
/// to one of the given functions.
fn calls_of<'a>(f: &'a Expr, var: &str, funcs: &[Func]) -> Option<Vec<(Func, &'a Expr)>> {
    let mut calls = Vec::new();
    for expr in f.post_order_iter() {
        match expr.as_call() {
            Some((func, arg)) if expr.contains(var) => {
                if !funcs.contains(&func) {
                    return None;
                }
                calls.push((func, arg));
            },
            _ => {},
        }
    }
    Some(calls)
}

/// Returns the greatest common divisor of the numerators divided by the least common multiple of
/// the denominators, a rational that divides every multiple into an integer.
fn common_step<'a>(multiples: impl IntoIterator<Item = &'a Rational>) -> Option<Rational> {
    let (numer, denom) = multiples.into_iter().fold(
        (Integer::new(), int(1)),
        |(n, d), c| (n.gcd(c.numer()), d.lcm(c.denom())),
    );
    (numer != 0).then(|| rational((numer, denom)))
}

/// Replaces every call to `func` containing `var` using `f`, leaving other subexpressions alone.
fn replace_calls(expr: &Expr, var: &str, f: &mut dyn FnMut(Func, &Expr) -> Option<Expr>) -> Option<Expr> {
    match expr {
        Expr::Primary(Primary::Call(func, arg)) if expr.contains(var) => f(*func, arg),
        _ if !expr.contains(var) => Some(expr.clone()),
        Expr::Primary(_) => Some(expr.clone()),
        Expr::Add(terms) => terms.iter()
            .map(|term| replace_calls(term, var, f))
            .collect::<Option<Vec<_>>>()
            .map(Expr::Add),
        Expr::Mul(factors) => factors.iter()
            .map(|factor| replace_calls(factor, var, f))
            .collect::<Option<Vec<_>>>()
            .map(Expr::Mul),
        Expr::Exp(base, exp) => Some(replace_calls(base, var, f)?.pow(replace_calls(exp, var, f)?)),
    }
}

/// Solves `f = 0` if `f` is a rational function of `exp(t*var)`.
pub(crate) fn solve_exponential(f: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    let calls = calls_of(f, var, &[Func::Exp])?;
    if calls.is_empty() {
        return None;
    }
    let linear = calls.iter()
        .map(|(_, arg)| linear_in(arg, var, ctxt))
        .collect::<Option<Vec<_>>>()?;
    let step = common_step(linear.iter().map(|(c, _)| c))?;

    let x_name = fresh_parameter(ParamKind::Placeholder, &[f]);
    let x = Expr::sym(&x_name);
    let rewritten = {
        let view: &Ctxt = ctxt;
        replace_calls(f, var, &mut |_, arg| {
            let (c, d) = linear_in(arg, var, view)?;
            let power = Expr::from(c / step.clone());
            Some(Expr::call(Func::Exp, d) * x.clone().pow(power))
        })?
    };
    let reduced = ctxt.simplify(&rewritten);
    if reduced.contains(var) {
        return None;
    }

    let base = Expr::call(Func::Exp, Expr::from(step) * Expr::sym(var));
    debug!("exponential substitution {} = {}: {} = 0", x_name, base, reduced);
    let (roots, complete) = solve_zero_exhaustive(&reduced, &x_name, ctxt);
    Some(roots.flat_map_with(complete, |root| solve(&base, &root, var, ctxt)))
}

/// Returns `(sin(k*t), cos(k*t))` as polynomials in `s = sin(t)` and `c = cos(t)`, for
/// `k = 0..=n`.
fn multiple_angles(n: usize, s: &Expr, c: &Expr) -> Vec<(Expr, Expr)> {
    let mut table = vec![(Expr::num(0), Expr::num(1)), (s.clone(), c.clone())];
    for k in 2..=n {
        let (sin_1, cos_1) = table[k - 1].clone();
        let (sin_2, cos_2) = table[k - 2].clone();
        let two_c = Expr::num(2) * c.clone();
        table.push((two_c.clone() * sin_1 - sin_2, two_c * cos_1 - cos_2));
    }
    table
}

/// Returns true if the symbol `name` occurs in `expr` only raised to even integer powers.
fn only_even_powers(expr: &Expr, name: &str) -> bool {
    match expr {
        Expr::Exp(base, exp) if base.as_symbol() == Some(name) => {
            exp.as_integer().map_or(false, |n| n.is_even())
        },
        Expr::Primary(Primary::Symbol(sym)) => sym != name,
        Expr::Primary(Primary::Call(_, arg)) => only_even_powers(arg, name),
        Expr::Primary(Primary::Number(_)) => true,
        Expr::Add(children) | Expr::Mul(children) => {
            children.iter().all(|child| only_even_powers(child, name))
        },
        Expr::Exp(base, exp) => only_even_powers(base, name) && only_even_powers(exp, name),
    }
}

/// Replaces `name^(2j)` with `(1 - other^2)^j`.
fn eliminate(expr: &Expr, name: &str, other: &Expr) -> Expr {
    match expr {
        Expr::Exp(base, exp) if base.as_symbol() == Some(name) => {
            let half = exp.as_number().cloned().unwrap_or_default() / rational(2);
            (Expr::num(1) - other.clone().pow(Expr::num(2))).pow(Expr::from(half))
        },
        expr => expr.map_children(|child| eliminate(child, name, other)),
    }
}

/// Solves `f = 0` if `f` is a polynomial in `sin(c*var)` and `cos(c*var)` for rational `c`.
pub(crate) fn solve_trigonometric(f: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    let calls = calls_of(f, var, &[Func::Sin, Func::Cos])?;
    if calls.is_empty() {
        return None;
    }
    let mut multiples = Vec::with_capacity(calls.len());
    for (_, arg) in &calls {
        let (c, d) = linear_in(arg, var, ctxt)?;
        if !d.is_zero() {
            return None;
        }
        multiples.push(c);
    }
    let step = common_step(&multiples)?;
    let largest = multiples.iter()
        .map(|c| Rational::from(c / &step).numer().clone().abs())
        .max()?
        .to_usize()
        .filter(|&n| n <= MAX_ANGLE_MULTIPLE)?;

    let s_name = fresh_parameter(ParamKind::Placeholder, &[f]);
    let s = Expr::sym(&s_name);
    let c_name = fresh_parameter(ParamKind::Placeholder, &[f, &s]);
    let c = Expr::sym(&c_name);
    let table = multiple_angles(largest, &s, &c);

    let view: &Ctxt = ctxt;
    let rewritten = replace_calls(f, var, &mut |func, arg| {
        let (multiple, _) = linear_in(arg, var, view)?;
        let k = Rational::from(&multiple / &step);
        let index = k.numer().clone().abs().to_usize()?;
        let (sin_k, cos_k) = table.get(index)?.clone();
        Some(match (func, k.cmp0().is_lt()) {
            (Func::Sin, false) => sin_k,
            (Func::Sin, true) => -sin_k,
            _ => cos_k,
        })
    })?;
    let expanded = simplify_with(
        &rewritten,
        &SimplifyOptions::default().with_expand(true).with_max_expand_power(largest as u32 + 1),
    );

    let (target, name, reduced) = if only_even_powers(&expanded, &c_name) {
        (Func::Sin, s_name, eliminate(&expanded, &c_name, &s))
    } else if only_even_powers(&expanded, &s_name) {
        (Func::Cos, c_name, eliminate(&expanded, &s_name, &c))
    } else {
        return None;
    };
    let reduced = ctxt.simplify(&reduced);
    if reduced.contains(var) {
        return None;
    }

    let angle = Expr::call(target, Expr::from(step) * Expr::sym(var));
    debug!("trigonometric substitution {} = {}: {} = 0", name, angle, reduced);
    let (roots, complete) = solve_zero_exhaustive(&reduced, &name, ctxt);
    Some(roots.flat_map_with(complete, |root| solve(&angle, &root, var, ctxt)))
}

#[cfg(test)]
mod tests {
    use cas_compute::symbolic::{parse_expr, simplify};
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(s: &str) -> Expr {
        simplify(&parse_expr(s).unwrap())
    }

    #[test]
    fn step_between_multiples() {
        let multiples = [rational((2, 3)), rational((4, 9)), rational(2)];
        assert_eq!(common_step(&multiples), Some(rational((2, 9))));
        assert_eq!(common_step(&[]), None);
    }

    #[test]
    fn double_angle() {
        let table = multiple_angles(2, &Expr::sym("s"), &Expr::sym("c"));
        let (sin_2, cos_2) = &table[2];
        let options = SimplifyOptions::default().with_expand(true);
        assert_eq!(simplify_with(sin_2, &options).to_string(), "2*c*s");
        assert_eq!(simplify_with(cos_2, &options).to_string(), "2*c^2 - 1");
    }

    #[test]
    fn rejects_mixed_forms() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        assert_eq!(solve_exponential(&expr("exp(x) + x"), "x", &mut ctxt), None);
        assert_eq!(solve_exponential(&expr("exp(x^2) - 1"), "x", &mut ctxt), None);
        assert_eq!(solve_trigonometric(&expr("sin(x) + tan(x)"), "x", &mut ctxt), None);
        assert_eq!(solve_trigonometric(&expr("sin(x + 1) - 1"), "x", &mut ctxt), None);
    }

    #[test]
    fn exponential_polynomial() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let set = solve_exponential(&expr("exp(2x) - 3exp(x) + 2"), "x", &mut ctxt).unwrap();
        assert_eq!(set.len(), Some(2));
        assert!(set.iter().any(|e| e.is_number_eq(0)));
    }

    #[test]
    fn exponential_with_partial_roots() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);

        // X^5 + X^4 + X^2 - 2X - 3 has the root X = -1, and a positive root of X^4 + X - 3 that is
        // not found
        let f = expr("exp(5x) + exp(4x) + exp(2x) - 2exp(x) - 3");
        let set = solve_exponential(&f, "x", &mut ctxt).unwrap();
        assert_eq!(set, SolutionSet::empty());

        // both roots of X^2 + 3X + 2 are negative
        let f = expr("exp(2x) + 3exp(x) + 2");
        assert_eq!(solve_exponential(&f, "x", &mut ctxt), Some(SolutionSet::NoSolutions));
    }

    #[test]
    fn sine_and_cosine() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        // cos(2x) + sin(x) = 1 - 2sin(x)^2 + sin(x): sin(x) = 1 or sin(x) = -1/2
        let set = solve_trigonometric(&expr("cos(2x) + sin(x)"), "x", &mut ctxt).unwrap();
        assert_eq!(set.len(), Some(3), "{}", set);
    }
}
