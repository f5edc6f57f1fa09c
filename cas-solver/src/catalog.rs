//! Inversion of the elementary functions.
//!
//! [`invert`] solves `f(u) = g` for a function `f` by solving one or more equations `u = h`.
//! Every function has one arm in the table; the arm decides which branches of the inverse apply,
//! and rejects values of `g` outside the range of `f` when `g` is a constant.
//!
//! Periodic functions produce families of solutions numbered by a fresh integer parameter `K_i`.

use cas_compute::consts::ZERO_TOLERANCE;
use cas_compute::numerical::eval;
use cas_compute::primitive::float;
use cas_compute::symbolic::{Expr, Func};
use log::debug;
use rug::Float;
use std::cmp::Ordering;
use crate::ctxt::Ctxt;
use crate::dispatch::solve;
use crate::param::{fresh_parameter, ParamKind};
use crate::solution::SolutionSet;

/// The value of a constant right-hand side, used for range checks.
struct Value(Option<Float>);

impl Value {
    fn of(expr: &Expr) -> Self {
        Self(expr.is_constant().then(|| eval(expr).ok()).flatten())
    }

    /// Compares the value to `bound`, treating values within tolerance as equal. Returns [`None`]
    /// if the value is unknown.
    fn cmp(&self, bound: &Float) -> Option<Ordering> {
        let value = self.0.as_ref()?;
        let difference = float(value - bound);
        if difference.clone().abs() < *ZERO_TOLERANCE {
            Some(Ordering::Equal)
        } else {
            difference.partial_cmp(&0)
        }
    }

    fn cmp_int(&self, bound: i32) -> Option<Ordering> {
        self.cmp(&float(bound))
    }

    /// Returns true if the value is known and `lo <= value <= hi`, with the ends included as
    /// requested.
    fn within(&self, lo: &Float, lo_closed: bool, hi: &Float, hi_closed: bool) -> Option<bool> {
        let above = match self.cmp(lo)? {
            Ordering::Greater => true,
            Ordering::Equal => lo_closed,
            Ordering::Less => false,
        };
        let below = match self.cmp(hi)? {
            Ordering::Less => true,
            Ordering::Equal => hi_closed,
            Ordering::Greater => false,
        };
        Some(above && below)
    }
}

/// The result of a range check on the right-hand side.
enum Range {
    /// The value is in range, or is not a constant.
    Ok,
    /// The value is a constant outside the range.
    Outside,
}

impl Range {
    fn check(ok: Option<bool>) -> Self {
        match ok {
            Some(false) => Range::Outside,
            _ => Range::Ok,
        }
    }
}

fn pi_times(n: i32, d: i32) -> Float {
    float(&*cas_compute::consts::PI) * n / d
}

/// Solves `arg = h` for every `h` given, and returns the union.
fn branches(arg: &Expr, rhs: impl IntoIterator<Item = Expr>, var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    let sets = rhs.into_iter()
        .map(|h| solve(arg, &h, var, ctxt))
        .collect::<Vec<_>>();
    SolutionSet::union_all(sets)
}

/// `2πK`
fn full_turns(k: &str) -> Expr {
    Expr::num(2) * Expr::pi() * Expr::sym(k)
}

/// `πK`
fn half_turns(k: &str) -> Expr {
    Expr::pi() * Expr::sym(k)
}

/// Solves `f(arg) = f(h)`, where `h` may contain the variable.
fn invert_same(func: Func, arg: &Expr, h: &Expr, var: &str, ctxt: &mut Ctxt) -> SolutionSet {
    let k = fresh_parameter(ParamKind::Integer, &[arg, h]);
    let h = h.clone();
    match func {
        Func::Abs | Func::Cosh | Func::Sech => branches(arg, [h.clone(), -h], var, ctxt),
        Func::Sin | Func::Cosec => branches(
            arg,
            [h.clone() + full_turns(&k), Expr::pi() - h + full_turns(&k)],
            var,
            ctxt,
        ),
        Func::Cos | Func::Sec => branches(
            arg,
            [h.clone() + full_turns(&k), -h + full_turns(&k)],
            var,
            ctxt,
        ),
        Func::Tan | Func::Cot => branches(arg, [h + half_turns(&k)], var, ctxt),
        _ => branches(arg, [h], var, ctxt),
    }
}

/// Solves `f(arg) = g` for the given function, if the function can be inverted.
///
/// If `g` is a call to the same function, the arguments are equated, with extra branches for
/// functions that are not one-to-one. Otherwise `g` must be free of `var`. Returns [`None`] if
/// neither case applies.
pub(crate) fn invert(func: Func, arg: &Expr, g: &Expr, var: &str, ctxt: &mut Ctxt) -> Option<SolutionSet> {
    if let Some((other, h)) = g.as_call() {
        if other == func && h.contains(var) {
            debug!("equating arguments of {}: {} = {}", func, arg, h);
            return Some(invert_same(func, arg, h, var, ctxt));
        }
    }
    if g.contains(var) {
        return None;
    }

    debug!("inverting {}({}) = {}", func, arg, g);
    let value = Value::of(g);
    let g = g.clone();
    let call = |f: Func, e: Expr| Expr::call(f, e);
    let one = float(1);
    let zero = float(0);

    let set = match func {
        Func::Abs => match value.cmp_int(0) {
            Some(Ordering::Less) => SolutionSet::NoSolutions,
            Some(Ordering::Equal) => solve(arg, &Expr::num(0), var, ctxt),
            _ => branches(arg, [g.clone(), -g], var, ctxt),
        },
        Func::Sgn => match value.cmp_int(0) {
            Some(Ordering::Equal) => solve(arg, &Expr::num(0), var, ctxt),
            // the solutions form a half line, which cannot be listed
            Some(_) if value.cmp_int(1) == Some(Ordering::Equal)
                || value.cmp_int(-1) == Some(Ordering::Equal) => SolutionSet::empty(),
            Some(_) => SolutionSet::NoSolutions,
            None => return None,
        },
        Func::Exp => match value.cmp_int(0) {
            Some(Ordering::Less | Ordering::Equal) => SolutionSet::NoSolutions,
            _ => solve(arg, &call(Func::Ln, g), var, ctxt),
        },
        Func::Ln => solve(arg, &call(Func::Exp, g), var, ctxt),
        Func::Lg => solve(arg, &Expr::num(10).pow(g), var, ctxt),
        Func::Sin | Func::Cos => match Range::check(value.within(&-one.clone(), true, &one, true)) {
            Range::Outside => SolutionSet::NoSolutions,
            Range::Ok => {
                let k = fresh_parameter(ParamKind::Integer, &[arg, &g]);
                if func == Func::Sin {
                    let h = call(Func::Arcsin, g);
                    branches(arg, [h.clone() + full_turns(&k), Expr::pi() - h + full_turns(&k)], var, ctxt)
                } else {
                    let h = call(Func::Arccos, g);
                    branches(arg, [h.clone() + full_turns(&k), -h + full_turns(&k)], var, ctxt)
                }
            },
        },
        Func::Sec | Func::Cosec => match value.cmp_int(0) {
            Some(Ordering::Equal) => SolutionSet::NoSolutions,
            _ => {
                let inner = if func == Func::Sec { Func::Cos } else { Func::Sin };
                let recip = ctxt.simplify(&g.recip());
                return invert(inner, arg, &recip, var, ctxt);
            },
        },
        Func::Tan | Func::Cot => {
            let k = fresh_parameter(ParamKind::Integer, &[arg, &g]);
            let inverse = if func == Func::Tan { Func::Arctan } else { Func::Arccot };
            solve(arg, &(call(inverse, g) + half_turns(&k)), var, ctxt)
        },
        Func::Cosh => match value.cmp_int(1) {
            Some(Ordering::Less) => SolutionSet::NoSolutions,
            Some(Ordering::Equal) => solve(arg, &Expr::num(0), var, ctxt),
            _ => {
                let h = call(Func::Arcosh, g);
                branches(arg, [h.clone(), -h], var, ctxt)
            },
        },
        Func::Sech => match Range::check(value.within(&zero, false, &one, true)) {
            Range::Outside => SolutionSet::NoSolutions,
            Range::Ok if value.cmp_int(1) == Some(Ordering::Equal) => {
                solve(arg, &Expr::num(0), var, ctxt)
            },
            Range::Ok => {
                let h = call(Func::Arsech, g);
                branches(arg, [h.clone(), -h], var, ctxt)
            },
        },
        Func::Tanh => match Range::check(value.within(&-one.clone(), false, &one, false)) {
            Range::Outside => SolutionSet::NoSolutions,
            Range::Ok => solve(arg, &call(Func::Artanh, g), var, ctxt),
        },
        Func::Coth => match value.within(&-one.clone(), true, &one, true) {
            Some(true) => SolutionSet::NoSolutions,
            _ => solve(arg, &call(Func::Arcoth, g), var, ctxt),
        },
        Func::Cosech | Func::Arcoth | Func::Arcosech => match value.cmp_int(0) {
            Some(Ordering::Equal) => SolutionSet::NoSolutions,
            _ => {
                let inverse = match func {
                    Func::Cosech => Func::Arcosech,
                    Func::Arcoth => Func::Coth,
                    _ => Func::Cosech,
                };
                solve(arg, &call(inverse, g), var, ctxt)
            },
        },
        Func::Sinh => solve(arg, &call(Func::Arsinh, g), var, ctxt),
        Func::Arsinh => solve(arg, &call(Func::Sinh, g), var, ctxt),
        Func::Artanh => solve(arg, &call(Func::Tanh, g), var, ctxt),
        Func::Arcosh | Func::Arsech => match value.cmp_int(0) {
            Some(Ordering::Less) => SolutionSet::NoSolutions,
            _ => {
                let inverse = if func == Func::Arcosh { Func::Cosh } else { Func::Sech };
                solve(arg, &call(inverse, g), var, ctxt)
            },
        },
        Func::Arcsin => {
            let bound = pi_times(1, 2);
            match Range::check(value.within(&-bound.clone(), true, &bound, true)) {
                Range::Outside => SolutionSet::NoSolutions,
                Range::Ok => solve(arg, &call(Func::Sin, g), var, ctxt),
            }
        },
        Func::Arccos => match Range::check(value.within(&zero, true, &pi_times(1, 1), true)) {
            Range::Outside => SolutionSet::NoSolutions,
            Range::Ok => solve(arg, &call(Func::Cos, g), var, ctxt),
        },
        Func::Arctan => {
            let bound = pi_times(1, 2);
            match Range::check(value.within(&-bound.clone(), false, &bound, false)) {
                Range::Outside => SolutionSet::NoSolutions,
                Range::Ok => solve(arg, &call(Func::Tan, g), var, ctxt),
            }
        },
        Func::Arccot => match Range::check(value.within(&zero, false, &pi_times(1, 1), false)) {
            Range::Outside => SolutionSet::NoSolutions,
            Range::Ok => solve(arg, &call(Func::Cot, g), var, ctxt),
        },
    };
    Some(set)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cas_compute::symbolic::parse_expr;
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(s: &str) -> Expr {
        parse_expr(s).unwrap()
    }

    fn invert_str(func: Func, g: &str) -> Option<SolutionSet> {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        invert(func, &expr("x"), &expr(g), "x", &mut ctxt)
    }

    /// Returns the members of the set evaluated with every parameter set to zero, in increasing
    /// order.
    fn values(set: &SolutionSet) -> Vec<f64> {
        let mut values = set.iter()
            .map(|e| {
                let e = e.replace_variable("K_1", &Expr::num(0));
                eval(&e).unwrap().to_f64()
            })
            .collect::<Vec<_>>();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    #[test]
    fn range_checks() {
        assert_eq!(invert_str(Func::Abs, "-1"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Exp, "0"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Sin, "3/2"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Cosh, "1/2"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Sech, "2"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Tanh, "1"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Coth, "1/2"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Arccos, "4"), Some(SolutionSet::NoSolutions));
        assert_eq!(invert_str(Func::Sgn, "2"), Some(SolutionSet::NoSolutions));
    }

    #[test]
    fn single_valued() {
        assert_eq!(invert_str(Func::Ln, "0").unwrap().to_string(), "{1}");
        assert_eq!(invert_str(Func::Lg, "2").unwrap().to_string(), "{100}");
        assert_eq!(invert_str(Func::Sgn, "0").unwrap().to_string(), "{0}");
        assert_eq!(invert_str(Func::Sgn, "1"), Some(SolutionSet::empty()));
        assert_eq!(invert_str(Func::Arcsin, "pi/6").unwrap().to_string(), "{1/2}");
        assert_eq!(invert_str(Func::Sgn, "a"), None);
    }

    #[test]
    fn even_functions() {
        assert_eq!(values(&invert_str(Func::Abs, "3").unwrap()), vec![-3.0, 3.0]);
        let cosh = values(&invert_str(Func::Cosh, "2").unwrap());
        assert_eq!(cosh.len(), 2);
        assert_relative_eq!(cosh[1], 2f64.acosh(), epsilon = 1e-12);
        assert_eq!(invert_str(Func::Cosh, "1").unwrap().to_string(), "{0}");
    }

    #[test]
    fn periodic_families() {
        let sin = invert_str(Func::Sin, "1/2").unwrap();
        let values = values(&sin);
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], std::f64::consts::PI / 6.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 5.0 * std::f64::consts::PI / 6.0, epsilon = 1e-12);
        assert!(sin.iter().all(|e| e.contains("K_1")));

        // both branches coincide at the maximum
        assert_eq!(invert_str(Func::Sin, "1").unwrap().len(), Some(1));

        let tan = invert_str(Func::Tan, "1").unwrap();
        assert_eq!(tan.len(), Some(1));
    }

    #[test]
    fn same_function_both_sides() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let set = invert(Func::Abs, &expr("x - 1"), &expr("abs(2x)"), "x", &mut ctxt).unwrap();
        let mut values = values(&set);
        values.dedup();
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 1.0 / 3.0, epsilon = 1e-12);
    }
}
