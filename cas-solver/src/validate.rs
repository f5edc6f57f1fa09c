//! Checks applied to candidate solutions.
//!
//! Some steps of the solver can introduce roots that do not solve the original equation, such as
//! squaring both sides or clearing denominators. Candidates are checked by substituting them and
//! evaluating; a candidate is only dropped when the check definitely fails.

use cas_compute::consts::ZERO_TOLERANCE;
use cas_compute::numerical::{eval, EvalError};
use cas_compute::primitive::float;
use cas_compute::symbolic::{simplify, Expr};
use log::trace;
use rug::Float;

/// Returns true if the two values are equal up to a relative tolerance.
fn approx_eq(a: &Float, b: &Float) -> bool {
    let scale = [float(1), a.clone().abs(), b.clone().abs()]
        .into_iter()
        .fold(float(0), |max, value| if value > max { value } else { max });
    float(a - b).abs() <= scale * &*ZERO_TOLERANCE
}

/// Returns true unless substituting `candidate` for `var` in `lhs = rhs` definitely fails.
///
/// Both sides are evaluated numerically. The candidate is kept if both sides are equal, or if
/// either side contains a symbol with no numeric value (such as an integer parameter). It is
/// dropped if the sides differ, or if evaluating either side leaves the domain of a function.
pub(crate) fn satisfies(lhs: &Expr, rhs: &Expr, var: &str, candidate: &Expr) -> bool {
    let lhs_value = eval(&lhs.replace_variable(var, candidate));
    let rhs_value = eval(&rhs.replace_variable(var, candidate));
    let ok = match (lhs_value, rhs_value) {
        (Ok(a), Ok(b)) => approx_eq(&a, &b),
        (Err(EvalError::UnknownSymbol(_)), _) | (_, Err(EvalError::UnknownSymbol(_))) => true,
        _ => false,
    };
    if !ok {
        trace!("rejected candidate {} = {} for {} = {}", var, candidate, lhs, rhs);
    }
    ok
}

/// Returns true if `expr` is exactly zero when `candidate` is substituted for `var`.
pub(crate) fn vanishes_at(expr: &Expr, var: &str, candidate: &Expr) -> bool {
    simplify(&expr.replace_variable(var, candidate)).is_zero()
}

/// Returns true if `expr`, with `candidate` substituted for `var`, is not a constant, or is a
/// positive constant.
pub(crate) fn positive_or_symbolic_at(expr: &Expr, var: &str, candidate: &Expr) -> bool {
    let value = simplify(&expr.replace_variable(var, candidate));
    !value.is_constant() || value.is_positive()
}

#[cfg(test)]
mod tests {
    use cas_compute::symbolic::parse_expr;
    use super::*;

    fn expr(s: &str) -> Expr {
        parse_expr(s).unwrap()
    }

    #[test]
    fn numeric_candidates() {
        assert!(satisfies(&expr("sqrt(x + 2)"), &expr("x"), "x", &expr("2")));
        assert!(!satisfies(&expr("sqrt(x + 2)"), &expr("x"), "x", &expr("-1")));
        assert!(!satisfies(&expr("ln(x)"), &expr("0"), "x", &expr("-1")));
    }

    #[test]
    fn parameters_are_kept() {
        assert!(satisfies(&expr("sin(x)"), &expr("1/2"), "x", &expr("pi/6 + 2pi*K_1")));
    }

    #[test]
    fn exact_zeros() {
        assert!(vanishes_at(&expr("x - 2"), "x", &expr("2")));
        assert!(!vanishes_at(&expr("x - 2"), "x", &expr("-7")));
        assert!(positive_or_symbolic_at(&expr("x"), "x", &expr("a")));
        assert!(!positive_or_symbolic_at(&expr("x - 1"), "x", &expr("1")));
    }
}
