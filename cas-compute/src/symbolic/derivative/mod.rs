//! Symbolic differentiation.
//!
//! The derivative is built with the sum, product, power and chain rules, and a table of
//! derivatives for every [`Func`](super::Func). The result is not simplified; pass it to
//! [`simplify`](super::simplify) to get a readable form.

mod function;

use std::fmt;
use super::expr::{Expr, Func, Primary};

/// Returns `true` if the given [`Expr`] is "clearly" zero. This is intended to clean up the
/// derivative as it is built and is not mathematically rigorous.
fn is_trivially_zero(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Number(n)) => n.cmp0().is_eq(),
        Expr::Add(terms) => terms.iter().all(is_trivially_zero),
        Expr::Mul(factors) => factors.iter().any(is_trivially_zero),
        Expr::Exp(base, exp) => is_trivially_zero(base) && exp.as_number().map_or(false, |n| n.cmp0().is_gt()),
        _ => false,
    }
}

/// Returns `true` if the given [`Expr`] is "clearly" one.
fn is_trivially_unity(e: &Expr) -> bool {
    match e {
        Expr::Primary(Primary::Number(n)) => *n == 1,
        Expr::Mul(factors) => factors.iter().all(is_trivially_unity),
        Expr::Exp(base, exp) => is_trivially_zero(exp) || is_trivially_unity(base),
        Expr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<Expr>);

impl From<MultBuilder> for Expr {
    fn from(value: MultBuilder) -> Self {
        Expr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: Expr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![Expr::num(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a summation of expressions while applying basic simplification rules.
/// Only non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<Expr>);

impl From<SumBuilder> for Expr {
    fn from(value: SumBuilder) -> Self {
        Expr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: Expr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[Expr], var: &str) -> Result<Expr, DerivativeError> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(derivative(term, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[Expr], var: &str) -> Result<Expr, DerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        if !product[derivative_index].contains(var) {
            continue;
        }

        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(derivative(term, var)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// The power rule, generalized to variable exponents.
///
/// `(a^n)' = n * a^(n-1) * a'` for `n` free of the variable
/// `(c^b)' = c^b * ln(c) * b'` for `c` free of the variable
/// `(a^b)' = a^b * (b' * ln(a) + b * a' / a)` otherwise
fn power_rule(base: &Expr, exp: &Expr, var: &str) -> Result<Expr, DerivativeError> {
    let mut mult_group = MultBuilder::default();
    match (base.contains(var), exp.contains(var)) {
        (_, false) => {
            let lowered = match exp.as_number() {
                Some(n) => Expr::from(rug::Rational::from(n - 1)),
                None => exp.clone() - Expr::num(1),
            };
            mult_group.mult(exp.clone());
            mult_group.mult(base.clone().pow(lowered));
            mult_group.mult(derivative(base, var)?);
        },
        (false, true) => {
            mult_group.mult(base.clone().pow(exp.clone()));
            mult_group.mult(Expr::call(Func::Ln, base.clone()));
            mult_group.mult(derivative(exp, var)?);
        },
        (true, true) => {
            let mut inner = SumBuilder::default();
            let mut log_term = MultBuilder::default();
            log_term.mult(derivative(exp, var)?);
            log_term.mult(Expr::call(Func::Ln, base.clone()));
            inner.add(log_term.into());

            let mut base_term = MultBuilder::default();
            base_term.mult(exp.clone());
            base_term.mult(derivative(base, var)?);
            base_term.mult(base.clone().recip());
            inner.add(base_term.into());

            mult_group.mult(base.clone().pow(exp.clone()));
            mult_group.mult(inner.into());
        },
    }
    Ok(mult_group.into())
}

/// An error that can occur when computing a derivative.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivativeError {
    /// The provided sub-expression is not differentiable on any interval containing a sign change
    /// of its argument.
    Undifferentiable(Expr),
}

impl fmt::Display for DerivativeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DerivativeError::Undifferentiable(expr) => write!(f, "`{}` is not differentiable", expr),
        }
    }
}

impl std::error::Error for DerivativeError {}

/// Computes the derivative of the given expression with respect to `var`. Returns [`Err`] if the
/// expression is not differentiable.
pub fn derivative(f: &Expr, var: &str) -> Result<Expr, DerivativeError> {
    if !f.contains(var) {
        return Ok(Expr::num(0));
    }

    let expr = match f {
        Expr::Primary(Primary::Number(_)) => Expr::num(0),
        Expr::Primary(Primary::Symbol(sym)) => Expr::num(i32::from(sym == var)),
        Expr::Primary(Primary::Call(func, arg)) => function::function_derivative(*func, arg, var)?,
        Expr::Add(terms) => sum_rule(terms, var)?,
        Expr::Mul(factors) => product_rule(factors, var)?,
        Expr::Exp(base, exp) => power_rule(base, exp, var)?,
    };

    if is_trivially_zero(&expr) {
        Ok(Expr::num(0))
    } else {
        Ok(expr)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::numerical::eval;
    use crate::symbolic::{parse_expr, simplify};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Evaluates the expression at `x = p/q`.
    fn eval_x(e: &Expr, x: (i32, i32)) -> f64 {
        eval(&e.replace_variable("x", &Expr::num(x))).unwrap().to_f64()
    }

    /// Central difference approximation of the derivative at `x = p/q`.
    fn finite_difference(e: &Expr, (p, q): (i32, i32)) -> f64 {
        const H: i32 = 1_000_000;
        let (lo, hi) = ((p * H - q, q * H), (p * H + q, q * H));
        (eval_x(e, hi) - eval_x(e, lo)) * H as f64 / 2.0
    }

    pub(crate) fn test_for_function(function: &str, points: &[(i32, i32)]) {
        let expr = parse_expr(function).unwrap();
        let symbolic = derivative(&expr, "x")
            .unwrap_or_else(|err| panic!("derivative of {function} failed: {err}"));

        for &point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            assert_relative_eq!(symbolically_computed, numerically_computed, epsilon = 1e-6, max_relative = 1e-6);
        }
    }

    #[test]
    fn power_rule_for_polynomials() {
        test_for_function("x^2 + x + 1", &[(0, 1), (1, 1), (2, 1), (5, 1), (8, 1)]);
        let expr = parse_expr("x^3 - 4x").unwrap();
        assert_eq!(simplify(&derivative(&expr, "x").unwrap()).to_string(), "3*x^2 - 4");
    }

    #[test]
    fn variable_exponents() {
        test_for_function("2^x", &[(-1, 1), (0, 1), (3, 2)]);
        test_for_function("x^x", &[(1, 2), (1, 1), (3, 1)]);
        test_for_function("sqrt(x)/x", &[(1, 4), (2, 1)]);
    }

    #[test]
    fn chain_rule() {
        test_for_function("sin(x^2)", &[(0, 1), (1, 3), (2, 1)]);
        test_for_function("exp(3x) - 20exp(2x)", &[(0, 1), (1, 2)]);
        test_for_function("ln(x^2 + 1)", &[(-2, 1), (1, 1)]);
    }

    #[test]
    fn other_symbols_are_constant() {
        let expr = parse_expr("a*x + b").unwrap();
        assert_eq!(derivative(&expr, "x").unwrap().to_string(), "a");
        assert_eq!(derivative(&expr, "y").unwrap(), Expr::num(0));
    }

    #[test]
    fn signum_is_undifferentiable() {
        let expr = parse_expr("sgn(x)").unwrap();
        assert!(matches!(derivative(&expr, "x"), Err(DerivativeError::Undifferentiable(_))));
    }
}
