//! Derivatives of the functions in [`Func`], combined with the chain rule.

use crate::symbolic::expr::{Expr, Func};
use super::{derivative, DerivativeError, MultBuilder};

fn call(func: Func, arg: &Expr) -> Expr {
    Expr::call(func, arg.clone())
}

fn square(expr: Expr) -> Expr {
    expr.pow(Expr::num(2))
}

/// `1 - u^2`
fn one_minus_square(u: &Expr) -> Expr {
    Expr::num(1) - square(u.clone())
}

/// `u^2 + 1`
fn square_plus_one(u: &Expr) -> Expr {
    square(u.clone()) + Expr::num(1)
}

/// Returns the derivative of `func` evaluated at `u`, that is `func'(u)`.
fn outer_derivative(func: Func, u: &Expr) -> Result<Expr, DerivativeError> {
    let d = match func {
        Func::Abs => call(Func::Sgn, u),
        Func::Sgn => return Err(DerivativeError::Undifferentiable(call(Func::Sgn, u))),
        Func::Exp => call(Func::Exp, u),
        Func::Ln => u.clone().recip(),
        Func::Lg => (u.clone() * Expr::call(Func::Ln, Expr::num(10))).recip(),
        Func::Sin => call(Func::Cos, u),
        Func::Cos => -call(Func::Sin, u),
        Func::Tan => square(call(Func::Sec, u)),
        Func::Cot => -square(call(Func::Cosec, u)),
        Func::Sec => call(Func::Sec, u) * call(Func::Tan, u),
        Func::Cosec => -(call(Func::Cosec, u) * call(Func::Cot, u)),
        Func::Arcsin => one_minus_square(u).pow(Expr::num((-1, 2))),
        Func::Arccos => -one_minus_square(u).pow(Expr::num((-1, 2))),
        Func::Arctan => square_plus_one(u).recip(),
        Func::Arccot => -square_plus_one(u).recip(),
        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => square(call(Func::Sech, u)),
        Func::Coth => -square(call(Func::Cosech, u)),
        Func::Sech => -(call(Func::Sech, u) * call(Func::Tanh, u)),
        Func::Cosech => -(call(Func::Cosech, u) * call(Func::Coth, u)),
        Func::Arsinh => square_plus_one(u).pow(Expr::num((-1, 2))),
        Func::Arcosh => (square(u.clone()) - Expr::num(1)).pow(Expr::num((-1, 2))),
        Func::Artanh | Func::Arcoth => one_minus_square(u).recip(),
        Func::Arsech => -(u.clone() * one_minus_square(u).sqrt()).recip(),
        Func::Arcosech => -(call(Func::Abs, u) * square_plus_one(u).sqrt()).recip(),
    };
    Ok(d)
}

/// Computes the derivative of a function call and performs the chain rule.
pub(super) fn function_derivative(func: Func, arg: &Expr, var: &str) -> Result<Expr, DerivativeError> {
    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer_derivative(func, arg)?);
    mult_group.mult(derivative(arg, var)?);
    Ok(mult_group.into())
}

#[cfg(test)]
mod tests {
    use crate::symbolic::derivative::tests::test_for_function;

    #[test]
    fn circular_functions() {
        test_for_function("sin(x) + cos(x)", &[(0, 1), (1, 1)]);
        test_for_function("tan(x) + cot(x)", &[(1, 2), (1, 1)]);
        test_for_function("sec(x) + cosec(x)", &[(1, 2), (1, 1)]);
    }

    #[test]
    fn inverse_circular_functions() {
        test_for_function("arcsin(x) + arccos(x)", &[(0, 1), (1, 2)]);
        test_for_function("arctan(x) + arccot(x)", &[(-1, 1), (3, 1)]);
        test_for_function("arctan(x) - 2arccot(x)", &[(-1, 1), (3, 1)]);
    }

    #[test]
    fn hyperbolic_functions() {
        test_for_function("sinh(x) + cosh(x) + tanh(x)", &[(0, 1), (1, 1)]);
        test_for_function("coth(x) + sech(x) + cosech(x)", &[(1, 2), (2, 1)]);
        test_for_function("arsinh(x) + artanh(x)", &[(0, 1), (1, 2)]);
        test_for_function("arcosh(x) + arcoth(x)", &[(2, 1), (3, 1)]);
        test_for_function("arsech(x) + arcosech(x)", &[(1, 2), (1, 3)]);
        test_for_function("arcosech(x)", &[(-1, 3), (-2, 1)]);
    }

    #[test]
    fn logarithms_and_abs() {
        test_for_function("ln(x) + lg(x)", &[(1, 2), (3, 1)]);
        test_for_function("abs(x^3 - 2)", &[(0, 1), (2, 1)]);
    }
}
