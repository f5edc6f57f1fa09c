//! Numerical evaluation of symbolic expressions.
//!
//! Expressions are evaluated with [`rug::Float`]s at [`PRECISION`] bits. Evaluation is
//! real-valued: odd roots of negative numbers are real, while anything that would need a complex
//! intermediate result, such as `(-1)^(1/2)`, is reported as [`EvalError::NonReal`].
//!
//! [`PRECISION`]: crate::primitive::PRECISION

pub mod error;
pub mod fmt;

pub use error::EvalError;

use crate::consts::{PI, ZERO_TOLERANCE};
use crate::primitive::float;
use crate::symbolic::{expr::PI_SYMBOL, Expr, Func, Primary};
use rug::{ops::Pow, Float, Rational};

/// Returns true if the value is too close to zero to divide by.
fn is_negligible(n: &Float) -> bool {
    n.clone().abs() < *ZERO_TOLERANCE
}

/// Evaluates the given function at `x`, checking its domain.
fn eval_func(func: Func, x: Float) -> Result<Float, EvalError> {
    let domain = || EvalError::Domain(func);
    let value = match func {
        Func::Abs => x.abs(),
        Func::Sgn => {
            if x.is_zero() {
                float(0)
            } else {
                x.signum()
            }
        },
        Func::Exp => x.exp(),
        Func::Ln => {
            if x <= 0 {
                return Err(domain());
            }
            x.ln()
        },
        Func::Lg => {
            if x <= 0 {
                return Err(domain());
            }
            x.log10()
        },
        Func::Sin => x.sin(),
        Func::Cos => x.cos(),
        Func::Tan | Func::Sec => {
            let cos = x.clone().cos();
            if is_negligible(&cos) {
                return Err(domain());
            }
            if func == Func::Tan { x.sin() / cos } else { cos.recip() }
        },
        Func::Cot | Func::Cosec => {
            let sin = x.clone().sin();
            if is_negligible(&sin) {
                return Err(domain());
            }
            if func == Func::Cot { x.cos() / sin } else { sin.recip() }
        },
        Func::Arcsin | Func::Arccos => {
            if x.clone().abs() > 1 {
                return Err(domain());
            }
            if func == Func::Arcsin { x.asin() } else { x.acos() }
        },
        Func::Arctan => x.atan(),
        // range (0, pi)
        Func::Arccot => float(&*PI) / 2 - x.atan(),
        Func::Sinh => x.sinh(),
        Func::Cosh => x.cosh(),
        Func::Tanh => x.tanh(),
        Func::Coth | Func::Cosech => {
            if x.is_zero() {
                return Err(domain());
            }
            if func == Func::Coth { x.tanh().recip() } else { x.sinh().recip() }
        },
        Func::Sech => x.cosh().recip(),
        Func::Arsinh => x.asinh(),
        Func::Arcosh => {
            if x < 1 {
                return Err(domain());
            }
            x.acosh()
        },
        Func::Artanh => {
            if x.clone().abs() >= 1 {
                return Err(domain());
            }
            x.atanh()
        },
        Func::Arcoth => {
            if x.clone().abs() <= 1 {
                return Err(domain());
            }
            x.recip().atanh()
        },
        Func::Arsech => {
            if x <= 0 || x > 1 {
                return Err(domain());
            }
            x.recip().acosh()
        },
        Func::Arcosech => {
            if x.is_zero() {
                return Err(domain());
            }
            x.recip().asinh()
        },
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(domain())
    }
}

/// Raises `base` to an exact rational power, taking real odd roots of negative numbers.
fn eval_rational_power(base: Float, exp: &Rational) -> Result<Float, EvalError> {
    if base.is_zero() {
        return match exp.cmp0() {
            std::cmp::Ordering::Less => Err(EvalError::DivisionByZero),
            std::cmp::Ordering::Equal => Ok(float(1)),
            std::cmp::Ordering::Greater => Ok(float(0)),
        };
    }

    if *exp.denom() == 1 {
        return match exp.numer().to_i32() {
            Some(n) => Ok(base.pow(n)),
            None => Ok(base.pow(float(exp))),
        };
    }

    if base < 0 {
        if exp.denom().is_even() {
            return Err(EvalError::NonReal);
        }
        let magnitude = base.abs().pow(float(exp));
        return Ok(if exp.numer().is_odd() { -magnitude } else { magnitude });
    }

    Ok(base.pow(float(exp)))
}

/// Computes the exact value of an expression made only of rational numbers, sums, products and
/// integer powers.
fn exact_rational(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Primary(Primary::Number(n)) => Some(n.clone()),
        Expr::Add(terms) => terms.iter().try_fold(Rational::new(), |acc, term| {
            Some(acc + exact_rational(term)?)
        }),
        Expr::Mul(factors) => factors.iter().try_fold(Rational::from(1), |acc, factor| {
            Some(acc * exact_rational(factor)?)
        }),
        Expr::Exp(base, exp) => {
            let base = exact_rational(base)?;
            let exp = exact_rational(exp)?;
            if *exp.denom() != 1 || (base.cmp0().is_eq() && exp.cmp0().is_lt()) {
                return None;
            }
            let exp = exp.numer().to_i32().filter(|n| n.abs() <= 64)?;
            Some(base.pow(exp))
        },
        _ => None,
    }
}

/// Numerically evaluates an expression.
///
/// The only symbol with a value is `pi`; any other symbol results in
/// [`EvalError::UnknownSymbol`]. Substitute values for variables with
/// [`Expr::replace_variable`] first.
pub fn eval(expr: &Expr) -> Result<Float, EvalError> {
    let value = match expr {
        Expr::Primary(Primary::Number(n)) => float(n),
        Expr::Primary(Primary::Symbol(sym)) if sym == PI_SYMBOL => float(&*PI),
        Expr::Primary(Primary::Symbol(sym)) => return Err(EvalError::UnknownSymbol(sym.clone())),
        Expr::Primary(Primary::Call(func, arg)) => eval_func(*func, eval(arg)?)?,
        Expr::Add(terms) => {
            let mut sum = float(0);
            for term in terms {
                sum += eval(term)?;
            }
            sum
        },
        Expr::Mul(factors) => {
            let mut product = float(1);
            for factor in factors {
                product *= eval(factor)?;
            }
            product
        },
        Expr::Exp(base, exp) => {
            let base = eval(base)?;
            match exact_rational(exp) {
                Some(exp) => eval_rational_power(base, &exp)?,
                None => {
                    let exp = eval(exp)?;
                    if base.is_zero() {
                        if exp <= 0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        float(0)
                    } else if base < 0 && !exp.is_integer() {
                        return Err(EvalError::NonReal);
                    } else {
                        base.pow(exp)
                    }
                },
            }
        },
    };

    if value.is_nan() {
        Err(EvalError::NonReal)
    } else if value.is_infinite() {
        Err(EvalError::DivisionByZero)
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::symbolic::parse_expr;
    use pretty_assertions::assert_eq;
    use super::*;

    fn eval_str(input: &str) -> Result<f64, EvalError> {
        eval(&parse_expr(input).unwrap()).map(|n| n.to_f64())
    }

    #[test]
    fn arithmetic() {
        assert_relative_eq!(eval_str("2 + 3 * 4").unwrap(), 14.0);
        assert_relative_eq!(eval_str("3/4 - 1").unwrap(), -0.25);
        assert_relative_eq!(eval_str("2^10").unwrap(), 1024.0);
    }

    #[test]
    fn constants_and_functions() {
        assert_relative_eq!(eval_str("sin(pi/6)").unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(eval_str("ln(e^2)").unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(eval_str("arccot(1)").unwrap(), std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(eval_str("lg(1000)").unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn real_roots() {
        assert_relative_eq!(eval_str("(-8)^(1/3)").unwrap(), -2.0, epsilon = 1e-12);
        assert_relative_eq!(eval_str("(-8)^(2/3)").unwrap(), 4.0, epsilon = 1e-12);
        assert_eq!(eval_str("(-4)^(1/2)"), Err(EvalError::NonReal));
    }

    #[test]
    fn domain_errors() {
        assert_eq!(eval_str("ln(0)"), Err(EvalError::Domain(Func::Ln)));
        assert_eq!(eval_str("arcsin(2)"), Err(EvalError::Domain(Func::Arcsin)));
        assert_eq!(eval_str("tan(pi/2)"), Err(EvalError::Domain(Func::Tan)));
        assert_eq!(eval_str("1/(2 - 2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval_str("x + 1"), Err(EvalError::UnknownSymbol("x".to_string())));
    }
}
