//! Human-readable formatting of expressions.
//!
//! Sums print subtracted terms with `-`, products gather negative powers into a denominator,
//! and powers of `1/2` print as `sqrt`. The output can be parsed back into an equal expression.

use rug::Rational;
use std::fmt;
use super::{Expr, Func, Primary};

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(n) => {
                if *n.denom() == 1 {
                    write!(f, "{}", n.numer())
                } else {
                    write!(f, "{}/{}", n.numer(), n.denom())
                }
            },
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(Func::Exp, arg) if arg.is_number_eq(1) => write!(f, "e"),
            Self::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

/// Returns true if the expression needs parentheses when used as the base of a power.
fn base_needs_parens(expr: &Expr) -> bool {
    match expr {
        Expr::Primary(Primary::Number(n)) => n.cmp0().is_lt() || *n.denom() != 1,
        Expr::Primary(_) => false,
        _ => true,
    }
}

/// Returns true if the expression needs parentheses when used as an exponent.
fn exp_needs_parens(expr: &Expr) -> bool {
    base_needs_parens(expr)
}

/// Writes a factor of a product, parenthesizing sums and nested products.
fn write_factor(f: &mut fmt::Formatter, factor: &Expr) -> fmt::Result {
    match factor {
        Expr::Add(_) | Expr::Mul(_) => write!(f, "({})", factor),
        _ => write!(f, "{}", factor),
    }
}

/// Writes a list of factors separated by `*`, with an optional leading integer.
fn write_factors(f: &mut fmt::Formatter, leading: Option<&rug::Integer>, factors: &[Expr]) -> fmt::Result {
    let mut first = true;
    if let Some(n) = leading {
        write!(f, "{}", n)?;
        first = false;
    }
    for factor in factors {
        if !first {
            write!(f, "*")?;
        }
        write_factor(f, factor)?;
        first = false;
    }
    Ok(())
}

/// Writes a product, gathering numeric denominators and negative powers after a `/`.
fn write_product(f: &mut fmt::Formatter, factors: &[Expr]) -> fmt::Result {
    let mut coeff = Rational::from(1);
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        match factor {
            Expr::Primary(Primary::Number(n)) => coeff *= n,
            Expr::Exp(base, exp) if exp.as_number().map_or(false, |e| e.cmp0().is_lt()) => {
                let positive = -exp.as_number().cloned().unwrap_or_default();
                if positive == 1 {
                    denom.push((**base).clone());
                } else {
                    denom.push(Expr::Exp(base.clone(), Box::new(Expr::from(positive))));
                }
            },
            other => numer.push(other.clone()),
        }
    }

    if coeff.cmp0().is_lt() {
        write!(f, "-")?;
        coeff = -coeff;
    }

    let show_numer = *coeff.numer() != 1 || numer.is_empty();
    write_factors(f, show_numer.then(|| coeff.numer()), &numer)?;

    let show_denom = *coeff.denom() != 1;
    let denom_count = denom.len() + usize::from(show_denom);
    if denom_count == 0 {
        return Ok(());
    }

    write!(f, "/")?;
    if denom_count == 1 {
        write_factors(f, show_denom.then(|| coeff.denom()), &denom)
    } else {
        write!(f, "(")?;
        write_factors(f, show_denom.then(|| coeff.denom()), &denom)?;
        write!(f, ")")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{}", term)?;
                    } else if term.has_negative_coefficient() {
                        write!(f, " - {}", -term.clone())?;
                    } else {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => write_product(f, factors),
            Self::Exp(base, exp) => {
                if exp.as_number().map_or(false, |e| e.cmp0().is_lt()) {
                    return write_product(f, std::slice::from_ref(self));
                }
                if exp.as_number().map_or(false, |e| *e == Rational::from((1, 2))) {
                    return write!(f, "sqrt({})", base);
                }

                if base_needs_parens(base) {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if exp_needs_parens(exp) {
                    write!(f, "({})", exp)
                } else {
                    write!(f, "{}", exp)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::sym("x")
    }

    #[test]
    fn sums_with_subtraction() {
        let expr = Expr::Add(vec![
            x().pow(Expr::num(3)),
            Expr::Mul(vec![Expr::num(-5), x()]),
            Expr::num(-1),
        ]);
        assert_eq!(expr.to_string(), "x^3 - 5*x - 1");
    }

    #[test]
    fn fractions() {
        assert_eq!(Expr::Mul(vec![Expr::num((1, 6)), Expr::pi()]).to_string(), "pi/6");
        assert_eq!(Expr::Mul(vec![Expr::num((-5, 6)), Expr::pi()]).to_string(), "-5*pi/6");
        assert_eq!(Expr::num((2, 5)).to_string(), "2/5");
        assert_eq!(x().pow(Expr::num(-1)).to_string(), "1/x");
        assert_eq!(
            Expr::Mul(vec![x(), (x() + Expr::num(1)).pow(Expr::num(-1))]).to_string(),
            "x/(x + 1)",
        );
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(Expr::num(5).sqrt().to_string(), "sqrt(5)");
        assert_eq!(Expr::Mul(vec![Expr::num(-1), Expr::num(5).sqrt()]).to_string(), "-sqrt(5)");
        assert_eq!((x() + Expr::num(1)).pow(Expr::num((1, 4))).to_string(), "(x + 1)^(1/4)");
        assert_eq!(Expr::call(Func::Exp, Expr::num(1)).to_string(), "e");
    }
}
