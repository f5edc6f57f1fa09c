//! Tools to help manipulate fractions.

use crate::primitive::int;
use crate::symbolic::expr::{Expr, Primary};
use rug::{Integer, Rational};

/// Create an [`Expr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`Expr::Mul`] containing the numerator, and the denominator raised to
/// the power of -1. Numeric denominators are inverted directly.
pub fn make_fraction(numerator: Expr, denominator: Expr) -> Expr {
    numerator * denominator.recip()
}

/// A product of powers with positive rational exponents, with an integer coefficient.
#[derive(Debug, Clone)]
struct PowerProduct {
    coeff: Integer,
    powers: Vec<(Expr, Rational)>,
}

impl PowerProduct {
    fn one() -> Self {
        Self { coeff: int(1), powers: Vec::new() }
    }

    /// Multiplies in `base^exp`.
    fn push(&mut self, base: Expr, exp: Rational) {
        match self.powers.iter_mut().find(|(b, _)| *b == base) {
            Some((_, e)) => *e += exp,
            None => self.powers.push((base, exp)),
        }
    }

    /// Returns the least common multiple of both products.
    fn lcm(&self, other: &Self) -> Self {
        let mut out = Self { coeff: self.coeff.clone().lcm(&other.coeff), powers: self.powers.clone() };
        for (base, exp) in &other.powers {
            match out.powers.iter_mut().find(|(b, _)| b == base) {
                Some((_, e)) => {
                    if *exp > *e {
                        *e = exp.clone();
                    }
                },
                None => out.powers.push((base.clone(), exp.clone())),
            }
        }
        out
    }

    /// Returns `self / other`, assuming `other` divides `self`.
    fn quotient(&self, other: &Self) -> Self {
        let mut out = Self { coeff: Integer::from(&self.coeff / &other.coeff), powers: Vec::new() };
        for (base, exp) in &self.powers {
            let divisor = other.powers
                .iter()
                .find(|(b, _)| b == base)
                .map(|(_, e)| e.clone())
                .unwrap_or_default();
            let remaining = Rational::from(exp - &divisor);
            if remaining.cmp0().is_gt() {
                out.powers.push((base.clone(), remaining));
            }
        }
        out
    }

    fn into_expr(self) -> Expr {
        let mut factors = Vec::with_capacity(self.powers.len() + 1);
        if self.coeff != 1 {
            factors.push(Expr::from(self.coeff));
        }
        for (base, exp) in self.powers {
            if exp == 1 {
                factors.push(base);
            } else {
                factors.push(base.pow(Expr::from(exp)));
            }
        }
        Expr::Mul(factors).downgrade()
    }
}

/// Splits the expression into a numerator and a [`PowerProduct`] denominator.
fn split(expr: &Expr) -> (Expr, PowerProduct) {
    match expr {
        Expr::Primary(Primary::Number(n)) => {
            let mut denom = PowerProduct::one();
            denom.coeff = n.denom().clone();
            (Expr::from(n.numer().clone()), denom)
        },
        Expr::Exp(base, exp) => match exp.as_number() {
            Some(e) if e.cmp0().is_lt() => {
                let mut denom = PowerProduct::one();
                denom.push((**base).clone(), -e.clone());
                (Expr::num(1), denom)
            },
            _ => (expr.clone(), PowerProduct::one()),
        },
        Expr::Mul(factors) => {
            let mut numer = Vec::with_capacity(factors.len());
            let mut denom = PowerProduct::one();
            for factor in factors {
                let (n, d) = split(factor);
                numer.push(n);
                denom.coeff *= d.coeff;
                for (base, exp) in d.powers {
                    denom.push(base, exp);
                }
            }
            (Expr::Mul(numer).downgrade(), denom)
        },
        Expr::Add(terms) => {
            let parts = terms.iter().map(split).collect::<Vec<_>>();
            let common = parts.iter().fold(PowerProduct::one(), |acc, (_, d)| acc.lcm(d));
            let numer = parts
                .into_iter()
                .map(|(n, d)| n * common.quotient(&d).into_expr())
                .collect::<Vec<_>>();
            (Expr::Add(numer), common)
        },
        _ => (expr.clone(), PowerProduct::one()),
    }
}

/// Rewrites the expression as a single fraction, returning its numerator and denominator.
///
/// Sums are brought to a common denominator, using the least common multiple of the denominators
/// of each term. Arguments of function calls are left alone. Neither part is simplified.
///
/// `1/x + 1/(x + 1)` becomes `((x + 1) + x, x*(x + 1))`.
pub fn together(expr: &Expr) -> (Expr, Expr) {
    let (numer, denom) = split(expr);
    (numer, denom.into_expr())
}

/// Returns true if the expression has a denominator, outside of function arguments, that contains
/// the symbol `var`.
pub fn has_denominator_with(expr: &Expr, var: &str) -> bool {
    match expr {
        Expr::Exp(base, exp) => {
            (exp.as_number().map_or(false, |e| e.cmp0().is_lt()) && base.contains(var))
                || has_denominator_with(base, var)
        },
        Expr::Add(children) | Expr::Mul(children) => {
            children.iter().any(|child| has_denominator_with(child, var))
        },
        Expr::Primary(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse_expr, simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn common_denominator() {
        let (numer, denom) = together(&parse_expr("1/x + 1/(x + 1)").unwrap());
        assert_eq!(simplify(&numer).to_string(), "2*x + 1");
        assert_eq!(simplify(&denom).to_string(), "x*(x + 1)");
    }

    #[test]
    fn numeric_denominators() {
        let (numer, denom) = together(&parse_expr("x/2 + 1/3").unwrap());
        assert_eq!(simplify(&numer).to_string(), "3*x + 2");
        assert_eq!(denom.to_string(), "6");
    }

    #[test]
    fn detects_denominators() {
        assert!(has_denominator_with(&parse_expr("1/(x - 2) + 1").unwrap(), "x"));
        assert!(!has_denominator_with(&parse_expr("x/2").unwrap(), "x"));
        assert!(!has_denominator_with(&parse_expr("ln(1/x)").unwrap(), "x"));
    }
}
