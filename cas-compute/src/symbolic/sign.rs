//! Sign and shape predicates for expressions.
//!
//! Predicates named `is_always_*` are structural: they hold for every real value of every free
//! symbol in the expression. The remaining predicates also evaluate constant expressions
//! numerically, so `is_positive` is true for `ln(3) - 1` but not for `x^2 + 1 - 1`.

use crate::consts::ZERO_TOLERANCE;
use crate::numerical::eval;
use rug::Float;
use super::{Expr, Func, Primary};

impl Expr {
    /// Returns true if the expression has no free symbols. `pi` is a constant.
    pub fn is_constant(&self) -> bool {
        self.post_order_iter()
            .filter_map(Expr::as_symbol)
            .all(|sym| sym == super::expr::PI_SYMBOL)
    }

    /// Returns true if the expression is a rational number.
    pub fn is_rational_constant(&self) -> bool {
        self.is_number()
    }

    /// Returns true if the expression is an integer.
    pub fn is_integer_constant(&self) -> bool {
        self.as_integer().is_some()
    }

    /// Evaluates a constant expression, or returns [`None`] if the expression is not constant or
    /// cannot be evaluated.
    fn constant_value(&self) -> Option<Float> {
        if self.is_constant() {
            eval(self).ok()
        } else {
            None
        }
    }

    /// Returns true if the expression is the number zero, or a constant that evaluates to zero.
    pub fn is_zero(&self) -> bool {
        match self.as_number() {
            Some(n) => n.cmp0().is_eq(),
            None => self.constant_value()
                .map_or(false, |value| value.abs() < *ZERO_TOLERANCE),
        }
    }

    /// Returns true if the expression is nonnegative for all real values of its free symbols.
    pub fn is_always_nonnegative(&self) -> bool {
        if let Some(value) = self.constant_value() {
            return value > -ZERO_TOLERANCE.clone();
        }

        match self {
            Expr::Primary(Primary::Number(n)) => n.cmp0().is_ge(),
            Expr::Primary(Primary::Symbol(_)) => false,
            Expr::Primary(Primary::Call(func, arg)) => match func {
                Func::Abs | Func::Exp | Func::Cosh | Func::Sech | Func::Arccos | Func::Arccot
                    | Func::Arcosh | Func::Arsech => true,
                // odd and increasing
                Func::Sgn | Func::Sinh | Func::Arsinh | Func::Tanh | Func::Artanh
                    | Func::Arctan | Func::Arcsin => arg.is_always_nonnegative(),
                _ => false,
            },
            Expr::Add(terms) => terms.iter().all(Expr::is_always_nonnegative),
            Expr::Mul(factors) => factors.iter().all(Expr::is_always_nonnegative),
            Expr::Exp(base, exp) => match exp.as_number() {
                // `b^(p/q)` with `p` even and `q` odd is a square; with `q` even it's defined only
                // for `b >= 0`, and is then nonnegative
                Some(n) if n.numer().is_even() || n.denom().is_even() => true,
                _ => base.is_always_nonnegative(),
            },
        }
    }

    /// Returns true if the expression is strictly positive for all real values of its free
    /// symbols.
    pub fn is_always_positive(&self) -> bool {
        if let Some(value) = self.constant_value() {
            return value > *ZERO_TOLERANCE;
        }

        match self {
            Expr::Primary(Primary::Number(n)) => n.cmp0().is_gt(),
            Expr::Primary(Primary::Symbol(_)) => false,
            Expr::Primary(Primary::Call(func, arg)) => match func {
                Func::Exp | Func::Cosh | Func::Sech | Func::Arccot => true,
                Func::Arccos => false,
                Func::Sinh | Func::Arsinh | Func::Tanh | Func::Arctan => arg.is_always_positive(),
                _ => false,
            },
            Expr::Add(terms) => {
                terms.iter().all(Expr::is_always_nonnegative)
                    && terms.iter().any(Expr::is_always_positive)
            },
            Expr::Mul(factors) => factors.iter().all(Expr::is_always_positive),
            Expr::Exp(base, _) => base.is_always_positive(),
        }
    }

    /// Returns true if the expression is known to be nonnegative: it is a constant that evaluates
    /// to a nonnegative number, or it is [always nonnegative](Self::is_always_nonnegative).
    pub fn is_nonnegative(&self) -> bool {
        self.is_always_nonnegative()
    }

    /// Returns true if the expression is known to be strictly positive.
    pub fn is_positive(&self) -> bool {
        self.is_always_positive()
    }

    /// Returns true if the expression is known to be strictly negative.
    pub fn is_negative(&self) -> bool {
        (-self.clone()).is_always_positive()
    }
}

#[cfg(test)]
mod tests {
    use crate::symbolic::{parse_expr, simplify};
    use super::*;

    fn expr(input: &str) -> Expr {
        simplify(&parse_expr(input).unwrap())
    }

    #[test]
    fn constants() {
        assert!(expr("2pi").is_constant());
        assert!(!expr("2x").is_constant());
        assert!(expr("ln(3) - 1").is_positive());
        assert!(expr("1 - pi").is_negative());
        assert!(expr("ln(2) - ln(2)").is_zero());
        assert!(!expr("ln(2) - ln(3)").is_zero());
    }

    #[test]
    fn structural_signs() {
        assert!(expr("x^4 + 2").is_always_positive());
        assert!(expr("x^2 + abs(y)").is_always_nonnegative());
        assert!(!expr("x^2 + abs(y)").is_always_positive());
        assert!(expr("x^(1/2)").is_always_nonnegative());
        assert!(expr("exp(x) + 1").is_always_positive());
        assert!(!expr("x^3 + 1").is_always_nonnegative());
        assert!(expr("-exp(x)").is_negative());
    }
}
