//! A total order on expressions, used to sort the terms of sums and the factors of products into
//! a canonical arrangement.

use std::cmp::Ordering;
use super::{Expr, Primary};

impl Expr {
    /// Rank of each kind of node; lower ranks sort first.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Primary(Primary::Number(_)) => 0,
            Self::Primary(Primary::Symbol(_)) => 1,
            Self::Primary(Primary::Call(..)) => 2,
            Self::Exp(..) => 3,
            Self::Mul(_) => 4,
            Self::Add(_) => 5,
        }
    }

    /// Compares two expressions structurally. Strictly equal expressions with the same child
    /// order compare as [`Ordering::Equal`].
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Primary(Primary::Number(a)), Self::Primary(Primary::Number(b))) => a.cmp(b),
            (Self::Primary(Primary::Symbol(a)), Self::Primary(Primary::Symbol(b))) => a.cmp(b),
            (Self::Primary(Primary::Call(fa, a)), Self::Primary(Primary::Call(fb, b))) => {
                fa.cmp(fb).then_with(|| a.canonical_cmp(b))
            },
            (Self::Exp(ba, ea), Self::Exp(bb, eb)) => {
                ba.canonical_cmp(bb).then_with(|| ea.canonical_cmp(eb))
            },
            (Self::Add(a), Self::Add(b)) | (Self::Mul(a), Self::Mul(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.canonical_cmp(y);
                    if ord.is_ne() {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            },
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    /// The order of factors in a product: numbers first, then by [`Expr::canonical_cmp`].
    pub fn factor_cmp(&self, other: &Self) -> Ordering {
        self.canonical_cmp(other)
    }

    /// The order of terms in a sum: terms with a variable part first, ordered by that part with
    /// higher powers earlier; constants last.
    pub fn term_cmp(&self, other: &Self) -> Ordering {
        let (_, a) = self.split_coefficient();
        let (_, b) = other.split_coefficient();
        let a_const = a.free_symbols().is_empty();
        let b_const = b.free_symbols().is_empty();
        a_const.cmp(&b_const)
            .then_with(|| b.degree_hint().cmp(&a.degree_hint()))
            .then_with(|| a.canonical_cmp(&b))
            .then_with(|| self.canonical_cmp(other))
    }

    /// A rough measure of how "high" a term is, used to list `x^3` before `x^2` before `x`.
    fn degree_hint(&self) -> i64 {
        match self {
            Self::Exp(_, exp) => exp
                .as_number()
                .and_then(|n| n.to_f64().is_finite().then(|| (n.to_f64() * 1000.0) as i64))
                .unwrap_or(1000),
            Self::Mul(factors) => factors.iter().map(Expr::degree_hint).sum(),
            Self::Primary(Primary::Number(_)) => 0,
            _ => 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_sort_by_degree_then_constants() {
        let x = Expr::sym("x");
        let mut terms = vec![
            Expr::num(1),
            Expr::Mul(vec![Expr::num(-5), x.clone()]),
            x.clone().pow(Expr::num(3)),
            Expr::Mul(vec![Expr::num(3), x.clone().pow(Expr::num(2))]),
        ];
        terms.sort_by(Expr::term_cmp);
        assert_eq!(Expr::Add(terms).to_string(), "x^3 + 3*x^2 - 5*x + 1");
    }

    #[test]
    fn numbers_first_in_products() {
        let mut factors = vec![Expr::sym("x"), Expr::num(2), Expr::pi()];
        factors.sort_by(Expr::factor_cmp);
        assert!(factors[0].is_number());
    }
}
