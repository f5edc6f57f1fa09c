//! The polynomial root engine.
//!
//! A [`Polynomial`] is extracted from an expression by expanding it and collecting the
//! coefficient of each power of the variable. Its roots are found in stages:
//!
//! 1. If every coefficient is rational, rational roots are found with the rational root theorem
//!    and divided out ([`rational_roots`]).
//! 2. What remains is solved in closed form if its degree is at most 3 ([`closed_form`]).
//! 3. Higher degrees are reduced by substitution: `x^g` if only multiples of `g` occur as
//!    exponents, or `x + 1/x` if the coefficients are palindromic.
//!
//! Before any of this, a polynomial whose coefficients repeat with some period `m` is split into
//! the first `m` coefficients and a geometric sum in `x^m` ([`split_cyclic`]).
//!
//! [`find_roots`] also reports whether the roots found are all of them. Only a complete set of
//! reduced roots lets a substitution prove that there is no solution.

pub(crate) mod closed_form;
pub(crate) mod rational_roots;

use cas_compute::symbolic::{simplify, simplify_with, Expr, SimplifyOptions};
use log::debug;
use rug::Rational;
use crate::ctxt::Ctxt;
use crate::dispatch::solve;
use crate::param::{fresh_parameter, ParamKind};
use crate::seq::ExprSeq;
use crate::solution::SolutionSet;
use crate::zero::solve_zero;

/// A polynomial in one variable, with coefficients free of that variable.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Polynomial {
    /// Slot `i` holds the coefficient of `x^i`. Empty slots are zero coefficients, and the last
    /// slot holds the leading coefficient.
    coeffs: ExprSeq,
}

/// If the factor is `var` raised to a positive integer power, returns the power. Returns `Some(0)`
/// for factors that do not contain `var`.
fn degree_of_factor(factor: &Expr, var: &str) -> Option<usize> {
    if !factor.contains(var) {
        return Some(0);
    }
    if factor.as_symbol() == Some(var) {
        return Some(1);
    }
    match factor {
        Expr::Exp(base, exp) if base.as_symbol() == Some(var) => {
            exp.as_integer()
                .and_then(|n| n.to_usize())
                .filter(|&n| n > 0)
        },
        _ => None,
    }
}

impl Polynomial {
    /// Builds a polynomial from coefficients given lowest degree first. Zero coefficients leave
    /// their slot empty.
    pub fn from_coefficients(coeffs: impl IntoIterator<Item = Expr>) -> Self {
        let mut seq = ExprSeq::new();
        for (i, coeff) in coeffs.into_iter().enumerate() {
            if !coeff.is_zero() {
                seq.put(i, coeff);
            }
        }
        Self { coeffs: seq }
    }

    /// Extracts the coefficients of the expression as a polynomial in `var`.
    ///
    /// Returns [`None`] if, after expansion, some term is not a product of `var^n` (with `n` a
    /// positive integer) and factors free of `var`, if `var` does not occur at all, or if the
    /// degree is larger than `max_degree`.
    pub fn from_expr(expr: &Expr, var: &str, max_degree: usize) -> Option<Self> {
        let expanded = simplify_with(expr, &SimplifyOptions::default().with_expand(true));

        let mut buckets: Vec<Vec<Expr>> = Vec::new();
        for term in expanded.terms() {
            let mut degree = 0;
            let mut coeff = Vec::new();
            for factor in term.factors() {
                match degree_of_factor(factor, var)? {
                    0 => coeff.push(factor.clone()),
                    n => degree += n,
                }
            }
            if degree > max_degree {
                return None;
            }
            if degree >= buckets.len() {
                buckets.resize(degree + 1, Vec::new());
            }
            buckets[degree].push(Expr::Mul(coeff).downgrade());
        }

        let poly = Self::from_coefficients(
            buckets.into_iter().map(|terms| simplify(&Expr::Add(terms).downgrade())),
        );
        (poly.degree() > 0).then_some(poly)
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns the coefficient of `x^i`.
    pub fn coeff(&self, i: usize) -> Expr {
        self.coeffs.get(i).cloned().unwrap_or_else(|| Expr::num(0))
    }

    /// Returns the polynomial as an expression in `var`.
    pub fn to_expr(&self, var: &str) -> Expr {
        let x = Expr::sym(var);
        let terms = self.coeffs.iter_indexed()
            .map(|(i, coeff)| match i {
                0 => coeff.clone(),
                1 => coeff.clone() * x.clone(),
                i => coeff.clone() * x.clone().pow(Expr::from(i as i32)),
            })
            .collect();
        Expr::Add(terms).downgrade()
    }

    /// Returns the multiplicity of `0` as a root: the smallest `k` for which the `k`th derivative
    /// at `0`, `k! * a_k`, is nonzero.
    pub fn order_at_zero(&self) -> usize {
        self.coeffs.iter_indexed()
            .next()
            .map_or(0, |(i, _)| i)
    }

    /// Divides the polynomial by `x^k`, where `k` is at most [`Polynomial::order_at_zero`].
    pub fn shift_down(&mut self, k: usize) {
        for _ in 0..k {
            self.coeffs.remove_compacting(0);
        }
    }

    /// Returns the coefficients as rationals, lowest degree first, if they are all rational.
    pub fn rational_coefficients(&self) -> Option<Vec<Rational>> {
        (0..self.coeffs.len())
            .map(|i| match self.coeffs.get(i) {
                Some(coeff) => coeff.as_number().cloned(),
                None => Some(Rational::new()),
            })
            .collect()
    }

    /// Returns the greatest common divisor of the exponents with a nonzero coefficient.
    fn exponent_gcd(&self) -> usize {
        self.coeffs.iter_indexed()
            .map(|(i, _)| i)
            .fold(0, gcd)
    }

    /// Returns the smallest `m < n + 1` dividing `n + 1` such that `a_(i + m)` is equivalent to
    /// `a_i` for every `i`, where `n` is the degree.
    fn cyclic_period(&self, ctxt: &Ctxt) -> Option<usize> {
        let len = self.degree() + 1;
        (1..=len / 2)
            .filter(|m| len % m == 0)
            .find(|&m| (m..len).all(|i| ctxt.equivalent(&self.coeff(i), &self.coeff(i - m))))
    }

    /// Returns true if `a_i` is equivalent to `a_(n - i)` for every `i`.
    fn is_palindromic(&self, ctxt: &Ctxt) -> bool {
        let n = self.degree();
        (0..=n / 2).all(|i| ctxt.equivalent(&self.coeff(i), &self.coeff(n - i)))
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Finds the real roots of the polynomial in `var`. The flag is true if the roots found are all
/// of its real roots.
///
/// Returns [`SolutionSet::NoSolutions`] only if the polynomial provably has no real root.
pub(crate) fn find_roots(poly: &Polynomial, var: &str, ctxt: &mut Ctxt) -> (SolutionSet, bool) {
    if poly.degree() >= 3 {
        if let Some(period) = poly.cyclic_period(ctxt) {
            return split_cyclic(poly, period, var, ctxt);
        }
    }

    let mut found = SolutionSet::empty();
    let mut poly = poly.clone();

    if let Some(coeffs) = poly.rational_coefficients() {
        let (rationals, remaining) = rational_roots::extract(
            &coeffs,
            ctxt.options.max_rational_root_magnitude,
        );
        for root in rationals {
            found.insert(Expr::from(root));
        }
        if remaining.len() < 2 {
            return (found, true);
        }
        poly = Polynomial::from_coefficients(remaining.into_iter().map(Expr::from));
    }

    debug!("solving polynomial of degree {}: {}", poly.degree(), poly.to_expr(var));
    let (rest, complete) = match poly.degree() {
        0 => (SolutionSet::empty(), false),
        1 => (SolutionSet::single(closed_form::linear(&poly.coeff(0), &poly.coeff(1), ctxt)), true),
        2 => (closed_form::quadratic(&poly.coeff(0), &poly.coeff(1), &poly.coeff(2), ctxt), true),
        3 => (closed_form::cubic(&poly.coeff(0), &poly.coeff(1), &poly.coeff(2), &poly.coeff(3), ctxt), true),
        _ => higher_degree(&poly, var, ctxt),
    };

    if found.is_empty() {
        (rest, complete)
    } else {
        (found.union(rest), complete)
    }
}

/// Solves `g(x) * (1 + x^m + ... + x^((k - 1)m)) = 0`, where `m` is the period of the
/// coefficients and `g` holds the first `m` of them.
///
/// The second factor is `(x^(km) - 1) / (x^m - 1)`, whose only possible real root is `-1`, when
/// `k` is even and `m` is odd.
fn split_cyclic(poly: &Polynomial, period: usize, var: &str, ctxt: &mut Ctxt) -> (SolutionSet, bool) {
    let repeats = (poly.degree() + 1) / period;
    debug!("coefficients repeat with period {}, {} times", period, repeats);

    let repeated = if repeats % 2 == 0 && period % 2 == 1 {
        SolutionSet::single(Expr::num(-1))
    } else {
        SolutionSet::NoSolutions
    };

    let block = Polynomial::from_coefficients((0..period).map(|i| poly.coeff(i)));
    let (own, complete) = if block.degree() == 0 {
        (SolutionSet::NoSolutions, true)
    } else {
        find_roots(&block, var, ctxt)
    };
    (own.union(repeated), complete)
}

/// Solves polynomials of degree 4 or more by reducing them to polynomials of lower degree.
fn higher_degree(poly: &Polynomial, var: &str, ctxt: &mut Ctxt) -> (SolutionSet, bool) {
    let x = Expr::sym(var);

    let g = poly.exponent_gcd();
    if g > 1 {
        debug!("substituting y = {}^{}", var, g);
        let reduced = Polynomial::from_coefficients((0..=poly.degree() / g).map(|i| poly.coeff(i * g)));
        let power = x.pow(Expr::from(g as i32));
        let (reduced_roots, complete) = find_roots(&reduced, var, ctxt);
        let set = reduced_roots.flat_map_with(complete, |root| solve(&power, &root, var, ctxt));
        return (set, complete);
    }

    if poly.degree() % 2 == 0 && poly.is_palindromic(ctxt) {
        let m = poly.degree() / 2;
        let y_name = fresh_parameter(ParamKind::Placeholder, &[&poly.to_expr(var)]);
        let y = Expr::sym(&y_name);
        debug!("palindromic polynomial: substituting {} = {} + 1/{}", y_name, var, var);

        // x^j + x^-j as a polynomial in y = x + 1/x
        let mut chebyshev = vec![Expr::num(2), y.clone()];
        for j in 2..=m {
            let next = y.clone() * chebyshev[j - 1].clone() - chebyshev[j - 2].clone();
            chebyshev.push(next);
        }
        let terms = std::iter::once(poly.coeff(m))
            .chain((1..=m).map(|j| poly.coeff(m + j) * chebyshev[j].clone()))
            .collect();
        let Some(reduced) = Polynomial::from_expr(&Expr::Add(terms), &y_name, ctxt.options.max_degree) else {
            return (SolutionSet::empty(), false);
        };

        let (reduced_roots, complete) = find_roots(&reduced, &y_name, ctxt);
        let set = reduced_roots.flat_map_with(complete, |root| {
            let quadratic = x.clone().pow(Expr::num(2)) - root * x.clone() + Expr::num(1);
            solve_zero(&quadratic, var, ctxt)
        });
        return (set, complete);
    }

    (SolutionSet::empty(), false)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cas_compute::numerical::eval;
    use cas_compute::symbolic::parse_expr;
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn poly(s: &str) -> Option<Polynomial> {
        Polynomial::from_expr(&parse_expr(s).unwrap(), "x", 100)
    }

    fn ints(values: &[i32]) -> Vec<Rational> {
        values.iter().map(|&n| Rational::from(n)).collect()
    }

    #[test]
    fn extracts_coefficients() {
        let p = poly("(x - 1)(x^2 + 4x - 1)").unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.rational_coefficients(), Some(ints(&[1, -5, 3, 1])));

        let p = poly("a*x^2 + b*x^2 + 3").unwrap();
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coeff(1), Expr::num(0));
        assert_eq!(p.rational_coefficients(), None);
    }

    #[test]
    fn rejects_non_polynomials() {
        assert_eq!(poly("sin(x) + 1"), None);
        assert_eq!(poly("x^(1/2) + 1"), None);
        assert_eq!(poly("1/x + x"), None);
        assert_eq!(poly("y + 1"), None);
        assert_eq!(Polynomial::from_expr(&parse_expr("x^5").unwrap(), "x", 4), None);
    }

    #[test]
    fn zero_root_order() {
        let mut p = poly("x^5 - 2x^3").unwrap();
        assert_eq!(p.order_at_zero(), 3);
        p.shift_down(3);
        assert_eq!(p.rational_coefficients(), Some(ints(&[-2, 0, 1])));
    }

    #[test]
    fn biquadratic() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);
        let p = poly("x^4 - 5x^2 + 6").unwrap();
        assert_eq!(find_roots(&p, "x", &mut ctxt).0.len(), Some(4));

        let p = poly("x^4 + 3x^2 + 2").unwrap();
        assert_eq!(find_roots(&p, "x", &mut ctxt).0, SolutionSet::NoSolutions);
    }

    #[test]
    fn palindromic() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);

        // (x^2 - 3x + 1)(x^2 - x + 1): only the first factor has real roots
        let p = poly("x^4 - 4x^3 + 5x^2 - 4x + 1").unwrap();
        assert!(p.is_palindromic(&ctxt));
        let set = find_roots(&p, "x", &mut ctxt).0;
        assert_eq!(set.len(), Some(2), "{}", set);
    }

    #[test]
    fn incomplete_reduction_is_not_a_proof() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);

        // y^5 + y^4 + y^2 - 2y - 3 with y = x^2 has the root y = -1, and a positive root of
        // y^4 + y - 3 that is not found
        let p = poly("x^10 + x^8 + x^4 - 2x^2 - 3").unwrap();
        let (set, complete) = find_roots(&p, "x", &mut ctxt);
        assert!(!complete);
        assert_eq!(set, SolutionSet::empty());

        // every root of y^2 + 3y + 2 is negative, so x^4 + 3x^2 + 2 has no real root
        let p = poly("x^4 + 3x^2 + 2").unwrap();
        assert_eq!(find_roots(&p, "x", &mut ctxt), (SolutionSet::NoSolutions, true));
    }

    #[test]
    fn cyclic_coefficients() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let mut ctxt = Ctxt::new(&mut budget, &options);

        // (x^2 + 2x - 1)(x^3 + 1)
        let p = poly("x^5 + 2x^4 - x^3 + x^2 + 2x - 1").unwrap();
        assert_eq!(p.cyclic_period(&ctxt), Some(3));
        let (set, complete) = find_roots(&p, "x", &mut ctxt);
        assert!(complete);
        let mut values = set.iter().map(|e| eval(e).unwrap().to_f64()).collect::<Vec<_>>();
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(values.len(), 3, "{}", set);
        assert_relative_eq!(values[0], -1.0 - 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(values[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(values[2], 2f64.sqrt() - 1.0, epsilon = 1e-12);

        // (x^2 + x + 2)(1 + x^3 + x^6): neither factor has a real root
        let p = poly("x^8 + x^7 + 2x^6 + x^5 + x^4 + 2x^3 + x^2 + x + 2").unwrap();
        assert_eq!(p.cyclic_period(&ctxt), Some(3));
        assert_eq!(find_roots(&p, "x", &mut ctxt), (SolutionSet::NoSolutions, true));

        // 1 + x + ... + x^5 vanishes only at -1
        let p = poly("x^5 + x^4 + x^3 + x^2 + x + 1").unwrap();
        assert_eq!(p.cyclic_period(&ctxt), Some(1));
        assert_eq!(find_roots(&p, "x", &mut ctxt).0.to_string(), "{-1}");

        assert_eq!(poly("x^3 + 1").unwrap().cyclic_period(&ctxt), None);
    }
}
