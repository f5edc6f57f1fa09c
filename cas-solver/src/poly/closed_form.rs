//! Closed-form solutions of polynomial equations of degree 1, 2 and 3.
//!
//! Coefficients may be any expressions free of the variable. Branches that depend on the sign of
//! a discriminant are only taken when the discriminant is a constant; otherwise the general
//! formula is used.

use cas_compute::symbolic::{Expr, Func};
use log::debug;
use crate::ctxt::Ctxt;
use crate::solution::SolutionSet;

/// Solves `a*x + b = 0`.
pub(crate) fn linear(b: &Expr, a: &Expr, ctxt: &Ctxt) -> Expr {
    ctxt.simplify(&(-b.clone() / a.clone()))
}

/// Solves `a*x^2 + b*x + c = 0`.
pub(crate) fn quadratic(c: &Expr, b: &Expr, a: &Expr, ctxt: &Ctxt) -> SolutionSet {
    let discriminant = ctxt.simplify(&(b.clone().pow(Expr::num(2)) - Expr::num(4) * a.clone() * c.clone()));
    debug!("quadratic discriminant: {}", discriminant);

    let two_a = Expr::num(2) * a.clone();
    if discriminant.is_constant() {
        if discriminant.is_zero() {
            return SolutionSet::single(ctxt.simplify(&(-b.clone() / two_a)));
        }
        if discriminant.is_negative() {
            return SolutionSet::NoSolutions;
        }
    }

    let root = discriminant.sqrt();
    [-b.clone() - root.clone(), -b.clone() + root]
        .into_iter()
        .map(|numer| ctxt.simplify(&(numer / two_a.clone())))
        .collect()
}

/// Solves `a*x^3 + b*x^2 + c*x + d = 0`.
///
/// The cubic is depressed to `t^3 + p*t + q = 0` with `x = t - b/(3a)`. If the discriminant
/// `(q/2)^2 + (p/3)^3` is a negative constant and `-27/p^3` is a positive constant, all three
/// roots are real and given by the trigonometric form. Otherwise Cardano's formula gives the one
/// real root.
pub(crate) fn cubic(d: &Expr, c: &Expr, b: &Expr, a: &Expr, ctxt: &Ctxt) -> SolutionSet {
    let num = |n: i32| Expr::num(n);
    let sq = |e: &Expr| e.clone().pow(num(2));
    let cube = |e: &Expr| e.clone().pow(num(3));
    let (a, b, c, d) = (a.clone(), b.clone(), c.clone(), d.clone());

    let shift = ctxt.simplify(&(b.clone() / (num(3) * a.clone())));
    let p = ctxt.simplify(&(
        (num(3) * a.clone() * c.clone() - sq(&b)) / (num(3) * sq(&a))
    ));
    let q = ctxt.simplify(&(
        (num(2) * cube(&b) - num(9) * a.clone() * b.clone() * c + num(27) * sq(&a) * d)
            / (num(27) * cube(&a))
    ));
    debug!("depressed cubic: t^3 + ({})t + ({})", p, q);

    let back = |t: Expr| ctxt.simplify(&(t - shift.clone()));

    if p.is_zero() {
        return SolutionSet::single(back((-q).root(3)));
    }

    let half_q = q.clone() / num(2);
    let discriminant = ctxt.simplify(&(sq(&half_q) + cube(&(p.clone() / num(3)))));
    let aux = ctxt.simplify(&(num(-27) / cube(&p)));
    debug!("cubic discriminant: {}", discriminant);

    if discriminant.is_constant() && discriminant.is_negative()
        && aux.is_constant() && aux.is_positive()
    {
        // casus irreducibilis
        let amplitude = num(2) * (-p.clone() / num(3)).sqrt();
        let angle = Expr::call(Func::Arccos, -half_q * aux.sqrt()) / num(3);
        return (0..3)
            .map(|k| {
                let shifted = angle.clone() - Expr::num((2 * k, 3)) * Expr::pi();
                back(amplitude.clone() * Expr::call(Func::Cos, shifted))
            })
            .collect();
    }

    if discriminant.is_zero() {
        let single = num(3) * q.clone() / p.clone();
        let double = num(-3) * q / (num(2) * p);
        return [single, double].into_iter().map(back).collect();
    }

    let root = discriminant.sqrt();
    let u = (-half_q.clone() + root.clone()).root(3);
    let v = (-half_q - root).root(3);
    SolutionSet::single(back(u + v))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cas_compute::numerical::eval;
    use cas_compute::symbolic::parse_expr;
    use crate::{budget::Budget, options::SolveOptions};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(s: &str) -> Expr {
        parse_expr(s).unwrap()
    }

    /// Checks that every member of the set is a real root of the polynomial with the given integer
    /// coefficients, lowest degree first.
    fn assert_roots(set: &SolutionSet, coeffs: &[i32], count: usize) {
        assert_eq!(set.len(), Some(count), "{}", set);
        for root in set.iter() {
            let x = eval(root).unwrap().to_f64();
            let value = coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + f64::from(c));
            assert_relative_eq!(value, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn linear_and_quadratic() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let ctxt = Ctxt::new(&mut budget, &options);

        assert_eq!(linear(&expr("b"), &expr("a"), &ctxt).to_string(), "-b/a");

        let set = quadratic(&expr("-1"), &expr("4"), &expr("1"), &ctxt);
        assert_roots(&set, &[-1, 4, 1], 2);

        assert_eq!(quadratic(&expr("1"), &expr("0"), &expr("1"), &ctxt), SolutionSet::NoSolutions);
        assert_eq!(quadratic(&expr("1"), &expr("-2"), &expr("1"), &ctxt), SolutionSet::single(Expr::num(1)));
    }

    #[test]
    fn casus_irreducibilis() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let ctxt = Ctxt::new(&mut budget, &options);

        // x^3 - 3x + 1 has three irrational real roots
        let set = cubic(&expr("1"), &expr("-3"), &expr("0"), &expr("1"), &ctxt);
        assert_roots(&set, &[1, -3, 0, 1], 3);
    }

    #[test]
    fn cardano() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let ctxt = Ctxt::new(&mut budget, &options);

        let set = cubic(&expr("1"), &expr("1"), &expr("0"), &expr("1"), &ctxt);
        assert_roots(&set, &[1, 1, 0, 1], 1);

        let set = cubic(&expr("-2"), &expr("0"), &expr("0"), &expr("1"), &ctxt);
        assert_roots(&set, &[-2, 0, 0, 1], 1);
    }

    #[test]
    fn repeated_root() {
        let mut budget = Budget::default();
        let options = SolveOptions::default();
        let ctxt = Ctxt::new(&mut budget, &options);

        // (x - 1)^2 (x + 2) = x^3 - 3x + 2
        let set = cubic(&expr("2"), &expr("-3"), &expr("0"), &expr("1"), &ctxt);
        assert_roots(&set, &[2, -3, 0, 1], 2);
    }
}
