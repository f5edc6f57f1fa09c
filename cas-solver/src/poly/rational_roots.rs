//! Exact rational roots of polynomials with rational coefficients.
//!
//! Coefficient slices are indexed by degree: `coeffs[i]` is the coefficient of `x^i`, and the
//! last element is the (nonzero) leading coefficient.

use cas_compute::primitive::{int, rational};
use log::trace;
use rug::{Integer, Rational};

/// Evaluates the polynomial at `x` using Horner's method.
pub(crate) fn horner(coeffs: &[Rational], x: &Rational) -> Rational {
    coeffs.iter()
        .rev()
        .fold(Rational::new(), |acc, coeff| acc * x + coeff)
}

/// Divides `numer` by `denom`, returning the quotient and the remainder.
///
/// The remainder has its trailing zero coefficients removed, so an exact division returns an
/// empty remainder. `denom` must have a nonzero leading coefficient.
pub(crate) fn long_division(numer: &[Rational], denom: &[Rational]) -> (Vec<Rational>, Vec<Rational>) {
    let Some(lead) = denom.last() else {
        return (Vec::new(), numer.to_vec());
    };
    if numer.len() < denom.len() {
        return (Vec::new(), trimmed(numer.to_vec()));
    }

    let mut remainder = numer.to_vec();
    let mut quotient = vec![Rational::new(); numer.len() - denom.len() + 1];
    for i in (0..quotient.len()).rev() {
        let factor = Rational::from(&remainder[i + denom.len() - 1] / lead);
        if factor.cmp0().is_eq() {
            continue;
        }
        for (j, d) in denom.iter().enumerate() {
            remainder[i + j] -= Rational::from(&factor * d);
        }
        quotient[i] = factor;
    }
    remainder.truncate(denom.len() - 1);
    (quotient, trimmed(remainder))
}

/// Removes trailing zero coefficients.
fn trimmed(mut coeffs: Vec<Rational>) -> Vec<Rational> {
    while coeffs.last().map_or(false, |c| c.cmp0().is_eq()) {
        coeffs.pop();
    }
    coeffs
}

/// Divides the polynomial by `x - root`, which must be a root.
fn divide_root(coeffs: &[Rational], root: &Rational) -> Vec<Rational> {
    let (quotient, _) = long_division(coeffs, &[-root.clone(), rational(1)]);
    quotient
}

/// Returns the positive divisors of `n`, or [`None`] if `n` is zero.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs();
    if n == 0 {
        return None;
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = int(1);
    while Integer::from(&d * &d) <= n {
        if n.is_divisible(&d) {
            let pair = Integer::from(&n / &d);
            if pair != d {
                large.push(pair);
            }
            small.push(d.clone());
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

/// Scales the coefficients by the least common multiple of their denominators, making them all
/// integers.
fn integer_coefficients(coeffs: &[Rational]) -> Vec<Integer> {
    let lcm = coeffs.iter().fold(int(1), |acc, c| acc.lcm(c.denom()));
    coeffs.iter()
        .map(|c| Integer::from(c.numer() * Integer::from(&lcm / c.denom())))
        .collect()
}

/// Finds every rational root of the polynomial, using the rational root theorem.
///
/// Returns the distinct roots found, and the polynomial left after dividing out each root as
/// many times as it occurs. The search is skipped, returning no roots, if the constant or leading
/// coefficient is larger than `max_magnitude` after clearing denominators.
pub(crate) fn extract(coeffs: &[Rational], max_magnitude: u64) -> (Vec<Rational>, Vec<Rational>) {
    let mut remaining = trimmed(coeffs.to_vec());
    let mut roots = Vec::new();

    while remaining.len() > 1 && remaining[0].cmp0().is_eq() {
        remaining.remove(0);
        if roots.is_empty() {
            roots.push(Rational::new());
        }
    }
    if remaining.len() < 2 {
        return (roots, remaining);
    }

    let integers = integer_coefficients(&remaining);
    let (constant, leading) = match (integers.first(), integers.last()) {
        (Some(c), Some(l)) => (c.clone(), l.clone()),
        _ => return (roots, remaining),
    };
    if constant.clone().abs() > max_magnitude || leading.clone().abs() > max_magnitude {
        trace!("skipping rational root search: coefficients too large");
        return (roots, remaining);
    }

    let (Some(numers), Some(denoms)) = (divisors(&constant), divisors(&leading)) else {
        return (roots, remaining);
    };
    for p in &numers {
        for q in &denoms {
            if remaining.len() < 2 {
                return (roots, remaining);
            }
            if Integer::from(p.gcd_ref(q)) != 1 {
                continue;
            }
            for candidate in [rational((p, q)), -rational((p, q))] {
                let mut found = false;
                while remaining.len() > 1 && horner(&remaining, &candidate).cmp0().is_eq() {
                    remaining = divide_root(&remaining, &candidate);
                    found = true;
                }
                if found {
                    trace!("found rational root {}", candidate);
                    roots.push(candidate);
                }
            }
        }
    }
    (roots, remaining)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn coeffs(values: &[i32]) -> Vec<Rational> {
        values.iter().map(|&n| rational(n)).collect()
    }

    #[test]
    fn division_with_remainder() {
        // (x^3 - 2x + 5) / (x - 1) = x^2 + x - 1, remainder 4
        let (quotient, remainder) = long_division(&coeffs(&[5, -2, 0, 1]), &coeffs(&[-1, 1]));
        assert_eq!(quotient, coeffs(&[-1, 1, 1]));
        assert_eq!(remainder, coeffs(&[4]));
    }

    #[test]
    fn exact_division() {
        // (x^2 + 5x - 14) / (x + 7) = x - 2
        let (quotient, remainder) = long_division(&coeffs(&[-14, 5, 1]), &coeffs(&[7, 1]));
        assert_eq!(quotient, coeffs(&[-2, 1]));
        assert!(remainder.is_empty());
    }

    #[test]
    fn divisors_in_order() {
        assert_eq!(divisors(&int(12)), Some(vec![int(1), int(2), int(3), int(4), int(6), int(12)]));
        assert_eq!(divisors(&int(-9)), Some(vec![int(1), int(3), int(9)]));
        assert_eq!(divisors(&int(0)), None);
    }

    #[test]
    fn integer_and_fractional_roots() {
        // x^3 + 3x^2 - 5x + 1 = (x - 1)(x^2 + 4x - 1)
        let (roots, remaining) = extract(&coeffs(&[1, -5, 3, 1]), 1_000_000);
        assert_eq!(roots, vec![rational(1)]);
        assert_eq!(remaining, coeffs(&[-1, 4, 1]));

        // 2x^2 - 3x + 1 = (2x - 1)(x - 1)
        let (mut roots, remaining) = extract(&coeffs(&[1, -3, 2]), 1_000_000);
        roots.sort();
        assert_eq!(roots, vec![rational((1, 2)), rational(1)]);
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn repeated_roots_divide_out() {
        // (x - 2)^2 (x^2 + 1)
        let (roots, remaining) = extract(&coeffs(&[4, -4, 5, -4, 1]), 1_000_000);
        assert_eq!(roots, vec![rational(2)]);
        assert_eq!(remaining, coeffs(&[1, 0, 1]));
    }

    #[test]
    fn large_coefficients_are_skipped() {
        let (roots, remaining) = extract(&coeffs(&[-1_000_000, 1]), 1000);
        assert!(roots.is_empty());
        assert_eq!(remaining.len(), 2);
    }
}
