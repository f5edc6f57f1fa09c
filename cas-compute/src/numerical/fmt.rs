//! Decimal formatting of evaluated values.

use rug::{float::Round, Float};
use std::cmp::Ordering;

/// Trims trailing zeros from a string assumed to represent a single number in decimal notation.
fn trim_trailing(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a float in decimal notation, rounded to `digits` significant digits. Numbers that are
/// very small or very large are written in scientific notation instead.
pub fn fmt_approx(n: &Float, digits: usize) -> String {
    if !n.is_normal() {
        if n.is_zero() {
            return "0".to_string();
        }
        return n.to_string();
    }

    let (sign, mut s, exponent) = n.to_sign_string_exp_round(10, Some(digits.max(1)), Round::Nearest);
    let exponent = exponent.unwrap_or(0);
    let sign = if sign { "-" } else { "" };

    // scientific notation outside of roughly 1e-6..1e12
    if exponent < -5 || exponent > 12 {
        if s.len() > 1 {
            s.insert(1, '.');
        }
        return format!("{}{}e{}", sign, trim_trailing(&s), exponent - 1);
    }

    match exponent.cmp(&0) {
        Ordering::Less => s.insert_str(0, &format!("0.{}", "0".repeat(-exponent as usize))),
        Ordering::Equal => s.insert_str(0, "0."),
        Ordering::Greater => {
            let exponent = exponent as usize;
            match s.len().cmp(&exponent) {
                // not enough digits before the decimal point
                Ordering::Less => s.push_str(&"0".repeat(exponent - s.len())),
                Ordering::Greater => s.insert(exponent, '.'),
                Ordering::Equal => {},
            }
        },
    }

    format!("{}{}", sign, trim_trailing(&s))
}

#[cfg(test)]
mod tests {
    use crate::primitive::float;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal() {
        assert_eq!(fmt_approx(&float(2.5), 10), "2.5");
        assert_eq!(fmt_approx(&float(-1234), 10), "-1234");
        assert_eq!(fmt_approx(&float(0.125), 10), "0.125");
        assert_eq!(fmt_approx(&float(0), 10), "0");
    }

    #[test]
    fn rounding() {
        let third = float(1) / float(3);
        assert_eq!(fmt_approx(&third, 5), "0.33333");
    }

    #[test]
    fn scientific() {
        assert_eq!(fmt_approx(&float(1e20), 10), "1e20");
        assert_eq!(fmt_approx(&float(2.5e-9), 10), "2.5e-9");
    }
}
