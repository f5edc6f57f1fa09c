//! Functions to construct [`Integer`]s, [`Rational`]s, and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when computing values.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value. Tuples are read as `(numerator, denominator)`.
pub fn rational<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Parses an exact decimal literal such as `12`, `0.25` or `.5` into a [`Rational`]. Returns
/// [`None`] if the string is not made of digits with at most one decimal point.
pub fn rational_from_decimal(s: &str) -> Option<Rational> {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{}{}", whole, frac);
    let numer = Integer::from_str_radix(&digits, 10).ok()?;
    let denom = Integer::from(Integer::u_pow_u(10, frac.len() as u32));
    Some(Rational::from((numer, denom)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn decimal_literals() {
        assert_eq!(rational_from_decimal("12"), Some(rational(12)));
        assert_eq!(rational_from_decimal("0.25"), Some(rational((1, 4))));
        assert_eq!(rational_from_decimal(".5"), Some(rational((1, 2))));
        assert_eq!(rational_from_decimal("3."), Some(rational(3)));
        assert_eq!(rational_from_decimal("."), None);
        assert_eq!(rational_from_decimal("1.2.3"), None);
    }
}
