//! Exact values of the sine at multiples of `pi/12`.
//!
//! Angles are stored as the rational `r` in `r*pi`. Every exact value of the six circular
//! functions at a multiple of `pi/12` follows from the sine on the first quadrant, `0 <= r <= 1/2`.

use crate::primitive::{float, rational};
use crate::consts::PI;
use crate::symbolic::expr::Expr;
use once_cell::sync::Lazy;
use rug::{Float, Rational};

/// `(sqrt(6) - sqrt(2))/4` when `sign` is `-1`, or `(sqrt(6) + sqrt(2))/4` when `sign` is `1`.
fn fifteen_degrees(sign: i32) -> Expr {
    let sum = Expr::num(6).sqrt() + Expr::num(sign) * Expr::num(2).sqrt();
    Expr::num((1, 4)) * sum
}

/// `sin(r*pi)` for the multiples of `1/12` in the first quadrant.
pub static SIN_TABLE: Lazy<Vec<(Rational, Expr)>> = Lazy::new(|| vec![
    (rational(0), Expr::num(0)),
    (rational((1, 12)), fifteen_degrees(-1)),
    (rational((1, 6)), Expr::num((1, 2))),
    (rational((1, 4)), Expr::num((1, 2)) * Expr::num(2).sqrt()),
    (rational((1, 3)), Expr::num((1, 2)) * Expr::num(3).sqrt()),
    (rational((5, 12)), fifteen_degrees(1)),
    (rational((1, 2)), Expr::num(1)),
]);

/// The angle `r*pi` in radians.
fn angle(r: &Rational) -> Float {
    float(r) * &*PI
}

/// Numeric values of `sin(r*pi)` for the angles in [`SIN_TABLE`].
pub static SIN_VALUES: Lazy<Vec<(Rational, Float)>> = Lazy::new(|| {
    SIN_TABLE.iter()
        .map(|(r, _)| (r.clone(), angle(r).sin()))
        .collect()
});

/// Numeric values of `tan(r*pi)` for the angles in [`SIN_TABLE`], except `pi/2`.
pub static TAN_VALUES: Lazy<Vec<(Rational, Float)>> = Lazy::new(|| {
    SIN_TABLE.iter()
        .filter(|(r, _)| *r < rational((1, 2)))
        .map(|(r, _)| (r.clone(), angle(r).tan()))
        .collect()
});
