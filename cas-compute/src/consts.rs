//! Constants used during evaluation. Each is a [`Float`] computed once at [`PRECISION`] bits.
//!
//! [`PRECISION`]: crate::primitive::PRECISION

use once_cell::sync::Lazy;
use rug::{ops::Pow, Float};
use super::primitive::float;

pub static ZERO: Lazy<Float> = Lazy::new(|| float(0));

pub static ONE: Lazy<Float> = Lazy::new(|| float(1));

pub static TEN: Lazy<Float> = Lazy::new(|| float(10));

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

pub static TAU: Lazy<Float> = Lazy::new(|| float(2) * &*PI);

/// Values whose magnitude is below this are treated as zero when comparing numerical results.
///
/// Evaluation runs at 512 bits (about 154 decimal digits), so this leaves ample room for
/// cancellation in long expressions while still separating genuinely distinct values.
pub static ZERO_TOLERANCE: Lazy<Float> = Lazy::new(|| float(10).pow(-60));
