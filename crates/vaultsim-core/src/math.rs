//! Pure fixed-point helpers for the vault accounting
//! All functions are deterministic and operate on unbounded integers,
//! so `x * y` never overflows before the division

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Rounding direction of a division. Never implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
  Up,
  Down,
}

/// Compute `x * y / denominator` rounded in the requested direction
/// Returns None when the denominator is zero
pub fn mul_div(x: &BigUint, y: &BigUint, denominator: &BigUint, rounding: Rounding) -> Option<BigUint> {
  if denominator.is_zero() {
    return None;
  }

  let product = x * y;
  let quotient = &product / denominator;

  match rounding {
    Rounding::Down => Some(quotient),
    Rounding::Up => {
      if (&product % denominator).is_zero() {
        Some(quotient)
      } else {
        Some(quotient + 1u32)
      }
    }
  }
}

/// Multiply and divide, rounding DOWN
/// Returns None when the denominator is zero
pub fn mul_div_down(x: &BigUint, y: &BigUint, denominator: &BigUint) -> Option<BigUint> {
  mul_div(x, y, denominator, Rounding::Down)
}

/// Multiply and divide, rounding UP
/// Returns None when the denominator is zero
pub fn mul_div_up(x: &BigUint, y: &BigUint, denominator: &BigUint) -> Option<BigUint> {
  mul_div(x, y, denominator, Rounding::Up)
}

/// `max(0, a - b)`
pub fn zero_floor_sub(a: &BigUint, b: &BigUint) -> BigUint {
  if a > b {
    a - b
  } else {
    BigUint::zero()
  }
}

/// Smallest of any number of values, None for an empty list
pub fn min<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
  values.into_iter().min()
}

/// Largest of any number of values, None for an empty list
pub fn max<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
  values.into_iter().max()
}

/// `10^exponent`
pub fn pow10(exponent: u32) -> BigUint {
  BigUint::from(10u32).pow(exponent)
}
