//! Annualized simple return between two price points

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::constants::{PERCENT, SECONDS_PER_YEAR};
use crate::error::{require, Result, VaultError};
use crate::invariants::assert_timestamps_ordered;

/// Two price-per-share observations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AprInput {
  pub new_price: BigInt,
  pub old_price: BigInt,
  pub new_timestamp: u64,
  pub old_timestamp: u64,
}

/// Annualized return in percent, rounded half away from zero
///
/// Formula: (newPrice - oldPrice) / oldPrice * SECONDS_PER_YEAR / period * 100
///
/// # Returns
/// * `Ok(0)` for a zero-second period or a zero old price
/// * `i64::MIN`/`i64::MAX` when the percentage does not fit
/// * `Err(InvalidInput)` for a negative price or an old timestamp after the new one
pub fn compute_apr(input: &AprInput) -> Result<i64> {
  require!(
    !input.new_price.is_negative() && !input.old_price.is_negative(),
    VaultError::InvalidInput("prices must be non-negative".to_string())
  );
  assert_timestamps_ordered(input.new_timestamp, input.old_timestamp)?;

  let period = input.new_timestamp - input.old_timestamp;
  if period == 0 || input.old_price.is_zero() {
    return Ok(0);
  }

  let gain = &input.new_price - &input.old_price;
  let numerator = gain * SECONDS_PER_YEAR * PERCENT;
  let denominator = &input.old_price * period;

  // (2n + d) / 2d rounds half up, mirrored for losses
  let doubled = &numerator * 2u32;
  let rounded = if numerator.is_negative() {
    (doubled - &denominator) / (&denominator * 2u32)
  } else {
    (doubled + &denominator) / (&denominator * 2u32)
  };

  Ok(rounded.to_i64().unwrap_or(if rounded.is_negative() { i64::MIN } else { i64::MAX }))
}
