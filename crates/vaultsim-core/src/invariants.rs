//! Input checks for the vault accounting
//! Every public entry point that prices a snapshot MUST call these before doing math

use crate::constants::{MAX_DECIMALS, MAX_FEE_RATE_BPS};
use crate::error::{require, Result, VaultError};
use crate::state::{FeeRates, VaultSnapshot};

/// Assert that both fee rates are within [0, 10000] bps
pub fn assert_fee_rates_within_bounds(rates: &FeeRates) -> Result<()> {
  require!(
    rates.management_rate <= MAX_FEE_RATE_BPS,
    VaultError::InvalidInput(format!("management rate {} bps exceeds {}", rates.management_rate, MAX_FEE_RATE_BPS))
  );
  require!(
    rates.performance_rate <= MAX_FEE_RATE_BPS,
    VaultError::InvalidInput(format!("performance rate {} bps exceeds {}", rates.performance_rate, MAX_FEE_RATE_BPS))
  );
  Ok(())
}

/// Assert that share decimals are not below asset decimals (decimals offset >= 0)
pub fn assert_decimals_offset_non_negative(decimals: u32, underlying_decimals: u32) -> Result<()> {
  require!(
    decimals >= underlying_decimals,
    VaultError::InvalidInput(format!(
      "share decimals {decimals} below underlying decimals {underlying_decimals}"
    ))
  );
  Ok(())
}

/// Assert that share decimals fit a 256-bit amount (`10^decimals` representable)
pub fn assert_decimals_within_bounds(decimals: u32) -> Result<()> {
  require!(
    decimals <= MAX_DECIMALS,
    VaultError::InvalidInput(format!("share decimals {decimals} exceed {MAX_DECIMALS}"))
  );
  Ok(())
}

/// Assert that a (new, old) timestamp pair is not inverted
pub fn assert_timestamps_ordered(new_timestamp: u64, old_timestamp: u64) -> Result<()> {
  require!(
    old_timestamp <= new_timestamp,
    VaultError::InvalidInput(format!("old timestamp {old_timestamp} is after new timestamp {new_timestamp}"))
  );
  Ok(())
}

/// Run every snapshot check
pub fn validate_snapshot(vault: &VaultSnapshot) -> Result<()> {
  assert_decimals_within_bounds(vault.decimals)?;
  assert_decimals_offset_non_negative(vault.decimals, vault.underlying_decimals)?;
  assert_fee_rates_within_bounds(&vault.fee_rates)?;
  Ok(())
}
