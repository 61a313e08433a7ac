//! Fee engine
//!
//! Fees are taken in this order, each step feeding the next:
//! 1. management fee, time-prorated on the simulated valuation
//! 2. price-per-share after the management fee
//! 3. performance fee on the profit per share above the high-water mark
//! 4. total fees converted to shares against the post-fee valuation
//! 5. each component converted to shares against the post-fee supply

use num_bigint::BigUint;
use num_traits::Zero;

use crate::constants::{BPS_PRECISION, SECONDS_PER_YEAR};
use crate::conversion::{convert_to_assets, convert_to_shares, VaultTotals};
use crate::error::Result;
use crate::invariants::validate_snapshot;
use crate::math::{pow10, zero_floor_sub, Rounding};
use crate::state::{Amounts, VaultSnapshot};

/// Performance fee and the excess returns it was charged on, both in assets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceFee {
  pub excess_returns: BigUint,
  pub fee: BigUint,
}

/// Every fee figure of a simulated settlement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeBreakdown {
  pub management_fees: Amounts,
  pub performance_fees: Amounts,
  pub total_fees: Amounts,
  pub excess_returns: BigUint,
  pub price_per_share_after_management_fees: BigUint,
}

impl FeeBreakdown {
  /// Supply once the fee shares are minted
  pub fn total_supply_after_fees(&self, vault: &VaultSnapshot) -> BigUint {
    &vault.total_supply + &self.total_fees.in_shares
  }
}

/// Management fee accrued between the last fee accrual and `now`
///
/// Formula: (totalAssets * managementRate / 10000) * elapsed / SECONDS_PER_YEAR
/// Rounded down at both divisions.
pub fn simulate_management_fees(vault: &VaultSnapshot, total_assets: &BigUint, now: u64) -> Result<BigUint> {
  validate_snapshot(vault)?;

  let rate = vault.fee_rates.management_rate;
  if rate == 0 {
    return Ok(BigUint::zero());
  }

  let time_elapsed = now.saturating_sub(vault.last_fee_time);
  let annual_fee = total_assets * rate / BPS_PRECISION;

  Ok(annual_fee * time_elapsed / SECONDS_PER_YEAR)
}

/// Performance fee charged on the gain per share above the high-water mark
///
/// # Arguments
/// * `price_per_share` - Price per share after management fees, in assets per whole share
///
/// # Returns
/// Excess returns over the whole supply and the fee taken from them.
/// Both are zero when the price does not exceed the high-water mark.
pub fn simulate_performance_fee(vault: &VaultSnapshot, price_per_share: &BigUint) -> PerformanceFee {
  let profit_per_share = zero_floor_sub(price_per_share, &vault.high_water_mark);
  if profit_per_share.is_zero() {
    return PerformanceFee::default();
  }

  let excess_returns = profit_per_share * &vault.total_supply / pow10(vault.decimals);
  let fee = &excess_returns * vault.fee_rates.performance_rate / BPS_PRECISION;

  PerformanceFee { excess_returns, fee }
}

/// Run the whole fee pipeline against `total_assets_for_simulation`
pub fn simulate_fees(vault: &VaultSnapshot, total_assets_for_simulation: &BigUint, now: u64) -> Result<FeeBreakdown> {
  validate_snapshot(vault)?;

  let decimals_offset = vault.decimals_offset()?;
  let one_share = vault.one_share();

  let management_fees_in_assets = simulate_management_fees(vault, total_assets_for_simulation, now)?;

  let assets_after_management_fees = zero_floor_sub(total_assets_for_simulation, &management_fees_in_assets);
  let price_per_share_after_management_fees = convert_to_assets(
    &one_share,
    VaultTotals::new(&assets_after_management_fees, &vault.total_supply, decimals_offset),
    Rounding::Down,
  )?;

  let performance = simulate_performance_fee(vault, &price_per_share_after_management_fees);
  let performance_fees_in_assets = performance.fee;

  let total_fees_in_assets = &management_fees_in_assets + &performance_fees_in_assets;

  // fees are paid in newly minted shares, priced against the post-fee valuation
  let assets_after_fees = zero_floor_sub(total_assets_for_simulation, &total_fees_in_assets);
  let total_fees_in_shares = convert_to_shares(
    &total_fees_in_assets,
    VaultTotals::new(&assets_after_fees, &vault.total_supply, decimals_offset),
    Rounding::Up,
  )?;

  let total_supply_after_fees = &vault.total_supply + &total_fees_in_shares;
  let post_fee_totals = VaultTotals::new(total_assets_for_simulation, &total_supply_after_fees, decimals_offset);

  let management_fees_in_shares = convert_to_shares(&management_fees_in_assets, post_fee_totals, Rounding::Down)?;
  let performance_fees_in_shares = convert_to_shares(&performance_fees_in_assets, post_fee_totals, Rounding::Down)?;

  tracing::debug!(
    management_fees = %management_fees_in_assets,
    performance_fees = %performance_fees_in_assets,
    total_fees_in_shares = %total_fees_in_shares,
    "simulated fees"
  );

  Ok(FeeBreakdown {
    management_fees: Amounts {
      in_assets: management_fees_in_assets,
      in_shares: management_fees_in_shares,
    },
    performance_fees: Amounts {
      in_assets: performance_fees_in_assets,
      in_shares: performance_fees_in_shares,
    },
    total_fees: Amounts {
      in_assets: total_fees_in_assets,
      in_shares: total_fees_in_shares,
    },
    excess_returns: performance.excess_returns,
    price_per_share_after_management_fees,
  })
}
