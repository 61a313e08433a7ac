//! High-water-mark projection
//! Break-even valuation above which performance fees start to accrue

use num_bigint::BigUint;

use crate::conversion::{convert_to_shares, VaultTotals};
use crate::error::Result;
use crate::fees::simulate_management_fees;
use crate::invariants::validate_snapshot;
use crate::math::{pow10, zero_floor_sub, Rounding};
use crate::state::VaultSnapshot;

/// Total assets at which the price per share reaches the current high-water mark
///
/// # Arguments
/// * `vault` - Snapshot providing supply, decimals, rates and the high-water mark
/// * `total_assets` - Valuation to accrue the management fee on, `vault.total_assets` when None
/// * `now` - Unix seconds the management fee is accrued up to
///
/// # Returns
/// floor((hwm + 1) * (totalSupply + managementFeeShares + 10^offset) / 10^decimals) - 1,
/// the minimal valuation whose price per share strictly exceeds the high-water mark.
pub fn total_assets_at_high_water_mark(
  vault: &VaultSnapshot,
  total_assets: Option<&BigUint>,
  now: u64,
) -> Result<BigUint> {
  validate_snapshot(vault)?;

  let total_assets = total_assets.unwrap_or(&vault.total_assets);
  let decimals_offset = vault.decimals_offset()?;

  let management_fee = simulate_management_fees(vault, total_assets, now)?;
  let assets_after_fee = zero_floor_sub(total_assets, &management_fee);
  let management_fee_shares = convert_to_shares(
    &management_fee,
    VaultTotals::new(&assets_after_fee, &vault.total_supply, decimals_offset),
    Rounding::Up,
  )?;

  let supply_with_virtual = &vault.total_supply + management_fee_shares + pow10(decimals_offset);
  let threshold = (&vault.high_water_mark + 1u32) * supply_with_virtual / vault.one_share();

  Ok(zero_floor_sub(&threshold, &BigUint::from(1u32)))
}
