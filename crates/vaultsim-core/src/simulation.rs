//! Settlement simulator
//! Predicts the vault state right after settling at a proposed valuation

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::apr::{compute_apr, AprInput};
use crate::conversion::{convert_to_assets, convert_to_shares, VaultTotals};
use crate::error::Result;
use crate::fees::simulate_fees;
use crate::hwm::total_assets_at_high_water_mark;
use crate::invariants::validate_snapshot;
use crate::math::{zero_floor_sub, Rounding};
use crate::state::{Amounts, Baseline, SimulationInput, SimulationResult, VaultSnapshot};

/// Simulate a settlement at `input.total_assets_for_simulation` as if it happened at `now`
///
/// # Arguments
/// * `vault` - Settled on-chain state, never modified
/// * `input` - Proposed valuation, custody balance and pending request balances
/// * `now` - Unix seconds, read once by the caller and used for every time-dependent figure
///
/// # Returns
/// Fees, prices, the new high-water mark, post-settlement totals, liquidity flows and APRs.
/// Redemptions only reduce the totals when custody can honor all of them.
pub fn simulate(vault: &VaultSnapshot, input: &SimulationInput, now: u64) -> Result<SimulationResult> {
  validate_snapshot(vault)?;

  let decimals_offset = vault.decimals_offset()?;
  let one_share = vault.one_share();
  let total_assets = &input.total_assets_for_simulation;

  let fees = simulate_fees(vault, total_assets, now)?;

  let can_settle = vault.has_proposed_valuation();

  let total_supply_after_fees = fees.total_supply_after_fees(vault);
  let post_fee_totals = VaultTotals::new(total_assets, &total_supply_after_fees, decimals_offset);

  let net_price_per_share = convert_to_assets(&one_share, post_fee_totals, Rounding::Down)?;
  let high_water_mark = vault.high_water_mark.clone().max(net_price_per_share.clone());

  let gross_price_per_share = convert_to_assets(
    &one_share,
    VaultTotals::new(total_assets, &vault.total_supply, decimals_offset),
    Rounding::Down,
  )?;

  let period_net_apr = compute_apr(&AprInput {
    new_price: BigInt::from(net_price_per_share.clone()),
    old_price: BigInt::from(vault.high_water_mark.clone()),
    new_timestamp: now,
    old_timestamp: vault.last_fee_time,
  })?;

  let period_gross_apr = compute_apr(&AprInput {
    new_price: BigInt::from(gross_price_per_share.clone()),
    old_price: BigInt::from(vault.high_water_mark.clone()),
    new_timestamp: now,
    old_timestamp: vault.last_fee_time,
  })?;

  let thirty_days_net_apr = baseline_apr(input.thirty_day.as_ref(), &net_price_per_share, now)?;
  let inception_net_apr = baseline_apr(input.inception.as_ref(), &net_price_per_share, now)?;

  // a proposed valuation already includes the pending settlement, otherwise settling pulls from the silo
  let pending = if can_settle {
    &input.pending_settlement
  } else {
    &input.pending_silo_balances
  };

  let assets_deposited_if_settle = if input.settle_deposit {
    Amounts {
      in_shares: convert_to_shares(&pending.assets, post_fee_totals, Rounding::Down)?,
      in_assets: pending.assets.clone(),
    }
  } else {
    Amounts::default()
  };

  // optimistic: assumes custody can honor every redemption
  let shares_redeemed_if_settle = Amounts {
    in_assets: convert_to_assets(&pending.shares, post_fee_totals, Rounding::Down)?,
    in_shares: pending.shares.clone(),
  };

  let assets_available = &assets_deposited_if_settle.in_assets + &input.assets_in_safe;
  let assets_to_unwind = zero_floor_sub(&shares_redeemed_if_settle.in_assets, &assets_available);
  let assets_transferred_from_safe = zero_floor_sub(
    &shares_redeemed_if_settle.in_assets,
    &assets_deposited_if_settle.in_assets,
  );

  let mut total_assets_after = total_assets.clone();
  let mut total_supply_after = total_supply_after_fees.clone();

  if input.settle_deposit {
    total_assets_after += &assets_deposited_if_settle.in_assets;
    total_supply_after += &assets_deposited_if_settle.in_shares;
  }

  if assets_to_unwind.is_zero() {
    total_assets_after = zero_floor_sub(&total_assets_after, &shares_redeemed_if_settle.in_assets);
    total_supply_after = zero_floor_sub(&total_supply_after, &shares_redeemed_if_settle.in_shares);
  } else {
    tracing::warn!(
      assets_to_unwind = %assets_to_unwind,
      assets_in_safe = %input.assets_in_safe,
      "custody cannot honor pending redemptions, redeem side left unsettled"
    );
  }

  let settled = vault.with_settlement(
    total_assets_after.clone(),
    total_supply_after.clone(),
    high_water_mark.clone(),
    now,
  );
  let total_assets_at_high_water_mark = total_assets_at_high_water_mark(&settled, None, now)?;

  tracing::debug!(
    can_settle,
    net_price_per_share = %net_price_per_share,
    high_water_mark = %high_water_mark,
    total_assets = %total_assets_after,
    total_supply = %total_supply_after,
    "simulated settlement"
  );

  Ok(SimulationResult {
    management_fees: fees.management_fees,
    performance_fees: fees.performance_fees,
    total_fees: fees.total_fees,
    net_price_per_share,
    gross_price_per_share,
    high_water_mark,
    total_assets: total_assets_after,
    total_supply: total_supply_after,
    assets_deposited_if_settle,
    shares_redeemed_if_settle,
    assets_transferred_from_safe,
    excess_returns: fees.excess_returns,
    period_net_apr,
    period_gross_apr,
    thirty_days_net_apr,
    inception_net_apr,
    total_assets_at_high_water_mark,
    assets_to_unwind,
    version: vault.version.clone(),
  })
}

fn baseline_apr(baseline: Option<&Baseline>, net_price_per_share: &BigUint, now: u64) -> Result<Option<i64>> {
  let Some(baseline) = baseline else {
    return Ok(None);
  };

  compute_apr(&AprInput {
    new_price: BigInt::from(net_price_per_share.clone()),
    old_price: BigInt::from(baseline.price_per_share.clone()),
    new_timestamp: now,
    old_timestamp: baseline.timestamp,
  })
  .map(Some)
}
