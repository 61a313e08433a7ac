//! Vault state records consumed and produced by the simulator
//! These records are read-only inputs; derived state is always returned as a new value

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::constants::max_uint_256;
use crate::error::{Result, VaultError};
use crate::math::pow10;

/// Management and performance fee rates, in basis points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeRates {
  pub management_rate: u64,

  pub performance_rate: u64,
}

/// Protocol version tag of the vault. Accepted and echoed, not used in fee math.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VaultVersion {
  #[default]
  Latest,
  Tagged(String),
}

impl From<String> for VaultVersion {
  fn from(tag: String) -> Self {
    if tag.eq_ignore_ascii_case("latest") {
      VaultVersion::Latest
    } else {
      VaultVersion::Tagged(tag)
    }
  }
}

impl From<VaultVersion> for String {
  fn from(version: VaultVersion) -> Self {
    match version {
      VaultVersion::Latest => "latest".to_string(),
      VaultVersion::Tagged(tag) => tag,
    }
  }
}

/// Settled on-chain state of a vault at the time of the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSnapshot {
  /// Share decimals
  pub decimals: u32,

  pub underlying_decimals: u32,

  #[serde(with = "crate::amount")]
  pub total_assets: BigUint,

  #[serde(with = "crate::amount")]
  pub total_supply: BigUint,

  /// Price-per-share floor for performance fees, in underlying units per whole share
  #[serde(with = "crate::amount")]
  pub high_water_mark: BigUint,

  /// Unix seconds of the last fee accrual
  pub last_fee_time: u64,

  pub fee_rates: FeeRates,

  /// `MAX_UINT_256` while no valuation has been proposed
  #[serde(with = "crate::amount")]
  pub new_total_assets: BigUint,

  #[serde(default)]
  pub version: VaultVersion,
}

impl VaultSnapshot {
  /// `decimals - underlying_decimals`
  pub fn decimals_offset(&self) -> Result<u32> {
    self.decimals.checked_sub(self.underlying_decimals).ok_or_else(|| {
      VaultError::InvalidInput(format!(
        "share decimals {} below underlying decimals {}",
        self.decimals, self.underlying_decimals
      ))
    })
  }

  /// `10^decimals`, one whole share
  pub fn one_share(&self) -> BigUint {
    pow10(self.decimals)
  }

  /// A valuation is already proposed on-chain and waiting to be settled
  pub fn has_proposed_valuation(&self) -> bool {
    self.new_total_assets != max_uint_256()
  }

  /// Copy of this snapshot as it would read right after a settlement at `now`
  pub fn with_settlement(
    &self,
    total_assets: BigUint,
    total_supply: BigUint,
    high_water_mark: BigUint,
    now: u64,
  ) -> Self {
    Self {
      total_assets,
      total_supply,
      high_water_mark,
      last_fee_time: now,
      new_total_assets: max_uint_256(),
      ..self.clone()
    }
  }
}

/// Assets and shares parked in one of the pending-request areas
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBalances {
  #[serde(with = "crate::amount")]
  pub assets: BigUint,

  #[serde(with = "crate::amount")]
  pub shares: BigUint,
}

/// Historical price point used as an APR baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
  pub timestamp: u64,

  #[serde(with = "crate::amount")]
  pub price_per_share: BigUint,
}

/// What the caller proposes to settle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
  /// Valuation to simulate settling at
  #[serde(with = "crate::amount")]
  pub total_assets_for_simulation: BigUint,

  /// Custody balance available to honor redemptions
  #[serde(with = "crate::amount")]
  pub assets_in_safe: BigUint,

  #[serde(default)]
  pub pending_silo_balances: PendingBalances,

  #[serde(default)]
  pub pending_settlement: PendingBalances,

  pub settle_deposit: bool,

  #[serde(default)]
  pub thirty_day: Option<Baseline>,

  #[serde(default)]
  pub inception: Option<Baseline>,
}

/// A quantity expressed in both units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
  #[serde(with = "crate::amount")]
  pub in_assets: BigUint,

  #[serde(with = "crate::amount")]
  pub in_shares: BigUint,
}

/// Predicted post-settlement vault state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
  pub management_fees: Amounts,

  pub performance_fees: Amounts,

  pub total_fees: Amounts,

  #[serde(with = "crate::amount")]
  pub net_price_per_share: BigUint,

  #[serde(with = "crate::amount")]
  pub gross_price_per_share: BigUint,

  #[serde(with = "crate::amount")]
  pub high_water_mark: BigUint,

  #[serde(with = "crate::amount")]
  pub total_assets: BigUint,

  #[serde(with = "crate::amount")]
  pub total_supply: BigUint,

  pub assets_deposited_if_settle: Amounts,

  pub shares_redeemed_if_settle: Amounts,

  #[serde(with = "crate::amount")]
  pub assets_transferred_from_safe: BigUint,

  #[serde(with = "crate::amount")]
  pub excess_returns: BigUint,

  /// Percent, annualized over the period since the last fee accrual
  pub period_net_apr: i64,

  pub period_gross_apr: i64,

  pub thirty_days_net_apr: Option<i64>,

  pub inception_net_apr: Option<i64>,

  #[serde(with = "crate::amount")]
  pub total_assets_at_high_water_mark: BigUint,

  #[serde(with = "crate::amount")]
  pub assets_to_unwind: BigUint,

  pub version: VaultVersion,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn snapshot_reads_string_hex_and_number_amounts() {
    let json = r#"{
      "decimals": 18,
      "underlying_decimals": 6,
      "total_assets": 1000000,
      "total_supply": "1000000000000000000",
      "high_water_mark": "1000000",
      "last_fee_time": 0,
      "fee_rates": { "management_rate": 5, "performance_rate": 20 },
      "new_total_assets": "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    }"#;

    let vault: VaultSnapshot = serde_json::from_str(json).unwrap();

    assert_eq!(vault.decimals_offset().unwrap(), 12);
    assert_eq!(vault.total_assets, BigUint::from(1_000_000u32));
    assert!(!vault.has_proposed_valuation());
    assert_eq!(vault.version, VaultVersion::Latest);

    let written = serde_json::to_value(&vault).unwrap();
    assert_eq!(written["total_supply"], "1000000000000000000");
    assert_eq!(written["version"], "latest");
  }

  #[test]
  fn with_settlement_leaves_the_original_untouched() {
    let vault: VaultSnapshot = serde_json::from_str(
      r#"{
        "decimals": 6, "underlying_decimals": 6,
        "total_assets": "10", "total_supply": "10", "high_water_mark": "1",
        "last_fee_time": 5, "fee_rates": { "management_rate": 0, "performance_rate": 0 },
        "new_total_assets": "12", "version": "v0.4.0"
      }"#,
    )
    .unwrap();

    let settled = vault.with_settlement(BigUint::from(20u32), BigUint::from(18u32), BigUint::from(2u32), 99);

    assert_eq!(vault.last_fee_time, 5);
    assert_eq!(vault.high_water_mark, BigUint::from(1u32));
    assert!(vault.has_proposed_valuation());

    assert_eq!(settled.last_fee_time, 99);
    assert_eq!(settled.high_water_mark, BigUint::from(2u32));
    assert!(!settled.has_proposed_valuation());
    assert_eq!(settled.version, VaultVersion::Tagged("v0.4.0".to_string()));
  }

  #[test]
  fn negative_decimals_offset_is_an_error() {
    let vault: VaultSnapshot = serde_json::from_str(
      r#"{
        "decimals": 6, "underlying_decimals": 8,
        "total_assets": "10", "total_supply": "10", "high_water_mark": "1",
        "last_fee_time": 5, "fee_rates": { "management_rate": 0, "performance_rate": 0 },
        "new_total_assets": "12"
      }"#,
    )
    .unwrap();

    assert!(matches!(vault.decimals_offset(), Err(VaultError::InvalidInput(_))));
  }
}
