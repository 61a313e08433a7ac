//! ERC-4626 share/asset conversion with virtual liquidity
//!
//! One virtual asset and `10^decimals_offset` virtual shares are always added to the
//! totals, so the denominators never reach zero, even for an empty vault.
//!
//! | Conversion        | Default rounding |
//! |-------------------|------------------|
//! | shares -> assets  | DOWN             |
//! | assets -> shares  | UP               |

use num_bigint::BigUint;

use crate::error::{Result, VaultError};
use crate::math::{mul_div, pow10, Rounding};

pub const DEFAULT_TO_ASSETS_ROUNDING: Rounding = Rounding::Down;
pub const DEFAULT_TO_SHARES_ROUNDING: Rounding = Rounding::Up;

/// Totals a conversion is priced against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultTotals<'a> {
  pub total_assets: &'a BigUint,
  pub total_supply: &'a BigUint,
  pub decimals_offset: u32,
}

impl<'a> VaultTotals<'a> {
  pub fn new(total_assets: &'a BigUint, total_supply: &'a BigUint, decimals_offset: u32) -> Self {
    Self { total_assets, total_supply, decimals_offset }
  }

  fn virtual_assets(&self) -> BigUint {
    self.total_assets + 1u32
  }

  fn virtual_supply(&self) -> BigUint {
    self.total_supply + pow10(self.decimals_offset)
  }
}

/// Convert shares to assets
///
/// Formula: assets = shares * (totalAssets + 1) / (totalSupply + 10^decimalsOffset)
pub fn convert_to_assets(shares: &BigUint, totals: VaultTotals<'_>, rounding: Rounding) -> Result<BigUint> {
  mul_div(shares, &totals.virtual_assets(), &totals.virtual_supply(), rounding)
    .ok_or(VaultError::DivisionByZero)
}

/// Convert assets to shares
///
/// Formula: shares = assets * (totalSupply + 10^decimalsOffset) / (totalAssets + 1)
pub fn convert_to_shares(assets: &BigUint, totals: VaultTotals<'_>, rounding: Rounding) -> Result<BigUint> {
  mul_div(assets, &totals.virtual_supply(), &totals.virtual_assets(), rounding)
    .ok_or(VaultError::DivisionByZero)
}

/// Value of the whole supply at a given price-per-share
///
/// Formula: pricePerShare * totalSupply / 10^decimals
pub fn calculate_share_value(
  price_per_share: &BigUint,
  total_supply: &BigUint,
  decimals: u32,
  rounding: Rounding,
) -> Result<BigUint> {
  mul_div(price_per_share, total_supply, &pow10(decimals), rounding).ok_or(VaultError::DivisionByZero)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn big(v: u64) -> BigUint {
    BigUint::from(v)
  }

  #[test]
  fn empty_vault_uses_virtual_liquidity() {
    let zero = big(0);
    let totals = VaultTotals::new(&zero, &zero, 12);

    // one whole share of an empty vault prices at one whole asset
    let assets = convert_to_assets(&pow10(18), totals, DEFAULT_TO_ASSETS_ROUNDING).unwrap();
    assert_eq!(assets, big(1_000_000));

    let shares = convert_to_shares(&big(1_000_000), totals, DEFAULT_TO_SHARES_ROUNDING).unwrap();
    assert_eq!(shares, pow10(18));
  }

  #[test]
  fn default_directions_favor_the_vault() {
    let total_assets = big(100);
    let total_supply = big(300);
    let totals = VaultTotals::new(&total_assets, &total_supply, 0);

    // 10 * 101 / 301 = 3.35..
    assert_eq!(convert_to_assets(&big(10), totals, Rounding::Down).unwrap(), big(3));
    assert_eq!(convert_to_assets(&big(10), totals, Rounding::Up).unwrap(), big(4));
    // 10 * 301 / 101 = 29.8..
    assert_eq!(convert_to_shares(&big(10), totals, Rounding::Up).unwrap(), big(30));
    assert_eq!(convert_to_shares(&big(10), totals, Rounding::Down).unwrap(), big(29));
  }

  #[test]
  fn share_value_scales_by_share_decimals() {
    // 1.05 assets per share over 2.5 shares of 18 decimals
    let value = calculate_share_value(&big(1_050_000), &(big(25) * pow10(17)), 18, Rounding::Down).unwrap();
    assert_eq!(value, big(2_625_000));

    let value = calculate_share_value(&big(3), &big(1), 1, Rounding::Up).unwrap();
    assert_eq!(value, big(1));
  }
}
