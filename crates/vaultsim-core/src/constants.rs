//! Protocol-wide constants
//! Centralized location for the scales and sentinels the vault accounting relies on

use num_bigint::BigUint;
use num_traits::One;

// PRECISION CONSTANTS
pub const BPS_PRECISION: u64 = 10_000;          // 100% = 10000 bps
pub const MAX_FEE_RATE_BPS: u64 = BPS_PRECISION;
pub const MAX_DECIMALS: u32 = 77;               // 10^77 < 2^256 < 10^78

// TIME
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY; // 31_536_000

// APR
pub const PERCENT: u64 = 100;

/// `2^256 - 1`, the value the vault stores in `newTotalAssets` while no valuation is proposed
pub fn max_uint_256() -> BigUint {
  (BigUint::one() << 256u32) - 1u32
}
