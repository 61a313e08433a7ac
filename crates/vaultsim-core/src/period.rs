//! Historical valuation snapshots and trailing-window lookup

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::state::Baseline;

/// Anything stamped with the block time it was observed at
pub trait Timestamped {
  fn block_timestamp(&self) -> u64;
}

/// Vault valuation observed at a past settlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
  pub block_timestamp: u64,

  #[serde(with = "crate::amount")]
  pub price_per_share: BigUint,

  #[serde(with = "crate::amount")]
  pub total_assets: BigUint,

  #[serde(with = "crate::amount")]
  pub total_supply: BigUint,
}

impl PeriodSummary {
  pub fn baseline(&self) -> Baseline {
    Baseline {
      timestamp: self.block_timestamp,
      price_per_share: self.price_per_share.clone(),
    }
  }
}

impl Timestamped for PeriodSummary {
  fn block_timestamp(&self) -> u64 {
    self.block_timestamp
  }
}

impl Timestamped for Baseline {
  fn block_timestamp(&self) -> u64 {
    self.timestamp
  }
}

/// Oldest record still inside the trailing `duration` window ending at the most recent record
///
/// The series may be ascending or descending; the order is read from the first two
/// records and only a strict increase counts as ascending. Returns None for an empty series.
pub fn last_period_summary_in_duration<T: Timestamped>(summaries: &[T], duration: u64) -> Option<&T> {
  let first = summaries.first()?;
  let Some(second) = summaries.get(1) else {
    return Some(first);
  };

  let ascending = second.block_timestamp() > first.block_timestamp();
  if ascending {
    let most_recent = summaries.last()?;
    let until = most_recent.block_timestamp().saturating_sub(duration);
    oldest_since(summaries.iter().rev(), until)
  } else {
    let until = first.block_timestamp().saturating_sub(duration);
    oldest_since(summaries.iter(), until)
  }
}

/// Walk from the most recent record and keep the last one at or after `until`
fn oldest_since<'a, T: Timestamped + 'a>(from_recent: impl Iterator<Item = &'a T>, until: u64) -> Option<&'a T> {
  from_recent.take_while(|summary| summary.block_timestamp() >= until).last()
}
