//! Settlement records keyed by settlement id
//! Stores are owned by the caller and injected where needed

use std::collections::HashMap;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};
use crate::state::PendingBalances;

/// Totals and pending amounts captured when a valuation was proposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
  pub settle_id: u64,

  #[serde(with = "crate::amount")]
  pub total_assets: BigUint,

  #[serde(with = "crate::amount")]
  pub total_supply: BigUint,

  #[serde(with = "crate::amount")]
  pub pending_assets: BigUint,

  #[serde(with = "crate::amount")]
  pub pending_shares: BigUint,
}

impl SettlementRecord {
  /// Pending balances included in the proposed valuation
  pub fn pending_balances(&self) -> PendingBalances {
    PendingBalances {
      assets: self.pending_assets.clone(),
      shares: self.pending_shares.clone(),
    }
  }
}

pub trait SettlementStore {
  /// Record for `settle_id`, `SettlementNotFound` on a miss
  fn get(&self, settle_id: u64) -> Result<SettlementRecord>;

  /// Insert or replace the record for its settlement id
  fn insert(&mut self, record: SettlementRecord);
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySettlementStore {
  records: HashMap<u64, SettlementRecord>,
}

impl InMemorySettlementStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

impl SettlementStore for InMemorySettlementStore {
  fn get(&self, settle_id: u64) -> Result<SettlementRecord> {
    self
      .records
      .get(&settle_id)
      .cloned()
      .ok_or(VaultError::SettlementNotFound(settle_id))
  }

  fn insert(&mut self, record: SettlementRecord) {
    self.records.insert(record.settle_id, record);
  }
}

/// Pending-settlement balances of a proposed settlement, read from the store
pub fn pending_settlement_from_store<S: SettlementStore + ?Sized>(store: &S, settle_id: u64) -> Result<PendingBalances> {
  store.get(settle_id).map(|record| record.pending_balances())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(settle_id: u64) -> SettlementRecord {
    SettlementRecord {
      settle_id,
      total_assets: BigUint::from(1_000u32),
      total_supply: BigUint::from(1_000u32),
      pending_assets: BigUint::from(50u32),
      pending_shares: BigUint::from(20u32),
    }
  }

  #[test]
  fn miss_reports_settlement_id() {
    let store = InMemorySettlementStore::new();
    assert_eq!(store.get(7), Err(VaultError::SettlementNotFound(7)));
  }

  #[test]
  fn stores_are_isolated() {
    let mut a = InMemorySettlementStore::new();
    let b = InMemorySettlementStore::new();
    a.insert(record(1));

    assert_eq!(a.len(), 1);
    assert!(b.is_empty());
    assert!(b.get(1).is_err());
  }

  #[test]
  fn insert_replaces_and_exposes_pending_balances() {
    let mut store = InMemorySettlementStore::new();
    store.insert(record(3));

    let mut updated = record(3);
    updated.pending_assets = BigUint::from(99u32);
    store.insert(updated);

    let pending = pending_settlement_from_store(&store, 3).unwrap();
    assert_eq!(pending.assets, BigUint::from(99u32));
    assert_eq!(pending.shares, BigUint::from(20u32));
    assert_eq!(store.len(), 1);
  }
}
