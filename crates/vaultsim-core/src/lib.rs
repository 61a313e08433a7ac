//! Off-chain accounting for asynchronous ERC-4626/ERC-7540 vaults
//! Fee accrual, share pricing and settlement arithmetic mirroring the on-chain rules

pub mod amount;
pub mod apr;
pub mod constants;
pub mod conversion;
pub mod error;
pub mod fees;
pub mod hwm;
pub mod invariants;
pub mod math;
pub mod period;
pub mod simulation;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use apr::{compute_apr, AprInput};
pub use conversion::{calculate_share_value, convert_to_assets, convert_to_shares, VaultTotals};
pub use error::{Result, VaultError};
pub use fees::{simulate_fees, simulate_management_fees, simulate_performance_fee, FeeBreakdown};
pub use hwm::total_assets_at_high_water_mark;
pub use math::Rounding;
pub use period::{last_period_summary_in_duration, PeriodSummary, Timestamped};
pub use simulation::simulate;
pub use state::*;
pub use store::{InMemorySettlementStore, SettlementRecord, SettlementStore};
