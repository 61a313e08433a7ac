//! Settlement simulator executable
//! Reads a scenario file, sources APR baselines from its history and prints the predicted settlement as JSON

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Deserialize;
use vaultsim_config::SimulatorConfig;
use vaultsim_core::store::pending_settlement_from_store;
use vaultsim_core::{
  last_period_summary_in_duration, simulate, InMemorySettlementStore, PeriodSummary, SettlementRecord,
  SettlementStore, SimulationInput, VaultSnapshot,
};

#[derive(Debug, Deserialize)]
struct Scenario {
  vault: VaultSnapshot,

  input: SimulationInput,

  /// Past valuations, ascending or descending
  #[serde(default)]
  history: Vec<PeriodSummary>,

  #[serde(default)]
  settlements: Vec<SettlementRecord>,

  /// Settlement whose pending amounts the proposed valuation includes
  #[serde(default)]
  settle_id: Option<u64>,
}

fn main() -> Result<()> {
  let config = SimulatorConfig::from_env().context("loading simulator config")?;
  vaultsim_telemetry::init("simulator", &config.log_filter)?;

  tracing::info!(config = ?config, "starting simulator");

  let now = match config.now {
    Some(now) => now,
    None => SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .context("system clock is before the unix epoch")?
      .as_secs(),
  };

  let raw = fs::read_to_string(&config.scenario_path)
    .with_context(|| format!("reading scenario {}", config.scenario_path.display()))?;
  let scenario: Scenario = serde_json::from_str(&raw).context("parsing scenario")?;

  let input = prepare_input(&scenario, config.thirty_day_window)?;
  let result = simulate(&scenario.vault, &input, now).context("simulating settlement")?;

  tracing::info!(
    net_price_per_share = %result.net_price_per_share,
    assets_to_unwind = %result.assets_to_unwind,
    "simulation complete"
  );

  let output = if config.pretty {
    serde_json::to_string_pretty(&result)?
  } else {
    serde_json::to_string(&result)?
  };
  println!("{output}");

  Ok(())
}

/// Fill in what the scenario leaves to the caller: pending settlement amounts and APR baselines
fn prepare_input(scenario: &Scenario, thirty_day_window: u64) -> Result<SimulationInput> {
  let mut input = scenario.input.clone();

  if let Some(settle_id) = scenario.settle_id {
    let mut store = InMemorySettlementStore::new();
    for record in &scenario.settlements {
      store.insert(record.clone());
    }
    input.pending_settlement = pending_settlement_from_store(&store, settle_id)
      .with_context(|| format!("resolving pending settlement {settle_id}"))?;
  }

  if input.thirty_day.is_none() {
    input.thirty_day = last_period_summary_in_duration(&scenario.history, thirty_day_window).map(PeriodSummary::baseline);
  }

  if input.inception.is_none() {
    input.inception = last_period_summary_in_duration(&scenario.history, u64::MAX).map(PeriodSummary::baseline);
  }

  tracing::debug!(
    thirty_day = ?input.thirty_day,
    inception = ?input.inception,
    "resolved apr baselines"
  );

  Ok(input)
}
