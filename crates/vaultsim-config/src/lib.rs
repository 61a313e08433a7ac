//! Runtime configuration for the simulator executable
//! Values come from the process environment, with `.env` support

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub const SCENARIO_VAR: &str = "VAULTSIM_SCENARIO";
pub const NOW_VAR: &str = "VAULTSIM_NOW";
pub const LOG_VAR: &str = "VAULTSIM_LOG";
pub const PRETTY_VAR: &str = "VAULTSIM_PRETTY";
pub const THIRTY_DAY_WINDOW_VAR: &str = "VAULTSIM_THIRTY_DAY_WINDOW";

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_THIRTY_DAY_WINDOW: u64 = 30 * 86_400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("missing required environment variable {0}")]
  Missing(&'static str),

  #[error("invalid value `{value}` for {var}: {reason}")]
  Invalid {
    var: &'static str,
    value: String,
    reason: &'static str,
  },

  #[error("failed to load .env: {0}")]
  Dotenv(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulatorConfig {
  /// Scenario JSON file to simulate
  pub scenario_path: PathBuf,

  /// Fixed unix timestamp to simulate at, wall clock when None
  pub now: Option<u64>,

  pub log_filter: String,

  pub pretty: bool,

  /// Trailing window, in seconds, for the thirty-day APR baseline
  pub thirty_day_window: u64,
}

impl SimulatorConfig {
  /// Load `.env` if present, then read the process environment
  pub fn from_env() -> Result<Self, ConfigError> {
    load_dotenv(dotenvy::dotenv().map(|_| ()))?;
    Self::from_lookup(|var| std::env::var(var).ok())
  }

  /// Build the config from any variable source
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let scenario_path = lookup(SCENARIO_VAR)
      .filter(|value| !value.trim().is_empty())
      .map(PathBuf::from)
      .ok_or(ConfigError::Missing(SCENARIO_VAR))?;

    let now = lookup(NOW_VAR).map(|value| parse_u64(NOW_VAR, &value)).transpose()?;

    let log_filter = lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let pretty = match lookup(PRETTY_VAR) {
      Some(value) => parse_bool(PRETTY_VAR, &value)?,
      None => true,
    };

    let thirty_day_window = match lookup(THIRTY_DAY_WINDOW_VAR) {
      Some(value) => parse_u64(THIRTY_DAY_WINDOW_VAR, &value)?,
      None => DEFAULT_THIRTY_DAY_WINDOW,
    };

    Ok(Self {
      scenario_path,
      now,
      log_filter,
      pretty,
      thirty_day_window,
    })
  }
}

/// A missing `.env` file is fine, an unreadable or malformed one is not
fn load_dotenv(loaded: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
  match loaded {
    Ok(()) => Ok(()),
    Err(err) if err.not_found() => Ok(()),
    Err(err) => Err(ConfigError::Dotenv(err.to_string())),
  }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
  value.trim().parse().map_err(|_| ConfigError::Invalid {
    var,
    value: value.to_string(),
    reason: "expected an unsigned integer",
  })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" => Ok(true),
    "0" | "false" | "no" => Ok(false),
    _ => Err(ConfigError::Invalid {
      var,
      value: value.to_string(),
      reason: "expected true or false",
    }),
  }
}
