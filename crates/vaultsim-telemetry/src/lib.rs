//! Tracing setup shared by the executables

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global fmt subscriber
///
/// `RUST_LOG` wins when set, otherwise `default_filter` applies.
/// Logs go to stderr so stdout stays machine-readable.
pub fn init(service: &str, default_filter: &str) -> Result<()> {
  let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

  fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init()
    .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

  tracing::debug!(service, "telemetry initialised");
  Ok(())
}
