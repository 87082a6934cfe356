//! Tracing setup for the trendwatch CLI
//!
//! Usage:
//!   trendwatch --debug serve          # Debug logging to console
//!   RUST_LOG=trendwatch=debug ...     # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console tracing. RUST_LOG wins when set; otherwise the
/// debug flag picks the default level.
pub fn init(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
