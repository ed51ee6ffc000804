//! Application logging functionality
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! single result line. The level comes from the `-v` count on the command
//! line, never from the environment.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter directive for a given number of `-v` flags
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(verbosity))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
