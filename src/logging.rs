//! Tracing subscriber set-up.
//!
//! Call [`init`] once at start-up, after the configuration is loaded.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if config.format == "json" {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.pretty().try_init()
    };

    installed.map_err(|e| anyhow!("failed to set tracing subscriber: {e}"))
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("tripplanner={level},tower_http={level},warn")))
        .map_err(|e| anyhow!("invalid log level '{level}': {e}"))
}
