use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, TelemetryConfig};

/// Initialize logging.
///
/// `RUST_LOG` overrides the configured level. When telemetry is enabled,
/// logs append to the configured file; otherwise they go to stderr so stdout
/// stays clean for the rendered transcript.
///
/// # Errors
/// Returns error if the log file or its parent directory cannot be created
pub fn init(config: &TelemetryConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    if !config.enabled {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(());
    }

    let log_path = Config::expand_path(&config.log_path)?;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_target(false)
        .with_ansi(false)
        .init();

    tracing::info!("telemetry initialized: {}", log_path.display());

    Ok(())
}
