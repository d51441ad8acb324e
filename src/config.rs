use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"[api]
base_url = "https://cf-reader.pdwittig.workers.dev"
timeout_secs = 30

[telemetry]
enabled = false
level = "info"
log_path = "~/.word-reader/word-reader.log"
"#;

/// Top-level configuration, loaded from `~/.word-reader.toml`
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Word API settings
    pub api: ApiConfig,
    /// Logging settings
    pub telemetry: TelemetryConfig,
}

/// Word API settings
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the word service; `/` serves the count, `/words/{i}` the words
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging settings
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    /// Log to `log_path` instead of stderr
    pub enabled: bool,
    /// Default log level when `RUST_LOG` is unset
    pub level: String,
    /// Log file location, `~` expanded
    pub log_path: String,
}

impl Config {
    /// Load config from `~/.word-reader.toml`, creating it with defaults first
    ///
    /// # Errors
    /// Returns error if the file cannot be read, written, or parsed
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .context("failed to write default config")?;
        }

        let contents = fs::read_to_string(&config_path)
            .context("failed to read config file")?;

        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config TOML")
    }

    fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".word-reader.toml"))
    }

    /// Expand `~` in paths to home directory
    ///
    /// # Errors
    /// Returns error if `HOME` is not set
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        if let Some(stripped) = path.strip_prefix("~/") {
            let home = std::env::var("HOME")
                .context("HOME environment variable not set")?;
            Ok(PathBuf::from(home).join(stripped))
        } else {
            Ok(PathBuf::from(path))
        }
    }
}
