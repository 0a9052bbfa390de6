//! Configuration types for exmo-indicator

use crate::exchange::{ExmoConfig, EXMO_API_URL};
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// EXMO API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; unset means no client-side deadline
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    EXMO_API_URL.to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ExchangeConfig {
    /// Client configuration for these settings
    pub fn client_config(&self) -> ExmoConfig {
        let config = ExmoConfig::new(&self.base_url);
        match self.timeout_secs {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Defaults for the `indicators` command
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorConfig {
    #[serde(default = "default_pair")]
    pub pair: String,
    /// Candle resolution in minutes
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Moving average window
    #[serde(default = "default_period")]
    pub period: usize,
    /// How far back the requested range starts
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
}

fn default_pair() -> String {
    "BTC_USD".to_string()
}
fn default_resolution() -> u32 {
    30
}
fn default_period() -> usize {
    5
}
fn default_lookback_days() -> i64 {
    2
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            pair: default_pair(),
            resolution: default_resolution(),
            period: default_period(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
