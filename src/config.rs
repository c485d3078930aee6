//! Configuration types for movescan

use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Live feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Market-data gateway WebSocket endpoint
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Dataset to subscribe for the live session
    #[serde(default = "default_live_dataset")]
    pub dataset: String,
}

fn default_gateway_url() -> String {
    "ws://127.0.0.1:9100/stream".to_string()
}
fn default_live_dataset() -> String {
    "EQUS.MINI".to_string()
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            dataset: default_live_dataset(),
        }
    }
}

/// Historical reference-price source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    /// Bulk daily-OHLCV service base URL
    #[serde(default = "default_reference_url")]
    pub base_url: String,

    /// Dataset queried for prior-session closes
    #[serde(default = "default_reference_dataset")]
    pub dataset: String,

    /// Bearer token for the historical service, if it requires one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_reference_url() -> String {
    "http://127.0.0.1:9101".to_string()
}
fn default_reference_dataset() -> String {
    "EQUS.SUMMARY".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_reference_url(),
            dataset: default_reference_dataset(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Scan engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Minimum relative move to alert, as a fraction (0.03 = 3%).
    /// Strictly exceeded to trigger.
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
}

fn default_threshold() -> Decimal {
    Decimal::new(3, 2) // 0.03 = 3%
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_metrics_port() -> u16 {
    9090
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: default_metrics_port(),
            log_level: default_log_level(),
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
