use serde::Deserialize;

use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_PORT};

/// ================================
/// Service-wide settings (optional YAML file)
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub order: OrderAmountConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { path: default_metrics_path(), is_enabled: false }
    }
}

/// Outbound calls to the payment provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    /// per-call timeout, applied to the token fetch and the API call separately
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// replaces the sandbox/live endpoint, e.g. a local mock
    pub base_url: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self { timeout_ms: default_timeout_ms(), base_url: None }
    }
}

/// Fixed amount attached to every created order
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderAmountConfig {
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    #[serde(default = "default_amount_value")]
    pub value: String,
}

impl Default for OrderAmountConfig {
    fn default() -> Self {
        Self { currency_code: default_currency_code(), value: default_amount_value() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// directory holding applepaystyle.css and the apple merchant association file
    #[serde(default = "default_assets_root")]
    pub root: String,
    #[serde(default = "default_public_dir")]
    pub public_dir: String,
    /// falls back to the embedded page when the file is absent
    #[serde(default = "default_checkout_template")]
    pub checkout_template: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_assets_root(),
            public_dir: default_public_dir(),
            checkout_template: default_checkout_template(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

impl LogFormat {
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "compact".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_amount_value() -> String {
    "100.00".to_string()
}

fn default_assets_root() -> String {
    ".".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_checkout_template() -> String {
    "views/checkout.html".to_string()
}
