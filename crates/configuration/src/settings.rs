use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty (or absent)
/// `dashboard.toml` still yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the transaction dataset lives.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    /// Path to the merged orders CSV.
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

/// Parameters shared by every dashboard tab.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_title")]
    pub title: String,
    /// How many categories (and cities) make it into the ranked views.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// How many bars the best/worst category charts show.
    #[serde(default = "default_chart_size")]
    pub chart_size: usize,
    /// ISO 4217 code used when formatting revenue.
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Parameters for the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,
    /// Set to `false` to log to stderr only.
    #[serde(default = "default_file_logging")]
    pub file: bool,
    /// Directory for the daily rolling log file.
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Config {
    /// Rejects settings that would make the ranked views meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dashboard = &self.dashboard;
        if dashboard.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.top_n must be at least 1".to_string(),
            ));
        }
        if dashboard.chart_size == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.chart_size must be at least 1".to_string(),
            ));
        }
        if dashboard.chart_size > dashboard.top_n {
            return Err(ConfigError::ValidationError(format!(
                "dashboard.chart_size ({}) cannot exceed dashboard.top_n ({})",
                dashboard.chart_size, dashboard.top_n
            )));
        }
        if dashboard.currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dashboard.currency must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    /// `host:port`, ready for `SocketAddr` parsing.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// --- Default Implementations ---

fn default_dataset_path() -> PathBuf {
    PathBuf::from("dashboard/all_data0.csv")
}
fn default_title() -> String {
    "E-Commerce Dashboard".to_string()
}
fn default_top_n() -> usize {
    10
}
fn default_chart_size() -> usize {
    5
}
fn default_currency() -> String {
    "IDR".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_level() -> String {
    "info".to_string()
}
fn default_file_logging() -> bool {
    true
}
fn default_log_directory() -> PathBuf {
    PathBuf::from("logs")
}
fn default_file_prefix() -> String {
    "storefront.log".to_string()
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            top_n: default_top_n(),
            chart_size: default_chart_size(),
            currency: default_currency(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_file_logging(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
        }
    }
}
