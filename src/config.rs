//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ledger::DEFAULT_CURRENCY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub shop: ShopConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("shopledger").to_string_lossy().to_string())
        .unwrap_or_else(|| "./shopledger_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Runtime storage settings for the ledger store
    pub fn to_store_config(&self) -> crate::storage::StorageConfig {
        crate::storage::StorageConfig::new(expand_home(&self.data_dir))
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8090
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Shop settings
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    #[serde(default = "default_shop_name")]
    pub name: String,

    /// Label printed before amounts in reports
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Where `summary report` writes files (default: current directory)
    #[serde(default)]
    pub report_dir: Option<String>,

    /// Use the local calendar date for "today" instead of the UTC date
    #[serde(default)]
    pub local_dates: bool,
}

fn default_shop_name() -> String {
    "My Shop".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: default_shop_name(),
            currency: default_currency(),
            report_dir: None,
            local_dates: false,
        }
    }
}

impl ShopConfig {
    pub fn report_dir(&self) -> PathBuf {
        self.report_dir
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("shopledger").join("config.toml")),
            Some(PathBuf::from("/etc/shopledger/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = var("SHOPLEDGER_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(host) = var("SHOPLEDGER_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("SHOPLEDGER_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid SHOPLEDGER_API_PORT: {}", port),
            }
        }

        if let Some(currency) = var("SHOPLEDGER_CURRENCY") {
            self.shop.currency = currency;
        }

        if let Some(level) = var("SHOPLEDGER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("SHOPLEDGER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Shopledger Configuration
#
# Environment variables override these settings:
# - SHOPLEDGER_DATA_DIR
# - SHOPLEDGER_API_HOST
# - SHOPLEDGER_API_PORT
# - SHOPLEDGER_CURRENCY
# - SHOPLEDGER_LOG_LEVEL
# - SHOPLEDGER_LOG_FORMAT

[storage]
# Directory holding shopItems.json and dailyData.json
data_dir = "~/.local/share/shopledger"

[api]
# API server host
host = "127.0.0.1"

# API server port
port = 8090

[shop]
# Shop name shown by the CLI
name = "My Shop"

# Label printed before amounts in reports
currency = "Rs."

# Directory summary reports are written to (default: current directory)
# report_dir = "~/reports"

# Use the local calendar date for "today" (default: UTC date)
local_dates = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
