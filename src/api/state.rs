//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::clock::Clock;
use crate::ledger::{DailySummary, ItemRegistry, DEFAULT_CURRENCY};
use crate::storage::LedgerStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The ledger store both views go through
    pub store: Arc<LedgerStore>,
    /// Source of "today"
    pub clock: Arc<dyn Clock>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<LedgerStore>, clock: Arc<dyn Clock>, config: ApiConfig) -> Self {
        Self {
            store,
            clock,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// A registry view for one request
    pub fn registry(&self) -> ItemRegistry {
        ItemRegistry::new(Arc::clone(&self.store), Arc::clone(&self.clock))
    }

    /// A freshly loaded summary view for one request
    pub async fn summary(&self) -> DailySummary {
        DailySummary::load(Arc::clone(&self.store), Arc::clone(&self.clock)).await
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Currency label used in downloaded reports
    pub currency: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8090,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Build from the loaded configuration file
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            host: config.api.host.clone(),
            port: config.api.port,
            currency: config.shop.currency.clone(),
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
