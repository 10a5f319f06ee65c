//! Shopledger API Server
//!
//! Run with: cargo run --bin shopledger-api
//!
//! # Configuration
//!
//! Read from `SHOPLEDGER_CONFIG` or the first config file found (see
//! `shopledger config`), then overridden by environment variables:
//! - `SHOPLEDGER_DATA_DIR`: Data directory
//! - `SHOPLEDGER_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `SHOPLEDGER_API_PORT`: Port to listen on (default: 8090)
//! - `SHOPLEDGER_CURRENCY`: Currency label in reports (default: Rs.)
//! - `SHOPLEDGER_LOG_LEVEL`, `SHOPLEDGER_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter, wins over the above

use anyhow::Context;
use shopledger::api::{serve, ApiConfig, AppState};
use shopledger::clock::SystemClock;
use shopledger::config::Config;
use shopledger::storage::LedgerStore;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var_os("SHOPLEDGER_CONFIG") {
        Some(path) => Config::load_with_env(Path::new(&path))
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::load_default(),
    };

    shopledger::logging::init_tracing(&config.logging, &["tower_http=debug"]);

    tracing::info!("Starting Shopledger API server v{}", env!("CARGO_PKG_VERSION"));

    let storage_config = config.storage.to_store_config();
    tracing::info!("Data directory: {:?}", storage_config.data_dir);

    let store = Arc::new(
        LedgerStore::open(storage_config)
            .await
            .context("Failed to open ledger store")?,
    );
    tracing::info!("Ledger store ready: {}", store.stats().await);

    let clock = Arc::new(SystemClock::new(config.shop.local_dates));
    let api_config = ApiConfig::from_config(&config);

    let state = AppState::new(Arc::clone(&store), clock, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Shopledger API server stopped");
    Ok(())
}
