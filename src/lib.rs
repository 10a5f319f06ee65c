//! # Shopledger
//!
//! A small-shop ledger: record inventory items, track the day's investment and
//! produce a daily profit/loss summary with a downloadable text report.
//!
//! ## Features
//!
//! - **Item registry**: add, edit, delete and clear item records across all dates
//! - **Daily summary**: today's items, investment, totals and final balance
//! - **Reports**: plain-text `Summary-<date>.txt`
//! - **Durable state**: JSON files under one data directory, written atomically
//!
//! ## Modules
//!
//! - [`storage`]: The ledger store and its file-backed key-value layer
//! - [`ledger`]: Registry and summary views, validation, totals, reports
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shopledger::clock::SystemClock;
//! use shopledger::ledger::{DailySummary, ItemForm, ItemRegistry};
//! use shopledger::storage::{LedgerStore, StorageConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(LedgerStore::open(StorageConfig::default()).await?);
//!     let clock = Arc::new(SystemClock::default());
//!
//!     // Record a sale
//!     let registry = ItemRegistry::new(Arc::clone(&store), clock.clone());
//!     registry.add(&ItemForm::new("Pen", "5", "8", "10")).await?;
//!
//!     // Today's figures
//!     let summary = DailySummary::load(store, clock).await;
//!     let totals = summary.totals();
//!     println!("Profit today: {:.2}", totals.total_profit);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod clock;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod storage;

// Re-export top-level types for convenience
pub use storage::{
    DailyInvestment, Item, ItemId, LedgerStore, StorageConfig, StorageError, StorageResult,
    StoreStats,
};

pub use ledger::{
    DailySummary, DailyTotals, ItemForm, ItemRegistry, LedgerError, LedgerResult, Report,
    ValidationError,
};

pub use clock::{Clock, FixedClock, SystemClock};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};
