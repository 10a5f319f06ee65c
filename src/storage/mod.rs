//! Shopledger Storage
//!
//! This module provides the persisted state of the ledger:
//!
//! - **types**: Core data structures (Item, ItemId, DailyInvestment)
//! - **local**: File-backed key-value store, one file per key
//! - **engine**: The ledger store owning the item collection and investment slot
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! <data_dir>/shopItems.json   all items across all dates
//! <data_dir>/dailyData.json   {investment, date}
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use shopledger::storage::{LedgerStore, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = LedgerStore::open(StorageConfig::new("./data")).await?;
//!     println!("{}", store.stats().await);
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod error;
pub mod local;
pub mod types;

// Re-export commonly used types
pub use engine::{LedgerStore, StorageConfig, StoreStats};
pub use error::{StorageError, StorageResult};
pub use local::{LocalStore, INVESTMENT_KEY, ITEMS_KEY};
pub use types::{DailyInvestment, Item, ItemFields, ItemId};
