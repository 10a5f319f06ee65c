//! Shopledger views
//!
//! The two views over the ledger store:
//!
//! - **registry**: add/edit/delete over every item
//! - **summary**: today's items, investment, totals and report
//! - **export**: the whole collection as CSV or JSON
//!
//! Both read and write through the same `LedgerStore`, so neither works
//! from a stale copy of the other's changes.
//!
//! # Example
//!
//! ```rust,no_run
//! use shopledger::clock::SystemClock;
//! use shopledger::ledger::{DailySummary, ItemForm, ItemRegistry};
//! use shopledger::storage::{LedgerStore, StorageConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(LedgerStore::open(StorageConfig::new("./data")).await?);
//!     let clock = Arc::new(SystemClock::default());
//!
//!     let registry = ItemRegistry::new(Arc::clone(&store), clock.clone());
//!     registry.add(&ItemForm::new("Pen", "5", "8", "10")).await?;
//!
//!     let mut summary = DailySummary::load(store, clock).await;
//!     summary.set_investment("1000").await?;
//!     println!("{}", summary.report("Rs.").content);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod form;
pub mod registry;
pub mod report;
pub mod summary;
pub mod totals;

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use export::{export_items, ExportError, ExportFormat};
pub use form::ItemForm;
pub use registry::{EditSession, ItemRegistry, RowState, REGISTRY_RESET_PROMPT};
pub use report::{render_report, report_filename, Report, DEFAULT_CURRENCY};
pub use summary::{DailySummary, SUMMARY_RESET_PROMPT};
pub use totals::DailyTotals;
