//! Ledger store
//!
//! The single owner of the item collection and the investment slot:
//! - Reads: served from memory
//! - Writes: build the new state, persist it to the local store, then swap
//!   it in, all under one write lock
//!
//! Thread-safe via Tokio's async RwLock for concurrent access.

use crate::storage::error::StorageResult;
use crate::storage::local::{LocalStore, INVESTMENT_KEY, ITEMS_KEY};
use crate::storage::types::{DailyInvestment, Item, ItemFields, ItemId};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Configuration for the ledger store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per persisted key
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("shopledger_data"),
        }
    }
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

/// In-memory copy of everything persisted
#[derive(Debug, Default)]
struct LedgerState {
    items: Vec<Item>,
    investment: Option<DailyInvestment>,
    /// Highest id ever issued, so ids stay monotonic after deletes
    last_id: Option<ItemId>,
}

/// The ledger store shared by the registry and the daily summary
pub struct LedgerStore {
    local: LocalStore,
    state: RwLock<LedgerState>,
}

impl LedgerStore {
    /// Open the store, loading whatever is already persisted
    ///
    /// Malformed persisted text fails with a serialization error.
    pub async fn open(config: StorageConfig) -> StorageResult<Self> {
        let local = LocalStore::open(config.data_dir)?;

        let items: Vec<Item> = match local.get(ITEMS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        let investment: Option<DailyInvestment> = match local.get(INVESTMENT_KEY)? {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };

        let last_id = items.iter().filter_map(|i| i.id).max();

        tracing::info!(
            items = items.len(),
            has_investment = investment.is_some(),
            "Opened ledger store at {:?}",
            local.dir()
        );

        Ok(Self {
            local,
            state: RwLock::new(LedgerState {
                items,
                investment,
                last_id,
            }),
        })
    }

    /// All items across all dates, in stored order
    pub async fn items(&self) -> Vec<Item> {
        self.state.read().await.items.clone()
    }

    /// Items recorded on `date`, in stored order
    pub async fn items_on(&self, date: NaiveDate) -> Vec<Item> {
        let state = self.state.read().await;
        state
            .items
            .iter()
            .filter(|item| item.is_on(date))
            .cloned()
            .collect()
    }

    /// Look up a registry item by id
    pub async fn get(&self, id: ItemId) -> Option<Item> {
        let state = self.state.read().await;
        state.items.iter().find(|item| item.id == Some(id)).cloned()
    }

    /// Append `item` with a freshly issued id
    pub async fn append_new(&self, mut item: Item, now_millis: i64) -> StorageResult<Item> {
        let mut state = self.state.write().await;

        let id = ItemId::next(now_millis, state.last_id);
        item.id = Some(id);

        let mut items = state.items.clone();
        items.push(item.clone());
        self.persist_items(&items)?;

        state.items = items;
        state.last_id = Some(id);

        tracing::info!(id = %id, name = %item.item_name, "Added item");
        Ok(item)
    }

    /// Replace the editable fields of item `id` in place
    ///
    /// Returns `None` when no item has that id.
    pub async fn update(&self, id: ItemId, fields: ItemFields) -> StorageResult<Option<Item>> {
        let mut state = self.state.write().await;

        let Some(pos) = state.items.iter().position(|item| item.id == Some(id)) else {
            return Ok(None);
        };

        let mut items = state.items.clone();
        fields.apply_to(&mut items[pos]);
        self.persist_items(&items)?;

        let updated = items[pos].clone();
        state.items = items;

        tracing::info!(id = %id, "Updated item");
        Ok(Some(updated))
    }

    /// Remove item `id`, returning it if it existed
    pub async fn delete(&self, id: ItemId) -> StorageResult<Option<Item>> {
        let mut state = self.state.write().await;

        let Some(pos) = state.items.iter().position(|item| item.id == Some(id)) else {
            return Ok(None);
        };

        let mut items = state.items.clone();
        let removed = items.remove(pos);
        self.persist_items(&items)?;
        state.items = items;

        tracing::info!(id = %id, "Deleted item");
        Ok(Some(removed))
    }

    /// Append `new_items` to the items of `date`
    ///
    /// Items of every other date keep their relative order and come first;
    /// the items of `date` (existing ones, then `new_items`) are moved to the
    /// end. Returns the resulting items of `date`.
    pub async fn merge_day(
        &self,
        date: NaiveDate,
        new_items: Vec<Item>,
    ) -> StorageResult<Vec<Item>> {
        let mut state = self.state.write().await;

        let (mut day, others): (Vec<Item>, Vec<Item>) =
            state.items.iter().cloned().partition(|item| item.is_on(date));
        day.extend(new_items);

        let mut items = others;
        items.extend(day.iter().cloned());
        self.persist_items(&items)?;
        state.items = items;

        tracing::debug!(date = %date, day_items = day.len(), "Merged day into item collection");
        Ok(day)
    }

    /// Drop the whole item collection
    pub async fn clear_items(&self) -> StorageResult<()> {
        let mut state = self.state.write().await;
        self.local.remove(ITEMS_KEY)?;
        state.items.clear();

        tracing::info!("Cleared item collection");
        Ok(())
    }

    /// The persisted investment record, whatever its date
    pub async fn investment(&self) -> Option<DailyInvestment> {
        self.state.read().await.investment
    }

    /// The investment figure if it was saved for `date`
    pub async fn investment_on(&self, date: NaiveDate) -> Option<f64> {
        self.state
            .read()
            .await
            .investment
            .and_then(|inv| inv.value_on(date))
    }

    /// Overwrite the singleton investment record
    pub async fn set_investment(&self, record: DailyInvestment) -> StorageResult<()> {
        let mut state = self.state.write().await;

        let raw = serde_json::to_string(&record)?;
        self.local.set(INVESTMENT_KEY, &raw)?;

        if let Some(previous) = state.investment {
            if previous.date != record.date {
                tracing::debug!(
                    previous_date = %previous.date,
                    "Replacing investment saved for another date"
                );
            }
        }
        state.investment = Some(record);

        tracing::info!(date = %record.date, investment = record.investment, "Saved investment");
        Ok(())
    }

    pub async fn clear_investment(&self) -> StorageResult<()> {
        let mut state = self.state.write().await;
        self.local.remove(INVESTMENT_KEY)?;
        state.investment = None;
        Ok(())
    }

    /// Remove the investment record and every item of every date
    pub async fn reset_all(&self) -> StorageResult<()> {
        let mut state = self.state.write().await;
        self.local.remove(ITEMS_KEY)?;
        state.items.clear();
        self.local.remove(INVESTMENT_KEY)?;
        state.investment = None;

        tracing::info!("Reset all ledger data");
        Ok(())
    }

    /// Get store statistics
    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        let days: HashSet<NaiveDate> = state.items.iter().map(|item| item.date).collect();

        StoreStats {
            item_count: state.items.len(),
            day_count: days.len(),
            investment_date: state.investment.map(|inv| inv.date),
        }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        self.local.dir()
    }

    fn persist_items(&self, items: &[Item]) -> StorageResult<()> {
        let raw = serde_json::to_string(items)?;
        self.local.set(ITEMS_KEY, &raw)
    }
}

/// Store statistics
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub item_count: usize,
    pub day_count: usize,
    pub investment_date: Option<NaiveDate>,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Items: {}, Days: {}, Investment: {}",
            self.item_count,
            self.day_count,
            self.investment_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".to_string())
        )
    }
}
