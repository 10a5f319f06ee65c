//! Daily Summary
//!
//! Today's items, today's investment and the totals derived from them.
//! Items entered here carry no id and are merged into the collection with
//! the rest of today's items.

use crate::clock::Clock;
use crate::ledger::error::LedgerResult;
use crate::ledger::form::{parse_amount, ItemForm};
use crate::ledger::report::Report;
use crate::ledger::totals::DailyTotals;
use crate::storage::{DailyInvestment, Item, LedgerStore};
use chrono::NaiveDate;
use std::sync::Arc;

/// Prompt shown before the summary wipes every item and the investment
pub const SUMMARY_RESET_PROMPT: &str = "Are you sure you want to reset all data?";

pub struct DailySummary {
    store: Arc<LedgerStore>,
    clock: Arc<dyn Clock>,
    date: NaiveDate,
    investment: Option<f64>,
    items: Vec<Item>,
}

impl DailySummary {
    /// Load today's view from the store
    ///
    /// A persisted investment is adopted only if it was saved for today.
    pub async fn load(store: Arc<LedgerStore>, clock: Arc<dyn Clock>) -> Self {
        let date = clock.today();
        let investment = store.investment_on(date).await;
        let items = store.items_on(date).await;

        tracing::debug!(date = %date, items = items.len(), "Loaded daily summary");

        Self {
            store,
            clock,
            date,
            investment,
            items,
        }
    }

    /// Reload from the store as if freshly opened
    pub async fn refresh(&mut self) {
        let date = self.clock.today();
        self.investment = self.store.investment_on(date).await;
        self.items = self.store.items_on(date).await;
        self.date = date;
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Today's items
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn investment(&self) -> Option<f64> {
        self.investment
    }

    /// Save today's investment from raw text
    ///
    /// Empty text is ignored and returns `None`; anything else must parse as
    /// a number and overwrites the persisted investment record.
    pub async fn set_investment(&mut self, raw: &str) -> LedgerResult<Option<f64>> {
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let value = parse_amount("investment", raw)?;
        self.store
            .set_investment(DailyInvestment::new(value, self.date))
            .await?;
        self.investment = Some(value);
        Ok(Some(value))
    }

    /// Validate `form` and add it to today's items
    pub async fn add_item(&mut self, form: &ItemForm) -> LedgerResult<Item> {
        let item = form.validate_trimmed()?.into_item(self.date);

        self.items = self.store.merge_day(self.date, vec![item.clone()]).await?;

        tracing::info!(name = %item.item_name, date = %self.date, "Added item from summary");
        Ok(item)
    }

    /// Add `form` and blank it on success; a rejected form keeps its text
    pub async fn submit(&mut self, form: &mut ItemForm) -> LedgerResult<Item> {
        let item = self.add_item(form).await?;
        form.clear();
        Ok(item)
    }

    /// Totals over today's items, recomputed on every call
    pub fn totals(&self) -> DailyTotals {
        DailyTotals::compute(&self.items, self.investment)
    }

    pub fn report(&self, currency: &str) -> Report {
        Report::render(self.date, &self.items, &self.totals(), currency)
    }

    /// Remove the investment and every item of every date if `confirm`
    /// accepts the prompt
    pub async fn reset_all<F>(&mut self, confirm: F) -> LedgerResult<bool>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(SUMMARY_RESET_PROMPT) {
            tracing::debug!("Summary reset declined");
            return Ok(false);
        }

        self.store.reset_all().await?;
        self.investment = None;
        self.items.clear();
        Ok(true)
    }
}
