//! Core data types for the ledger store
//!
//! - `Item`: one inventory/sale entry
//! - `ItemId`: time-based identifier assigned by the registry
//! - `ItemFields`: the editable fields of an item
//! - `DailyInvestment`: the singleton investment record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a registry-created item
///
/// Milliseconds since the Unix epoch at creation, bumped forward when two
/// items are created within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ItemId {
    /// Next id after `last`, never lower than `now_millis`
    pub fn next(now_millis: i64, last: Option<ItemId>) -> Self {
        match last {
            Some(ItemId(prev)) if prev >= now_millis => ItemId(prev.saturating_add(1)),
            _ => ItemId(now_millis),
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// A single inventory/sale entry
///
/// Serialized with camelCase keys; `id` is omitted for items entered
/// through the daily summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    pub item_name: String,
    pub cost_price: f64,
    pub sell_price: f64,
    pub quantity: u32,
    /// Calendar date the item was recorded on; never changes
    pub date: NaiveDate,
}

impl Item {
    /// costPrice × quantity
    pub fn line_cost(&self) -> f64 {
        self.cost_price * self.quantity as f64
    }

    /// sellPrice × quantity
    pub fn line_sales(&self) -> f64 {
        self.sell_price * self.quantity as f64
    }

    pub fn line_profit(&self) -> f64 {
        self.line_sales() - self.line_cost()
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// The editable part of an item: everything except id and date
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub item_name: String,
    pub cost_price: f64,
    pub sell_price: f64,
    pub quantity: u32,
}

impl ItemFields {
    /// Build an item dated `date` with no id
    pub fn into_item(self, date: NaiveDate) -> Item {
        Item {
            id: None,
            item_name: self.item_name,
            cost_price: self.cost_price,
            sell_price: self.sell_price,
            quantity: self.quantity,
            date,
        }
    }

    /// Overwrite the editable fields of `item`, keeping its id and date
    pub fn apply_to(self, item: &mut Item) {
        item.item_name = self.item_name;
        item.cost_price = self.cost_price;
        item.sell_price = self.sell_price;
        item.quantity = self.quantity;
    }
}

/// The one persisted investment figure and the date it was saved for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyInvestment {
    pub investment: f64,
    pub date: NaiveDate,
}

impl DailyInvestment {
    pub fn new(investment: f64, date: NaiveDate) -> Self {
        Self { investment, date }
    }

    /// The figure, only if it was saved for `date`
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        (self.date == date).then_some(self.investment)
    }
}
