//! Daily totals
//!
//! Derived figures over a list of items and an optional investment. Always
//! recomputed from the items; nothing here is stored.

use crate::storage::Item;
use serde::Serialize;

/// Aggregate figures for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    /// Investment for the day, 0 when unset
    pub investment: f64,
    /// Σ costPrice × quantity
    pub total_cost: f64,
    /// Σ sellPrice × quantity
    pub total_sales: f64,
    /// total_sales − total_cost
    pub total_profit: f64,
    /// Σ quantity
    pub total_units: u64,
    /// investment + total_profit
    pub final_balance: f64,
}

impl DailyTotals {
    pub fn compute(items: &[Item], investment: Option<f64>) -> Self {
        let investment = investment.unwrap_or(0.0);
        let total_cost: f64 = items.iter().map(Item::line_cost).sum();
        let total_sales: f64 = items.iter().map(Item::line_sales).sum();
        let total_units: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
        let total_profit = total_sales - total_cost;

        Self {
            investment,
            total_cost,
            total_sales,
            total_profit,
            total_units,
            final_balance: investment + total_profit,
        }
    }
}
