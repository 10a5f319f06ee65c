//! Data Transfer Objects
//!
//! Request and response types for the API endpoints. Field names follow the
//! persisted records (camelCase).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::{DailyTotals, ItemForm};
use crate::storage::Item;

// ============================================
// FORM DTOs
// ============================================

/// A form field sent either as a JSON string or a JSON number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

fn text(value: Option<FieldValue>) -> String {
    value.map(FieldValue::into_text).unwrap_or_default()
}

/// Item add/edit request; missing fields count as empty
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[serde(default)]
    pub item_name: Option<FieldValue>,
    #[serde(default)]
    pub cost_price: Option<FieldValue>,
    #[serde(default)]
    pub sell_price: Option<FieldValue>,
    #[serde(default)]
    pub quantity: Option<FieldValue>,
}

impl From<ItemRequest> for ItemForm {
    fn from(req: ItemRequest) -> Self {
        ItemForm {
            item_name: text(req.item_name),
            cost_price: text(req.cost_price),
            sell_price: text(req.sell_price),
            quantity: text(req.quantity),
        }
    }
}

/// Investment request
#[derive(Debug, Deserialize)]
pub struct InvestmentRequest {
    #[serde(default)]
    pub investment: Option<FieldValue>,
}

impl InvestmentRequest {
    pub fn into_text(self) -> String {
        text(self.investment)
    }
}

/// Query string of destructive endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Query string of the export endpoint
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

// ============================================
// RESPONSE DTOs
// ============================================

/// One row of the daily summary table
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    #[serde(flatten)]
    pub item: Item,
    pub line_cost: f64,
    pub line_sales: f64,
    pub line_profit: f64,
}

impl From<&Item> for SummaryRow {
    fn from(item: &Item) -> Self {
        Self {
            item: item.clone(),
            line_cost: item.line_cost(),
            line_sales: item.line_sales(),
            line_profit: item.line_profit(),
        }
    }
}

/// Daily summary response
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub date: NaiveDate,
    /// Today's investment, null when none was saved today
    pub investment: Option<f64>,
    pub items: Vec<SummaryRow>,
    pub totals: DailyTotals,
}

/// Investment response
#[derive(Debug, Serialize)]
pub struct InvestmentResponse {
    pub date: NaiveDate,
    /// null when the request was empty and nothing was saved
    pub investment: Option<f64>,
}

/// Reset response
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: String,
}

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub item_count: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
