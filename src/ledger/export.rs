//! Full-collection export as CSV or JSON.

use std::fmt;
use std::str::FromStr;

use crate::storage::Item;

/// Output format for [`export_items`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unknown export format: {0} (expected csv or json)")]
    UnknownFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export is not valid UTF-8")]
    Utf8,
}

const CSV_HEADER: [&str; 6] = ["id", "itemName", "costPrice", "sellPrice", "quantity", "date"];

/// Render every item in `format`
pub fn export_items(items: &[Item], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => format_csv(items),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(items)?),
    }
}

fn format_csv(items: &[Item]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for item in items {
        // Items added through the summary have no id; the cell stays empty
        let id = item.id.map(|id| id.to_string()).unwrap_or_default();
        writer.write_record([
            id,
            item.item_name.clone(),
            item.cost_price.to_string(),
            item.sell_price.to_string(),
            item.quantity.to_string(),
            item.date.format("%Y-%m-%d").to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Utf8)
}
