//! Daily summary report
//!
//! Plain-text document with the aggregate block followed by one line per
//! item, saved as `Summary-<date>.txt`.

use crate::ledger::totals::DailyTotals;
use crate::storage::Item;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Currency label used when none is configured
pub const DEFAULT_CURRENCY: &str = "Rs.";

/// A rendered report and the file name it should be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub filename: String,
    pub content: String,
}

impl Report {
    pub fn render(date: NaiveDate, items: &[Item], totals: &DailyTotals, currency: &str) -> Self {
        Self {
            filename: report_filename(date),
            content: render_report(date, items, totals, currency),
        }
    }

    /// Write the report into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        tracing::info!(path = ?path, "Wrote summary report");
        Ok(path)
    }
}

pub fn report_filename(date: NaiveDate) -> String {
    format!("Summary-{}.txt", date.format("%Y-%m-%d"))
}

/// Render the report text; the result has no leading or trailing whitespace
pub fn render_report(
    date: NaiveDate,
    items: &[Item],
    totals: &DailyTotals,
    currency: &str,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "📅 Daily Summary Report - {}", date.format("%Y-%m-%d"));
    let _ = writeln!(out);
    let _ = writeln!(out, "🛒 Items Sold: {} item(s)", totals.total_units);
    let _ = writeln!(out, "💰 Investment: {} {}", currency, amount(totals.investment));
    let _ = writeln!(out, "🧾 Total Cost: {} {}", currency, amount(totals.total_cost));
    let _ = writeln!(out, "💵 Total Sales: {} {}", currency, amount(totals.total_sales));
    let _ = writeln!(out, "📈 Total Profit: {} {}", currency, amount(totals.total_profit));
    let _ = writeln!(out);
    let _ = writeln!(out, "🏦 Final Balance: {} {}", currency, amount(totals.final_balance));
    let _ = writeln!(out);
    let _ = writeln!(out, "🗜️ Item List:");

    for item in items {
        let _ = writeln!(
            out,
            "- {}: {cur}{} × {} = {cur}{} (Profit: {cur}{})",
            item.item_name,
            amount(item.sell_price),
            item.quantity,
            amount(item.line_sales()),
            amount(item.line_profit()),
            cur = currency,
        );
    }

    out.trim().to_string()
}

/// Two-decimal amount
///
/// Exact ties round away from zero, and any negative value keeps its sign
/// even when it rounds to zero (`-0.001` prints `-0.00`, `-0.0` prints
/// `0.00`).
pub fn amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };

    // The exact binary value, so only true ties take the midpoint rule
    match Decimal::from_f64_retain(value.abs()) {
        Some(magnitude) => {
            let rounded =
                magnitude.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{}{:.2}", sign, rounded)
        }
        None => format!("{:.2}", value),
    }
}
