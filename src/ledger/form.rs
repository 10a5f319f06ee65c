//! Item entry forms
//!
//! Fields arrive as raw text, the way they are typed, and are parsed into
//! `ItemFields` only when the form is submitted.

use crate::ledger::error::ValidationError;
use crate::storage::{Item, ItemFields};
use serde::{Deserialize, Serialize};

const NAME: &str = "item name";
const COST: &str = "cost price";
const SELL: &str = "sell price";
const QTY: &str = "quantity";

/// Raw text of the four item fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemForm {
    pub item_name: String,
    pub cost_price: String,
    pub sell_price: String,
    pub quantity: String,
}

impl ItemForm {
    pub fn new(
        item_name: impl Into<String>,
        cost_price: impl Into<String>,
        sell_price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            cost_price: cost_price.into(),
            sell_price: sell_price.into(),
            quantity: quantity.into(),
        }
    }

    /// Form prefilled from an existing item, for editing
    pub fn from_item(item: &Item) -> Self {
        Self {
            item_name: item.item_name.clone(),
            cost_price: item.cost_price.to_string(),
            sell_price: item.sell_price.to_string(),
            quantity: item.quantity.to_string(),
        }
    }

    /// Blank every field, as after a successful add
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Registry rules: every field non-empty; the name is stored as typed,
    /// whitespace included
    pub fn validate(&self) -> Result<ItemFields, ValidationError> {
        self.parse(self.item_name.clone())
    }

    /// Summary rules: the name must have text after trimming and is stored
    /// trimmed
    pub fn validate_trimmed(&self) -> Result<ItemFields, ValidationError> {
        self.parse(self.item_name.trim().to_string())
    }

    fn parse(&self, item_name: String) -> Result<ItemFields, ValidationError> {
        if item_name.is_empty() {
            return Err(ValidationError::MissingField(NAME));
        }

        let cost_price = parse_price(COST, &self.cost_price)?;
        let sell_price = parse_price(SELL, &self.sell_price)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(ItemFields {
            item_name,
            cost_price,
            sell_price,
            quantity,
        })
    }
}

fn required<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Parse a decimal amount; any finite number is accepted
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value = required(field, raw)?;
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::NotNumeric {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let price = parse_amount(field, raw)?;
    if price < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(price)
}

fn parse_quantity(raw: &str) -> Result<u32, ValidationError> {
    let value = required(QTY, raw)?;
    let qty: i64 = value.parse().map_err(|_| ValidationError::NotNumeric {
        field: QTY,
        value: value.to_string(),
    })?;

    match u32::try_from(qty) {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(ValidationError::NonPositiveQuantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_valid_form() {
        let fields = ItemForm::new("Pen", "5", "8.50", "10").validate().unwrap();
        assert_eq!(fields.item_name, "Pen");
        assert_eq!(fields.cost_price, 5.0);
        assert_eq!(fields.sell_price, 8.5);
        assert_eq!(fields.quantity, 10);
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            ItemForm::new("", "5", "8", "1").validate(),
            Err(ValidationError::MissingField("item name"))
        );
        assert_eq!(
            ItemForm::new("   ", "5", "8", "1").validate_trimmed(),
            Err(ValidationError::MissingField("item name"))
        );
        assert_eq!(
            ItemForm::new("Pen", "", "8", "1").validate(),
            Err(ValidationError::MissingField("cost price"))
        );
        assert_eq!(
            ItemForm::new("Pen", "5", "8", " ").validate(),
            Err(ValidationError::MissingField("quantity"))
        );
    }

    #[test]
    fn test_non_numeric_fields() {
        assert!(matches!(
            ItemForm::new("Pen", "5", "eight", "1").validate(),
            Err(ValidationError::NotNumeric { field: "sell price", .. })
        ));
        assert!(matches!(
            ItemForm::new("Pen", "5", "8", "ten").validate(),
            Err(ValidationError::NotNumeric { field: "quantity", .. })
        ));
        assert!(matches!(
            ItemForm::new("Pen", "5", "8", "2.5").validate(),
            Err(ValidationError::NotNumeric { field: "quantity", .. })
        ));
        assert!(matches!(
            ItemForm::new("Pen", "NaN", "8", "1").validate(),
            Err(ValidationError::NotNumeric { field: "cost price", .. })
        ));
    }

    #[test]
    fn test_range_checks() {
        assert_eq!(
            ItemForm::new("Pen", "-1", "8", "1").validate(),
            Err(ValidationError::Negative("cost price"))
        );
        assert_eq!(
            ItemForm::new("Pen", "1", "8", "0").validate(),
            Err(ValidationError::NonPositiveQuantity)
        );
        assert_eq!(
            ItemForm::new("Pen", "1", "8", "-4").validate(),
            Err(ValidationError::NonPositiveQuantity)
        );
        // Zero prices are allowed
        assert!(ItemForm::new("Free sample", "0", "0", "1").validate().is_ok());
    }

    #[test]
    fn test_registry_keeps_whitespace_only_name() {
        let fields = ItemForm::new("   ", "5", "8", "1").validate().unwrap();
        assert_eq!(fields.item_name, "   ");
    }

    #[test]
    fn test_trimmed_name() {
        let form = ItemForm::new("  Pen ", "5", "8", "1");
        assert_eq!(form.validate().unwrap().item_name, "  Pen ");
        assert_eq!(form.validate_trimmed().unwrap().item_name, "Pen");
    }

    #[test]
    fn test_prefill_from_item() {
        let item = Item {
            id: None,
            item_name: "Pen".to_string(),
            cost_price: 5.0,
            sell_price: 8.25,
            quantity: 10,
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        };
        let form = ItemForm::from_item(&item);
        assert_eq!(form, ItemForm::new("Pen", "5", "8.25", "10"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("investment", " 1000 "), Ok(1000.0));
        assert_eq!(parse_amount("investment", "-20.5"), Ok(-20.5));
        assert!(parse_amount("investment", "lots").is_err());
    }
}
