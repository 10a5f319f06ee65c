//! Ledger error types

use crate::storage::{ItemId, StorageError};
use thiserror::Error;

/// A form field failed validation; the operation changed nothing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please fill in all fields: {0} is required")]
    MissingField(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    NotNumeric { field: &'static str, value: String },

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("quantity must be a positive whole number")]
    NonPositiveQuantity,
}

/// Errors returned by the registry and the daily summary
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Save requested with no edit session open
    #[error("No item is being edited")]
    NotEditing,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::MissingField("item name");
        assert_eq!(err.to_string(), "Please fill in all fields: item name is required");

        let err = ValidationError::NotNumeric {
            field: "quantity",
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a number, got \"ten\"");

        let err = LedgerError::ItemNotFound(ItemId(42));
        assert_eq!(err.to_string(), "Item not found: 42");
    }
}
