//! Inventory error types.

use rust_decimal::Decimal;
use stockbook_shared::AppError;
use stockbook_shared::types::{ProductId, WarehouseId};
use thiserror::Error;

/// Errors raised before any stock or cost mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Line quantity is zero or negative.
    #[error("Quantity for product {product_id} must be positive, got {quantity}")]
    NonPositiveQuantity {
        /// The product on the offending line.
        product_id: ProductId,
        /// The rejected quantity.
        quantity: Decimal,
    },

    /// Document has no lines.
    #[error("Document must have at least one line")]
    NoLines,

    /// Movement source and destination are the same warehouse.
    #[error("Movement source and destination are both warehouse {0}")]
    SameWarehouse(WarehouseId),

    /// Status change is not allowed.
    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },

    /// Not enough stock to complete the document without clamping.
    #[error(
        "Insufficient stock of product {product_id} in warehouse {warehouse_id}: available {available}, required {required}"
    )]
    InsufficientStock {
        /// The product short on stock.
        product_id: ProductId,
        /// The warehouse short on stock.
        warehouse_id: WarehouseId,
        /// Quantity on hand.
        available: Decimal,
        /// Quantity the document needs.
        required: Decimal,
    },
}

impl InventoryError {
    /// Returns the error code for user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveQuantity { .. } => "NON_POSITIVE_QUANTITY",
            Self::NoLines => "NO_LINES",
            Self::SameWarehouse(_) => "SAME_WAREHOUSE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        Self::Validation(err.to_string())
    }
}
