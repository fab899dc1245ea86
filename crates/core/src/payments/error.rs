//! Payment error types.

use rust_decimal::Decimal;
use stockbook_shared::AppError;
use stockbook_shared::types::OrderId;
use thiserror::Error;

/// Errors raised when a payment is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Payment amount is zero or negative.
    #[error("Payment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Manual payment without a description.
    #[error("Manual payments require a description")]
    MissingDescription,

    /// Payment would exceed what is left to pay in its category.
    #[error("Payment of {attempted} exceeds remaining balance of {remaining}")]
    Overpayment {
        /// Attempted amount in pivot currency.
        attempted: Decimal,
        /// Remaining category balance in pivot currency.
        remaining: Decimal,
    },

    /// Payment references an order that is not available.
    #[error("Order {0} not found")]
    UnknownOrder(OrderId),
}

impl PaymentError {
    /// Returns the error code for user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::UnknownOrder(_) => "UNKNOWN_ORDER",
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Overpayment { attempted, remaining } => Self::Overpayment { attempted, remaining },
            PaymentError::UnknownOrder(_) => Self::StaleReference(err.to_string()),
            PaymentError::NonPositiveAmount(_) | PaymentError::MissingDescription => {
                Self::Validation(err.to_string())
            }
        }
    }
}
