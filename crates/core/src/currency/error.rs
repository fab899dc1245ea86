//! Currency error types.

use rust_decimal::Decimal;
use stockbook_shared::AppError;
use stockbook_shared::types::Currency;
use thiserror::Error;

/// Errors raised while building rate tables or converting amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Currency is absent from the rate table.
    #[error("No exchange rate for {currency}")]
    MissingRate {
        /// The currency with no rate.
        currency: Currency,
    },

    /// Rate is zero or negative.
    #[error("Exchange rate for {currency} must be positive, got {rate}")]
    InvalidRate {
        /// The currency carrying the bad rate.
        currency: Currency,
        /// The rejected rate.
        rate: Decimal,
    },

    /// The pivot currency was given a rate other than one.
    #[error("Pivot currency {currency} must have rate 1, got {rate}")]
    PivotRateNotOne {
        /// The pivot currency.
        currency: Currency,
        /// The rejected rate.
        rate: Decimal,
    },
}

impl CurrencyError {
    /// Returns the error code for user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRate { .. } => "MISSING_RATE",
            Self::InvalidRate { .. } => "INVALID_RATE",
            Self::PivotRateNotOne { .. } => "PIVOT_RATE_NOT_ONE",
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::MissingRate { currency } => Self::MissingRate { currency },
            other => Self::Validation(other.to_string()),
        }
    }
}
