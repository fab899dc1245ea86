//! Application-wide error types.
//!
//! Every engine error converts into one of these categories. None of them is
//! fatal to the process: the caller surfaces a message and refuses the
//! specific mutation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::Currency;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A currency is absent from the rate table.
    #[error("Missing exchange rate for {currency}")]
    MissingRate {
        /// The currency with no rate.
        currency: Currency,
    },

    /// A payment would exceed the remaining balance of its category.
    #[error("Payment of {attempted} exceeds remaining balance of {remaining}")]
    Overpayment {
        /// Attempted amount in pivot currency.
        attempted: Decimal,
        /// Remaining category balance in pivot currency.
        remaining: Decimal,
    },

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A historical record references an entity that no longer exists.
    #[error("Stale reference: {0}")]
    StaleReference(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingRate { .. } => "MISSING_RATE",
            Self::Overpayment { .. } => "OVERPAYMENT",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::StaleReference(_) => "STALE_REFERENCE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller can recover by correcting its input.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Internal(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
