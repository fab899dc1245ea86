//! Bank ledger error types.

use stockbook_shared::AppError;
use thiserror::Error;

/// Errors raised when reading bank ledger identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// Transaction id is not `initial-`, `inc-` or `out-` followed by a UUID.
    #[error("Invalid ledger transaction id: {0}")]
    InvalidTransactionId(String),
}

impl BankError {
    /// Returns the error code for user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransactionId(_) => "INVALID_TRANSACTION_ID",
        }
    }
}

impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        Self::Validation(err.to_string())
    }
}
