//! Bank account statements with running balances.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::BankError;
pub use service::BankLedger;
pub use types::{AccountStatement, BankAccount, EntryKind, LedgerTransactionId, RunningBalances, StatementLine};
