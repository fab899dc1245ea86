//! Payment reconciliation against order categories.
//!
//! This module implements:
//! - Payment records and their category labels
//! - Category totals and paid-so-far sums in pivot currency
//! - Overpayment and manual payment validation
//! - Open balance listings

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::PaymentError;
pub use service::{OpenBalance, PaymentReconciler};
pub use types::{PayableOrder, Payment, PaymentCategory};
