//! Accounting core for Stockbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every engine is a function of the records passed in and returns new
//! derived values; nothing is cached between calls.
//!
//! # Modules
//!
//! - `currency` - Conversion through a pivot currency and proportional allocation
//! - `inventory` - Stock levels and weighted-average landed cost
//! - `payments` - Per-category payment reconciliation against orders
//! - `bank` - Bank account statements with running balances

pub mod bank;
pub mod currency;
pub mod inventory;
pub mod payments;
