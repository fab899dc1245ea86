//! Multi-currency handling through a single pivot currency.
//!
//! Every rate in a [`RateTable`] is quoted as units of the pivot currency per
//! one unit of the foreign currency, so any pair converts as
//! `amount * rate[from] / rate[to]`.

pub mod allocation;
pub mod conversion;
pub mod error;
pub mod rates;

#[cfg(test)]
mod props;

pub use allocation::allocate_proportionally;
pub use conversion::{CurrencyConverter, round_for_display};
pub use error::CurrencyError;
pub use rates::RateTable;
