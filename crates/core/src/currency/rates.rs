//! Rate table quoted against the pivot currency.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::Currency;

use super::error::CurrencyError;

/// Units of pivot currency per one unit of each active currency.
///
/// Invariants: the pivot's own rate is exactly 1 and every rate is positive.
/// Both are enforced on construction, including deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RateTableRecord", into = "RateTableRecord")]
pub struct RateTable {
    pivot: Currency,
    rates: BTreeMap<Currency, Decimal>,
}

/// Wire form of a [`RateTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTableRecord {
    /// The pivot currency.
    pub pivot: Currency,
    /// Rates keyed by currency code.
    #[serde(default)]
    pub rates: BTreeMap<Currency, Decimal>,
}

impl RateTable {
    /// Builds a validated rate table.
    ///
    /// The pivot rate is inserted when absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRate` for a non-positive rate and `PivotRateNotOne`
    /// when the pivot is quoted at anything but 1.
    pub fn new(
        pivot: Currency,
        rates: impl IntoIterator<Item = (Currency, Decimal)>,
    ) -> Result<Self, CurrencyError> {
        let mut table = BTreeMap::new();
        for (currency, rate) in rates {
            if rate <= Decimal::ZERO {
                return Err(CurrencyError::InvalidRate { currency, rate });
            }
            if currency == pivot && rate != Decimal::ONE {
                return Err(CurrencyError::PivotRateNotOne {
                    currency,
                    rate,
                });
            }
            table.insert(currency, rate);
        }
        table.insert(pivot, Decimal::ONE);

        Ok(Self {
            pivot,
            rates: table,
        })
    }

    /// A table containing only the pivot currency.
    #[must_use]
    pub fn pivot_only(pivot: Currency) -> Self {
        Self {
            pivot,
            rates: BTreeMap::from([(pivot, Decimal::ONE)]),
        }
    }

    /// The pivot currency.
    #[must_use]
    pub const fn pivot(&self) -> Currency {
        self.pivot
    }

    /// Rate of `currency` in pivot units, if active.
    #[must_use]
    pub fn rate(&self, currency: Currency) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    /// Like [`rate`](Self::rate) but failing with `MissingRate`.
    pub fn require(&self, currency: Currency) -> Result<Decimal, CurrencyError> {
        self.rate(currency)
            .ok_or(CurrencyError::MissingRate { currency })
    }

    /// Iterates over active currencies and their rates.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }
}

impl TryFrom<RateTableRecord> for RateTable {
    type Error = CurrencyError;

    fn try_from(record: RateTableRecord) -> Result<Self, Self::Error> {
        Self::new(record.pivot, record.rates)
    }
}

impl From<RateTable> for RateTableRecord {
    fn from(table: RateTable) -> Self {
        Self {
            pivot: table.pivot,
            rates: table.rates,
        }
    }
}
