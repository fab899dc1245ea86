//! Currency conversion logic.
//!
//! CRITICAL: No rounding happens here. Chained calculations keep full
//! precision; only display code calls [`round_for_display`].

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use stockbook_shared::types::Currency;
use tracing::warn;

use super::error::CurrencyError;
use super::rates::RateTable;

/// Converts amounts between currencies through the pivot currency.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter<'a> {
    rates: &'a RateTable,
}

impl<'a> CurrencyConverter<'a> {
    /// Creates a converter over a rate table snapshot.
    #[must_use]
    pub const fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// The rate table this converter reads.
    #[must_use]
    pub const fn rates(&self) -> &'a RateTable {
        self.rates
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Same-currency conversion returns `amount` unchanged, even when the
    /// currency has no rate.
    ///
    /// # Errors
    ///
    /// Returns `MissingRate` naming the first currency absent from the table.
    pub fn try_convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Result<Decimal, CurrencyError> {
        self.try_convert_with_rate(amount, from, to, None)
    }

    /// Converts `amount`, preferring a pinned `from → pivot` rate.
    ///
    /// `pinned_rate` is the rate recorded when the document was created; when
    /// present it replaces the live rate of `from`.
    pub fn try_convert_with_rate(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
        pinned_rate: Option<Decimal>,
    ) -> Result<Decimal, CurrencyError> {
        if from == to {
            return Ok(amount);
        }

        let from_rate = match pinned_rate {
            Some(rate) if rate > Decimal::ZERO => rate,
            _ => self.rates.require(from)?,
        };
        let to_rate = self.rates.require(to)?;

        let amount_in_pivot = amount * from_rate;
        Ok(amount_in_pivot / to_rate)
    }

    /// Converts `amount`, degrading to the unconverted amount on a missing rate.
    ///
    /// The failure is logged, never propagated.
    #[must_use]
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Decimal {
        self.convert_with_rate(amount, from, to, None)
    }

    /// Degrading variant of [`try_convert_with_rate`](Self::try_convert_with_rate).
    #[must_use]
    pub fn convert_with_rate(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
        pinned_rate: Option<Decimal>,
    ) -> Decimal {
        match self.try_convert_with_rate(amount, from, to, pinned_rate) {
            Ok(converted) => converted,
            Err(err) => {
                warn!(%amount, %from, %to, error = %err, "conversion fell back to unconverted amount");
                amount
            }
        }
    }

    /// Converts `amount` into the pivot currency, degrading on a missing rate.
    #[must_use]
    pub fn to_pivot(&self, amount: Decimal, from: Currency, pinned_rate: Option<Decimal>) -> Decimal {
        self.convert_with_rate(amount, from, self.rates.pivot(), pinned_rate)
    }
}

/// Rounds a value for display using Banker's Rounding.
///
/// - 2.5 → 2, 3.5 → 4
/// - 2.25 → 2.2, 2.35 → 2.4
#[must_use]
pub fn round_for_display(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}
