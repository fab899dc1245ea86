//! Property-based tests for currency operations.
//!
//! - Conversion identity: same-currency conversion is exact
//! - Conversion round-trip: A → B → A returns the original within tolerance
//! - Allocation sum invariant

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stockbook_shared::types::Currency;

use super::allocation::allocate_proportionally;
use super::conversion::CurrencyConverter;
use super::rates::RateTable;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 1000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy to generate a rate for every supported currency.
fn full_rate_table() -> impl Strategy<Value = RateTable> {
    prop::collection::vec(positive_rate(), Currency::ALL.len()).prop_map(|rates| {
        let quoted = Currency::ALL
            .into_iter()
            .zip(rates)
            .filter(|(c, _)| *c != Currency::Azn);
        RateTable::new(Currency::Azn, quoted).expect("strategy only yields positive rates")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting into the same currency returns the input exactly.
    #[test]
    fn prop_conversion_identity(
        amount in positive_amount(),
        code in currency(),
        table in full_rate_table(),
    ) {
        let converter = CurrencyConverter::new(&table);
        prop_assert_eq!(converter.convert(amount, code, code), amount);
    }

    /// A → B → A stays within a tiny tolerance of the original.
    #[test]
    fn prop_conversion_round_trip(
        amount in positive_amount(),
        from in currency(),
        to in currency(),
        table in full_rate_table(),
    ) {
        let converter = CurrencyConverter::new(&table);
        let there = converter.try_convert(amount, from, to).unwrap();
        let back = converter.try_convert(there, to, from).unwrap();
        let diff = (back - amount).abs();
        prop_assert!(
            diff <= dec!(0.000001),
            "round trip drifted: {} -> {} -> {}",
            amount, there, back
        );
    }

    /// Positive amounts stay positive after conversion.
    #[test]
    fn prop_positive_inputs_positive_output(
        amount in positive_amount(),
        from in currency(),
        to in currency(),
        table in full_rate_table(),
    ) {
        let converter = CurrencyConverter::new(&table);
        prop_assert!(converter.convert(amount, from, to) > Decimal::ZERO);
    }

    /// A missing rate never changes the amount.
    #[test]
    fn prop_missing_rate_returns_original(
        amount in positive_amount(),
    ) {
        let table = RateTable::pivot_only(Currency::Azn);
        let converter = CurrencyConverter::new(&table);
        prop_assert_eq!(converter.convert(amount, Currency::Usd, Currency::Azn), amount);
        prop_assert!(converter.try_convert(amount, Currency::Usd, Currency::Azn).is_err());
    }

    /// Proportional shares always sum to the rounded total.
    #[test]
    fn prop_allocation_sum_invariant(
        total in positive_amount(),
        weights in prop::collection::vec(0i64..1_000_000i64, 1..12),
    ) {
        let weights: Vec<Decimal> = weights.into_iter().map(|w| Decimal::new(w, 2)).collect();
        let shares = allocate_proportionally(total, &weights, 2);
        prop_assert_eq!(shares.len(), weights.len());
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), total);
        prop_assert!(shares.iter().all(|s| *s >= Decimal::ZERO));
    }
}
