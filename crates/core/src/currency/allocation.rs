//! Amount allocation using the Largest Remainder Method.
//!
//! Used to spread order-level fees over line items so that the shares sum
//! exactly to the rounded fee total (no cents lost).
//!
//! The Largest Remainder Method works by:
//! 1. Calculate exact allocations
//! 2. Round down each allocation
//! 3. Calculate the remainder (total - sum of rounded)
//! 4. Distribute remainder units to items with largest fractional parts

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocates a non-negative `total` proportionally to `weights`.
///
/// Negative weights count as zero. When no weight is positive the total is
/// split equally. The sum of the result always equals `total` rounded to
/// `decimal_places`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use stockbook_core::currency::allocate_proportionally;
///
/// let shares = allocate_proportionally(dec!(100), &[dec!(1), dec!(1), dec!(1)], 2);
/// assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
#[must_use]
pub fn allocate_proportionally(
    total: Decimal,
    weights: &[Decimal],
    decimal_places: u32,
) -> Vec<Decimal> {
    if weights.is_empty() {
        return vec![];
    }

    let weights: Vec<Decimal> = weights.iter().map(|w| (*w).max(Decimal::ZERO)).collect();
    let weight_sum: Decimal = weights.iter().copied().sum();
    let weights = if weight_sum.is_zero() {
        vec![Decimal::ONE; weights.len()]
    } else {
        weights
    };
    let weight_sum: Decimal = weights.iter().copied().sum();

    let unit = Decimal::new(1, decimal_places);

    // Round total to target precision first
    let total_rounded =
        total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);

    let exact: Vec<Decimal> = weights
        .iter()
        .map(|w| total_rounded * *w / weight_sum)
        .collect();

    let mut rounded: Vec<Decimal> = exact
        .iter()
        .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
        .collect();

    let sum_rounded: Decimal = rounded.iter().copied().sum();
    let remainder = total_rounded - sum_rounded;

    let units_to_distribute = (remainder / unit)
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_u64()
        .unwrap_or(0);
    let units_to_distribute = usize::try_from(units_to_distribute).unwrap_or(0);

    if units_to_distribute == 0 {
        return rounded;
    }

    let mut remainders: Vec<(usize, Decimal)> = exact
        .iter()
        .zip(rounded.iter())
        .enumerate()
        .map(|(i, (e, r))| (i, *e - *r))
        .collect();

    // Largest fraction first; earlier index wins ties.
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (idx, _) in remainders.iter().take(units_to_distribute) {
        rounded[*idx] += unit;
    }

    rounded
}
