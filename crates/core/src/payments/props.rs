//! Property-based tests for payment reconciliation.
//!
//! - Remaining balance plus paid equals the category total while unpaid
//! - Amounts up to the remaining balance pass, larger ones fail
//! - Re-saving a stored payment unchanged never trips the overpayment check

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use stockbook_shared::AccountingConfig;
use stockbook_shared::types::{BankAccountId, Currency, OrderId, PaymentId};
use uuid::Uuid;

use super::service::PaymentReconciler;
use super::types::{PayableOrder, Payment, PaymentCategory};
use crate::currency::RateTable;
use crate::inventory::PurchaseStatus;
use crate::inventory::fixtures::{line, product_id, purchase, warehouse};

/// Strategy for amounts in cents (0.01 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn products_payment(n: u128, order_id: OrderId, amount: Decimal) -> Payment {
    Payment {
        id: PaymentId::from_uuid(Uuid::from_u128(n)),
        order_id: Some(order_id),
        category: PaymentCategory::Products,
        bank_account_id: BankAccountId::from_uuid(Uuid::from_u128(900)),
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        amount,
        currency: Currency::Azn,
        exchange_rate: None,
        method: String::new(),
        description: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// remaining + paid == total whenever the order is not overpaid.
    #[test]
    fn prop_remaining_plus_paid_is_total(
        price in amount(),
        shares in prop::collection::vec(1u32..100, 0..5),
    ) {
        let rates = RateTable::pivot_only(Currency::Azn);
        let config = AccountingConfig::default();
        let reconciler = PaymentReconciler::new(&rates, &config);
        let order = purchase(warehouse(1), PurchaseStatus::Pending, vec![line(product_id(1), Decimal::ONE, price)]);

        // Split at most the whole price across the payments.
        let weight_sum: u32 = shares.iter().sum::<u32>().max(100);
        let payments: Vec<Payment> = shares
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let part = (price * Decimal::from(*w) / Decimal::from(weight_sum))
                    .round_dp_with_strategy(2, RoundingStrategy::ToZero);
                products_payment(i as u128 + 1, order.id, part)
            })
            .collect();

        let view = PayableOrder::from(&order);
        let paid = reconciler.paid_so_far(order.id, &PaymentCategory::Products, &payments, None);
        let remaining = reconciler.remaining_balance(view, &PaymentCategory::Products, &payments, None);
        prop_assert!(paid <= price);
        prop_assert_eq!(remaining + paid, price);
    }

    /// The overpayment check splits exactly at remaining + epsilon.
    #[test]
    fn prop_validation_threshold(remaining in amount(), attempted in amount()) {
        let rates = RateTable::pivot_only(Currency::Azn);
        let config = AccountingConfig::default();
        let reconciler = PaymentReconciler::new(&rates, &config);

        let result = reconciler.validate_payment(attempted, remaining);
        prop_assert_eq!(result.is_ok(), attempted <= remaining + config.payment_epsilon);
    }

    /// Saving a stored payment again is not counted twice.
    #[test]
    fn prop_unchanged_edit_validates(price in amount(), paid_cents in 1i64..100) {
        let rates = RateTable::pivot_only(Currency::Azn);
        let config = AccountingConfig::default();
        let reconciler = PaymentReconciler::new(&rates, &config);
        let order = purchase(warehouse(1), PurchaseStatus::Pending, vec![line(product_id(1), Decimal::ONE, price)]);

        let part = (price * Decimal::new(paid_cents, 2)).round_dp(2).max(Decimal::new(1, 2)).min(price);
        let stored = vec![products_payment(1, order.id, part)];

        let result = reconciler.validate_payment_draft(&stored[0], Some(PayableOrder::from(&order)), &stored);
        prop_assert!(result.is_ok());
    }
}
