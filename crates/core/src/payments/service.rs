//! Per-category payment reconciliation.
//!
//! Products and fees are independent sub-ledgers of an order: payments on
//! fees never reduce what is owed on products and vice versa. The per-fee
//! labels are views into the fees ledger, so a fee paid under one label
//! cannot be paid again under another. All amounts are compared in pivot
//! currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::AccountingConfig;
use stockbook_shared::types::{Money, OrderId, PaymentId};
use tracing::debug;

use super::error::PaymentError;
use super::types::{PayableOrder, Payment, PaymentCategory};
use crate::currency::{CurrencyConverter, RateTable};
use crate::inventory::sell_order_totals;

/// Remaining balance of one order category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenBalance {
    /// The order.
    pub order_id: OrderId,
    /// The sub-ledger.
    pub category: PaymentCategory,
    /// Category total in pivot currency.
    pub total: Decimal,
    /// Paid so far in pivot currency.
    pub paid: Decimal,
    /// Left to pay in pivot currency.
    pub remaining: Decimal,
}

/// Reconciles payments against order categories.
#[derive(Debug, Clone, Copy)]
pub struct PaymentReconciler<'a> {
    converter: CurrencyConverter<'a>,
    config: &'a AccountingConfig,
}

impl<'a> PaymentReconciler<'a> {
    /// Creates a reconciler over a rate table snapshot.
    #[must_use]
    pub const fn new(rates: &'a RateTable, config: &'a AccountingConfig) -> Self {
        Self {
            converter: CurrencyConverter::new(rates),
            config,
        }
    }

    /// Value of an order category in pivot currency.
    ///
    /// Products on a sell order use the locked total when one was recorded.
    /// Products on a purchase order use the pinned order rate when present.
    /// Fees always convert at live rates. Sell orders carry no fees, and
    /// manual categories have no value.
    #[must_use]
    pub fn category_total_value(&self, order: PayableOrder<'_>, category: &PaymentCategory) -> Decimal {
        match (order, category) {
            (PayableOrder::Sell(o), PaymentCategory::Products) => o
                .total
                .unwrap_or_else(|| sell_order_totals(o, self.converter.rates(), self.config).total),
            (PayableOrder::Purchase(o), PaymentCategory::Products) => {
                let goods: Decimal = o.lines.iter().map(|l| l.value()).sum();
                self.converter.to_pivot(goods, o.currency, o.exchange_rate)
            }
            (PayableOrder::Purchase(o), PaymentCategory::Fees) => o.fees.iter().map(|fee| self.fee_value(fee)).sum(),
            (PayableOrder::Purchase(o), PaymentCategory::TransportationFees) => {
                o.fees.transportation.as_ref().map_or(Decimal::ZERO, |fee| self.fee_value(fee))
            }
            (PayableOrder::Purchase(o), PaymentCategory::CustomFees) => {
                o.fees.customs.as_ref().map_or(Decimal::ZERO, |fee| self.fee_value(fee))
            }
            (PayableOrder::Purchase(o), PaymentCategory::AdditionalFees) => {
                o.fees.additional.as_ref().map_or(Decimal::ZERO, |fee| self.fee_value(fee))
            }
            _ => Decimal::ZERO,
        }
    }

    /// Sum of non-manual payments on `(order_id, category)` in pivot currency.
    ///
    /// `fees` counts payments made under any fee label. Each payment converts at its pinned rate, else the live rate. The
    /// payment named by `exclude` is left out so an edit is not counted
    /// against itself.
    #[must_use]
    pub fn paid_so_far(
        &self,
        order_id: OrderId,
        category: &PaymentCategory,
        payments: &[Payment],
        exclude: Option<PaymentId>,
    ) -> Decimal {
        payments
            .iter()
            .filter(|p| !p.is_manual())
            .filter(|p| p.order_id == Some(order_id) && category.covers(&p.category))
            .filter(|p| Some(p.id) != exclude)
            .map(|p| self.payment_value(p))
            .sum()
    }

    /// Category total minus paid so far, never below zero.
    ///
    /// A per-fee label is further capped by what is left on `fees`.
    #[must_use]
    pub fn remaining_balance(
        &self,
        order: PayableOrder<'_>,
        category: &PaymentCategory,
        payments: &[Payment],
        exclude: Option<PaymentId>,
    ) -> Decimal {
        let total = self.category_total_value(order, category);
        let paid = self.paid_so_far(order.id(), category, payments, exclude);
        let remaining = (total - paid).max(Decimal::ZERO);
        if category.is_legacy_fee() {
            return remaining.min(self.remaining_balance(order, &PaymentCategory::Fees, payments, exclude));
        }
        remaining
    }

    /// Rejects an amount that exceeds the remaining balance by more than the
    /// configured epsilon.
    pub fn validate_payment(&self, amount_in_pivot: Decimal, remaining: Decimal) -> Result<(), PaymentError> {
        if amount_in_pivot > remaining + self.config.payment_epsilon {
            return Err(PaymentError::Overpayment {
                attempted: amount_in_pivot,
                remaining,
            });
        }
        Ok(())
    }

    /// Validates a new or edited payment before it is saved.
    ///
    /// `order` is the order named by `payment.order_id`, if it still exists.
    /// `payments` is the stored collection; when it already holds a version
    /// of this payment, that version is excluded from the paid total.
    ///
    /// Manual payments skip the balance check but need a description unless
    /// their category is the initial capital category.
    pub fn validate_payment_draft(
        &self,
        payment: &Payment,
        order: Option<PayableOrder<'_>>,
        payments: &[Payment],
    ) -> Result<(), PaymentError> {
        if payment.amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount(payment.amount));
        }

        let Some(order_id) = payment.order_id.filter(|_| !payment.is_manual()) else {
            let is_initial_capital = payment.category.label() == self.config.initial_capital_category;
            if !is_initial_capital && !payment.has_description() {
                return Err(PaymentError::MissingDescription);
            }
            return Ok(());
        };

        let order = order
            .filter(|o| o.id() == order_id)
            .ok_or(PaymentError::UnknownOrder(order_id))?;

        let remaining = self.remaining_balance(order, &payment.category, payments, Some(payment.id));
        let attempted = self.payment_value(payment);
        debug!(
            payment_id = %payment.id,
            %order_id,
            category = %payment.category,
            %attempted,
            %remaining,
            "validating payment"
        );
        self.validate_payment(attempted, remaining)
    }

    /// Every order category with more than epsilon left to pay.
    #[must_use]
    pub fn open_balances(&self, orders: &[PayableOrder<'_>], payments: &[Payment]) -> Vec<OpenBalance> {
        orders
            .iter()
            .flat_map(|order| {
                order.categories().into_iter().map(move |category| {
                    let total = self.category_total_value(*order, &category);
                    let paid = self.paid_so_far(order.id(), &category, payments, None);
                    OpenBalance {
                        order_id: order.id(),
                        category,
                        total,
                        paid,
                        remaining: (total - paid).max(Decimal::ZERO),
                    }
                })
            })
            .filter(|balance| balance.remaining > self.config.payment_epsilon)
            .collect()
    }

    fn fee_value(&self, fee: &Money) -> Decimal {
        self.converter
            .convert(fee.amount, fee.currency, self.converter.rates().pivot())
    }

    fn payment_value(&self, payment: &Payment) -> Decimal {
        self.converter
            .to_pivot(payment.amount, payment.currency, payment.exchange_rate)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
