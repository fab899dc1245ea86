//! Weighted-average landed cost.
//!
//! Each receipt blends into the running average:
//!
//! ```text
//! avg' = (stock_before * avg + qty * landed) / (stock_before + qty)
//! ```
//!
//! Per-lot history is not kept, so an update is O(1) per line.

use rust_decimal::{Decimal, RoundingStrategy};
use stockbook_shared::AccountingConfig;
use stockbook_shared::types::ProductId;
use tracing::{debug, warn};

use super::error::InventoryError;
use super::stock::{InventoryCostEngine, InventoryUpdate, StockDocument};
use super::types::{LifecycleStatus, ProductCatalog, PurchaseOrder};
use crate::currency::{CurrencyConverter, RateTable, allocate_proportionally};

impl InventoryCostEngine {
    /// Blends a received purchase order into each product's average cost.
    ///
    /// Expects stock to already include the order. Lines without a positive
    /// `landed_cost_per_unit` are ignored, as are lines for unknown products.
    /// Several lines for one product are merged first, at their
    /// quantity-weighted landed cost. With no prior stock or no prior cost
    /// the merged landed cost is taken as is.
    pub fn recompute_average_landed_cost(
        products: &ProductCatalog,
        order: &PurchaseOrder,
        config: &AccountingConfig,
    ) -> Result<InventoryUpdate, InventoryError> {
        order.validate()?;
        let mut update = InventoryUpdate::unchanged(products);

        // (product, received quantity, received value) in line order
        let mut receipts: Vec<(ProductId, Decimal, Decimal)> = Vec::new();
        for line in &order.lines {
            let Some(landed) = line.landed_cost_per_unit.filter(|c| *c > Decimal::ZERO) else {
                continue;
            };
            match receipts.iter_mut().find(|(id, _, _)| *id == line.product_id) {
                Some((_, quantity, value)) => {
                    *quantity += line.quantity;
                    *value += line.quantity * landed;
                }
                None => receipts.push((line.product_id, line.quantity, line.quantity * landed)),
            }
        }

        for (product_id, quantity, value) in receipts {
            let Some(product) = update.products.get_mut(product_id) else {
                warn!(%product_id, order_id = %order.id, "skipping cost line for unknown product");
                update.skipped.push(product_id);
                continue;
            };

            let total_after = product.total_stock();
            let stock_before = total_after - quantity;
            let old_average = product.average_landed_cost;

            let blended = if stock_before > Decimal::ZERO && old_average > Decimal::ZERO {
                (stock_before * old_average + value) / total_after
            } else {
                value / quantity
            };
            let new_average =
                blended.round_dp_with_strategy(config.cost_decimal_places, RoundingStrategy::MidpointAwayFromZero);

            debug!(
                %product_id,
                %old_average,
                %new_average,
                "average landed cost updated"
            );
            product.average_landed_cost = new_average;
        }

        Ok(update)
    }

    /// Full purchase lifecycle step: stock first, then cost.
    ///
    /// Cost is blended only when the order enters `Received`; editing an
    /// already received order moves stock but leaves the average alone.
    /// Missing landed costs are derived from prices and fees.
    pub fn receive_purchase(
        products: &ProductCatalog,
        new_order: Option<&PurchaseOrder>,
        old_order: Option<&PurchaseOrder>,
        rates: &RateTable,
        config: &AccountingConfig,
    ) -> Result<InventoryUpdate, InventoryError> {
        let stock = Self::apply_order_stock_change(products, new_order, old_order)?;

        let was_completed = old_order.is_some_and(|o| o.status.is_completed());
        let Some(order) = new_order.filter(|o| o.status.is_completed() && !was_completed) else {
            return Ok(stock);
        };

        let costed_order = with_landed_costs(order, rates, config);
        let costed = Self::recompute_average_landed_cost(&stock.products, &costed_order, config)?;

        let mut skipped = stock.skipped;
        for id in costed.skipped {
            if !skipped.contains(&id) {
                skipped.push(id);
            }
        }

        Ok(InventoryUpdate {
            products: costed.products,
            clamped: stock.clamped,
            skipped,
        })
    }
}

/// Landed cost per unit for every line, in pivot currency.
///
/// The unit price is converted with the order's pinned rate when present.
/// Fees are converted at live rates, summed, and spread over lines in
/// proportion to line value.
#[must_use]
pub fn landed_costs(order: &PurchaseOrder, rates: &RateTable, config: &AccountingConfig) -> Vec<Decimal> {
    let converter = CurrencyConverter::new(rates);
    let pivot = rates.pivot();

    let unit_prices: Vec<Decimal> = order
        .lines
        .iter()
        .map(|l| converter.to_pivot(l.unit_price, order.currency, order.exchange_rate))
        .collect();

    let line_values: Vec<Decimal> = order
        .lines
        .iter()
        .zip(&unit_prices)
        .map(|(l, price)| l.quantity * *price)
        .collect();

    let fee_total: Decimal = order
        .fees
        .iter()
        .map(|fee| converter.convert(fee.amount, fee.currency, pivot))
        .sum();

    let fee_shares = allocate_proportionally(fee_total, &line_values, config.cost_decimal_places);

    order
        .lines
        .iter()
        .zip(unit_prices)
        .zip(fee_shares)
        .map(|((line, price), share)| {
            let per_unit_fee = if line.quantity > Decimal::ZERO {
                share / line.quantity
            } else {
                Decimal::ZERO
            };
            (price + per_unit_fee).round_dp_with_strategy(
                config.cost_decimal_places,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
        .collect()
}

/// Copy of `order` with every missing landed cost filled in.
///
/// Landed costs already recorded on a line are kept.
#[must_use]
pub fn with_landed_costs(order: &PurchaseOrder, rates: &RateTable, config: &AccountingConfig) -> PurchaseOrder {
    let derived = landed_costs(order, rates, config);
    let mut costed = order.clone();
    for (line, cost) in costed.lines.iter_mut().zip(derived) {
        if line.landed_cost_per_unit.is_none() {
            line.landed_cost_per_unit = Some(cost);
        }
    }
    costed
}
