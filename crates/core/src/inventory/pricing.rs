//! Sell-side figures derived from stock and cost.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use stockbook_shared::AccountingConfig;
use stockbook_shared::types::ProductId;

use super::types::{Product, ProductCatalog, SellOrder};
use crate::currency::{CurrencyConverter, RateTable};

/// Sell order totals in pivot currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellOrderTotals {
    /// Σ quantity × unit price, before VAT.
    pub subtotal: Decimal,
    /// VAT on the subtotal.
    pub vat: Decimal,
    /// Subtotal plus VAT.
    pub total: Decimal,
}

/// Computes a sell order's totals at its locked exchange rate.
///
/// Falls back to the live rate when the order has none, and to the
/// configured VAT when the order records no rate of its own.
#[must_use]
pub fn sell_order_totals(order: &SellOrder, rates: &RateTable, config: &AccountingConfig) -> SellOrderTotals {
    let converter = CurrencyConverter::new(rates);
    let subtotal_in_order_currency: Decimal = order.lines.iter().map(|l| l.value()).sum();
    let subtotal = converter.to_pivot(subtotal_in_order_currency, order.currency, order.exchange_rate);
    let vat_percent = order.vat_percent.unwrap_or(config.default_vat_percent);
    let vat = subtotal * vat_percent / Decimal::ONE_HUNDRED;

    SellOrderTotals {
        subtotal,
        vat,
        total: subtotal + vat,
    }
}

/// Unit price covering average landed cost plus a markup percentage.
///
/// Without an explicit markup the configured default applies. The price is
/// rounded to display precision.
#[must_use]
pub fn suggested_unit_price(product: &Product, markup_percent: Option<Decimal>, config: &AccountingConfig) -> Decimal {
    let markup = markup_percent.unwrap_or(config.default_markup_percent);
    let factor = Decimal::ONE + markup / Decimal::ONE_HUNDRED;
    (product.average_landed_cost * factor)
        .round_dp_with_strategy(config.display_decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Cost of the goods on a sell order at current average cost.
///
/// Lines for unknown products contribute nothing.
#[must_use]
pub fn cost_of_goods_sold(order: &SellOrder, products: &ProductCatalog) -> Decimal {
    order
        .lines
        .iter()
        .filter_map(|line| {
            products
                .get(line.product_id)
                .map(|p| line.quantity * p.average_landed_cost)
        })
        .sum()
}

/// Stock value of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationLine {
    /// The product.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Quantity across all warehouses.
    pub quantity: Decimal,
    /// Average landed cost per unit.
    pub average_landed_cost: Decimal,
    /// quantity × average landed cost.
    pub value: Decimal,
}

/// Stock value of a whole catalog, in pivot currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryValuation {
    /// One line per product, in id order.
    pub lines: Vec<ValuationLine>,
    /// Σ quantity.
    pub total_quantity: Decimal,
    /// Σ value.
    pub total_value: Decimal,
}

/// Values every product at its average landed cost.
#[must_use]
pub fn inventory_valuation(products: &ProductCatalog) -> InventoryValuation {
    let lines: Vec<ValuationLine> = products
        .iter()
        .map(|p| {
            let quantity = p.total_stock();
            ValuationLine {
                product_id: p.id,
                name: p.name.clone(),
                quantity,
                average_landed_cost: p.average_landed_cost,
                value: quantity * p.average_landed_cost,
            }
        })
        .collect();

    InventoryValuation {
        total_quantity: lines.iter().map(|l| l.quantity).sum(),
        total_value: lines.iter().map(|l| l.value).sum(),
        lines,
    }
}
