//! Property-based tests for stock bookkeeping.
//!
//! - Saving an unchanged document leaves stock untouched
//! - Creating then deleting a completed document restores stock
//! - Stock never goes negative, whatever the edit sequence

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::fixtures::*;
use super::stock::InventoryCostEngine;
use super::types::{DocumentStatus, ProductCatalog, PurchaseStatus, SellStatus};

/// Strategy for line quantities (0.01 to 1,000.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn opening_stock() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn purchase_status() -> impl Strategy<Value = PurchaseStatus> {
    prop_oneof![
        Just(PurchaseStatus::Draft),
        Just(PurchaseStatus::Pending),
        Just(PurchaseStatus::Received),
        Just(PurchaseStatus::Cancelled),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Buy(Decimal),
    Ship(Decimal),
    Transfer(Decimal),
    WriteOff(Decimal),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        quantity().prop_map(Op::Buy),
        quantity().prop_map(Op::Ship),
        quantity().prop_map(Op::Transfer),
        quantity().prop_map(Op::WriteOff),
    ]
}

fn all_levels_non_negative(catalog: &ProductCatalog) -> bool {
    catalog
        .iter()
        .all(|p| p.stock.values().all(|qty| *qty >= Decimal::ZERO))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// new == old is a no-op for every status.
    #[test]
    fn prop_unchanged_purchase_is_idempotent(
        opening in opening_stock(),
        qty in quantity(),
        status in purchase_status(),
    ) {
        let (p, wh) = (product_id(1), warehouse(1));
        let catalog = catalog_with(p, wh, opening, Decimal::ZERO);
        let order = purchase(wh, status, vec![line(p, qty, Decimal::ONE)]);

        let update = InventoryCostEngine::apply_order_stock_change(&catalog, Some(&order), Some(&order)).unwrap();
        prop_assert_eq!(update.products, catalog);
        prop_assert!(update.clamped.is_empty());
    }

    /// Receiving then deleting a purchase returns the opening stock.
    #[test]
    fn prop_purchase_create_delete_restores(opening in opening_stock(), qty in quantity()) {
        let (p, wh) = (product_id(1), warehouse(1));
        let catalog = catalog_with(p, wh, opening, Decimal::ZERO);
        let order = purchase(wh, PurchaseStatus::Received, vec![line(p, qty, Decimal::ONE)]);

        let created = InventoryCostEngine::apply_order_stock_change(&catalog, Some(&order), None).unwrap();
        let deleted = InventoryCostEngine::apply_order_stock_change(&created.products, None, Some(&order)).unwrap();

        prop_assert_eq!(stock_of(&deleted.products, p, wh), opening);
    }

    /// Shipping then deleting a sell order with enough stock returns the opening stock.
    #[test]
    fn prop_sell_create_delete_restores(qty in quantity(), extra in opening_stock()) {
        let (p, wh) = (product_id(1), warehouse(1));
        let opening = qty + extra;
        let catalog = catalog_with(p, wh, opening, Decimal::ZERO);
        let order = sell(wh, SellStatus::Shipped, vec![line(p, qty, Decimal::ONE)]);

        let created = InventoryCostEngine::apply_order_stock_change(&catalog, Some(&order), None).unwrap();
        prop_assert!(created.is_clean());
        let deleted = InventoryCostEngine::apply_order_stock_change(&created.products, None, Some(&order)).unwrap();

        prop_assert_eq!(stock_of(&deleted.products, p, wh), opening);
    }

    /// No sequence of completed documents drives a level below zero.
    #[test]
    fn prop_stock_never_negative(
        opening in opening_stock(),
        ops in prop::collection::vec(op(), 1..20),
    ) {
        let (p, a, b) = (product_id(1), warehouse(1), warehouse(2));
        let mut catalog = catalog_with(p, a, opening, Decimal::ZERO);

        for op in ops {
            let update = match op {
                Op::Buy(qty) => {
                    let doc = purchase(a, PurchaseStatus::Received, vec![line(p, qty, Decimal::ONE)]);
                    InventoryCostEngine::apply_order_stock_change(&catalog, Some(&doc), None)
                }
                Op::Ship(qty) => {
                    let doc = sell(a, SellStatus::Shipped, vec![line(p, qty, Decimal::ONE)]);
                    InventoryCostEngine::apply_order_stock_change(&catalog, Some(&doc), None)
                }
                Op::Transfer(qty) => {
                    let doc = movement(a, b, DocumentStatus::Completed, vec![move_line(p, qty)]);
                    InventoryCostEngine::apply_movement_stock_change(&catalog, Some(&doc), None)
                }
                Op::WriteOff(qty) => {
                    let doc = utilization(b, DocumentStatus::Completed, vec![move_line(p, qty)]);
                    InventoryCostEngine::apply_utilization(&catalog, Some(&doc), None)
                }
            }
            .unwrap();

            prop_assert!(all_levels_non_negative(&update.products));
            catalog = update.products;
        }
    }

    /// A strict check passes exactly when applying would not clamp.
    #[test]
    fn prop_availability_matches_clamping(opening in opening_stock(), qty in quantity()) {
        let (p, wh) = (product_id(1), warehouse(1));
        let catalog = catalog_with(p, wh, opening, Decimal::ZERO);
        let order = sell(wh, SellStatus::Shipped, vec![line(p, qty, Decimal::ONE)]);

        let strict_ok = InventoryCostEngine::check_availability(&catalog, Some(&order), None).is_ok();
        let applied = InventoryCostEngine::apply_order_stock_change(&catalog, Some(&order), None).unwrap();
        prop_assert_eq!(strict_ok, applied.is_clean());
    }
}
