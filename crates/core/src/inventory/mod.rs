//! Inventory bookkeeping.
//!
//! This module implements:
//! - Stock levels per product and warehouse for purchases, sells,
//!   movements and utilizations
//! - Weighted-average landed cost on receipt
//! - Landed cost derivation from prices, fees and pinned rates
//! - Sell totals, cost of goods sold and stock valuation

pub mod costing;
pub mod error;
pub mod pricing;
pub mod stock;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
mod props;

pub use costing::{landed_costs, with_landed_costs};
pub use error::InventoryError;
pub use pricing::{
    InventoryValuation, SellOrderTotals, ValuationLine, cost_of_goods_sold, inventory_valuation,
    sell_order_totals, suggested_unit_price,
};
pub use stock::{InventoryCostEngine, InventoryUpdate, StockClamp, StockDocument, StockEffect, StockOrder};
pub use types::{
    DocumentStatus, LifecycleStatus, MovementLine, OrderFees, OrderLine, Product, ProductCatalog,
    ProductMovement, PurchaseOrder, PurchaseStatus, SellOrder, SellStatus, UtilizationOrder,
};
