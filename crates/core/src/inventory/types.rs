//! Inventory domain types: products, orders, movements and their lifecycles.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{
    Currency, MovementId, Money, OrderId, ProductId, UtilizationId, WarehouseId,
};

/// A stocked product.
///
/// `average_landed_cost` is per base unit, in pivot currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// The product ID.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Quantity on hand per warehouse.
    #[serde(default)]
    pub stock: BTreeMap<WarehouseId, Decimal>,
    /// Weighted-average landed cost per unit.
    #[serde(default)]
    pub average_landed_cost: Decimal,
}

impl Product {
    /// Creates a product with no stock and no cost.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stock: BTreeMap::new(),
            average_landed_cost: Decimal::ZERO,
        }
    }

    /// Quantity on hand in one warehouse (zero when never stocked there).
    #[must_use]
    pub fn stock_in(&self, warehouse_id: WarehouseId) -> Decimal {
        self.stock.get(&warehouse_id).copied().unwrap_or(Decimal::ZERO)
    }

    /// Quantity on hand across all warehouses.
    #[must_use]
    pub fn total_stock(&self) -> Decimal {
        self.stock.values().copied().sum()
    }
}

/// The product collection, keyed by id.
///
/// Engines never mutate a catalog in place: every operation clones the
/// catalog it was given and returns the updated copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct ProductCatalog {
    products: BTreeMap<ProductId, Product>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Looks up a product for mutation.
    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    /// Inserts or replaces a product.
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Iterates over products in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

impl From<Vec<Product>> for ProductCatalog {
    fn from(products: Vec<Product>) -> Self {
        products.into_iter().collect()
    }
}

impl From<ProductCatalog> for Vec<Product> {
    fn from(catalog: ProductCatalog) -> Self {
        catalog.products.into_values().collect()
    }
}

/// One priced line of a purchase or sell order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// The product ordered.
    pub product_id: ProductId,
    /// Quantity in base units.
    pub quantity: Decimal,
    /// Unit price in the order currency.
    pub unit_price: Decimal,
    /// Landed cost per unit in pivot currency, when known.
    #[serde(default)]
    pub landed_cost_per_unit: Option<Decimal>,
}

impl OrderLine {
    /// Creates a line with no landed cost.
    #[must_use]
    pub fn new(product_id: ProductId, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            landed_cost_per_unit: None,
        }
    }

    /// Sets the landed cost per unit.
    #[must_use]
    pub fn with_landed_cost(mut self, landed_cost_per_unit: Decimal) -> Self {
        self.landed_cost_per_unit = Some(landed_cost_per_unit);
        self
    }

    /// Quantity × unit price, in order currency.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// One unpriced line of a movement or utilization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLine {
    /// The product moved.
    pub product_id: ProductId,
    /// Quantity in base units.
    pub quantity: Decimal,
}

/// Fees charged on a purchase order, each in its own currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFees {
    /// Freight and delivery.
    #[serde(default)]
    pub transportation: Option<Money>,
    /// Customs duties.
    #[serde(default)]
    pub customs: Option<Money>,
    /// Anything else.
    #[serde(default)]
    pub additional: Option<Money>,
}

impl OrderFees {
    /// Iterates over the fees that are set.
    pub fn iter(&self) -> impl Iterator<Item = &Money> {
        [&self.transportation, &self.customs, &self.additional]
            .into_iter()
            .flatten()
    }
}

/// Purchase order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// Being drafted.
    Draft,
    /// Ordered from the supplier, not yet received.
    Pending,
    /// Goods received into the warehouse (stock and cost effect point).
    Received,
    /// Cancelled.
    Cancelled,
}

/// Sell order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellStatus {
    /// Being drafted.
    Draft,
    /// Confirmed, not yet shipped.
    Pending,
    /// Goods left the warehouse (stock effect point).
    Shipped,
    /// Cancelled.
    Cancelled,
}

/// Lifecycle shared by movements and utilizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being drafted.
    Draft,
    /// Executed (stock effect point).
    Completed,
    /// Cancelled.
    Cancelled,
}

/// Common behaviour of the status machines above.
pub trait LifecycleStatus: Copy + Eq + std::fmt::Debug {
    /// Whether this is the terminal state where stock effects apply.
    fn is_completed(self) -> bool;

    /// Whether this is the cancelled state.
    fn is_cancelled(self) -> bool;

    /// Whether this is the draft state.
    fn is_draft(self) -> bool;

    /// Whether an edit may move a document from `self` to `next`.
    ///
    /// Completed documents may be reverted. A cancelled document must be
    /// reopened as a draft before anything else happens to it.
    fn can_transition_to(self, next: Self) -> bool {
        if self == next || !self.is_cancelled() {
            return true;
        }
        next.is_draft()
    }
}

impl LifecycleStatus for PurchaseStatus {
    fn is_completed(self) -> bool {
        matches!(self, Self::Received)
    }

    fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl LifecycleStatus for SellStatus {
    fn is_completed(self) -> bool {
        matches!(self, Self::Shipped)
    }

    fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl LifecycleStatus for DocumentStatus {
    fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    fn is_draft(self) -> bool {
        matches!(self, Self::Draft)
    }
}

/// A purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// The order ID.
    pub id: OrderId,
    /// Receiving warehouse.
    pub warehouse_id: WarehouseId,
    /// Lifecycle status.
    pub status: PurchaseStatus,
    /// Currency of the unit prices.
    pub currency: Currency,
    /// Pivot units per unit of `currency`, pinned when the order was placed.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Ordered lines.
    pub lines: Vec<OrderLine>,
    /// Fees charged on top of the goods.
    #[serde(default)]
    pub fees: OrderFees,
}

/// A sell order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellOrder {
    /// The order ID.
    pub id: OrderId,
    /// Shipping warehouse.
    pub warehouse_id: WarehouseId,
    /// Lifecycle status.
    pub status: SellStatus,
    /// Currency of the unit prices.
    pub currency: Currency,
    /// Pivot units per unit of `currency`, locked when the order was placed.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Ordered lines.
    pub lines: Vec<OrderLine>,
    /// VAT rate in percent. `None` uses the configured default.
    #[serde(default)]
    pub vat_percent: Option<Decimal>,
    /// Locked total in pivot currency, VAT included.
    #[serde(default)]
    pub total: Option<Decimal>,
}

/// A transfer of stock between two warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMovement {
    /// The movement ID.
    pub id: MovementId,
    /// Warehouse the goods leave.
    pub source_warehouse_id: WarehouseId,
    /// Warehouse the goods enter.
    pub dest_warehouse_id: WarehouseId,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Moved lines.
    pub lines: Vec<MovementLine>,
}

/// A write-off of stock from a single warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationOrder {
    /// The utilization ID.
    pub id: UtilizationId,
    /// Warehouse the goods are written off from.
    pub warehouse_id: WarehouseId,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Written-off lines.
    pub lines: Vec<MovementLine>,
}
