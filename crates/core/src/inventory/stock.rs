//! Stock level bookkeeping for orders, movements and utilizations.
//!
//! Every edit is applied as "reverse the old document, then apply the new
//! one". Creation passes no old document and deletion passes no new one, so
//! replaying any edit history from the records gives the same stock.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ProductId, WarehouseId};
use tracing::{debug, warn};

use super::error::InventoryError;
use super::types::{
    DocumentStatus, LifecycleStatus, MovementLine, OrderLine, ProductCatalog, ProductMovement,
    PurchaseOrder, PurchaseStatus, SellOrder, SellStatus, UtilizationOrder,
};

/// A signed stock delta on one product in one warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockEffect {
    /// The product affected.
    pub product_id: ProductId,
    /// The warehouse affected.
    pub warehouse_id: WarehouseId,
    /// Positive to add stock, negative to remove it.
    pub delta: Decimal,
}

/// A document whose completion changes stock.
pub trait StockDocument: PartialEq {
    /// The document's status machine.
    type Status: LifecycleStatus;

    /// Current status.
    fn status(&self) -> Self::Status;

    /// Stock effects applied when the document is completed.
    fn effects(&self) -> Vec<StockEffect>;

    /// Checks the document's own fields.
    fn validate(&self) -> Result<(), InventoryError>;
}

/// Purchase and sell orders.
pub trait StockOrder: StockDocument {}

impl StockOrder for PurchaseOrder {}
impl StockOrder for SellOrder {}

/// Record of a stock level that would have gone negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockClamp {
    /// The product affected.
    pub product_id: ProductId,
    /// The warehouse affected.
    pub warehouse_id: WarehouseId,
    /// Quantity on hand before the delta.
    pub available: Decimal,
    /// The delta that was requested.
    pub delta: Decimal,
}

impl StockClamp {
    /// Quantity that could not be removed.
    #[must_use]
    pub fn shortfall(&self) -> Decimal {
        -(self.available + self.delta)
    }
}

/// Result of an inventory engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryUpdate {
    /// The updated product collection.
    pub products: ProductCatalog,
    /// Stock levels held at zero instead of going negative.
    pub clamped: Vec<StockClamp>,
    /// Lines skipped because their product no longer exists.
    pub skipped: Vec<ProductId>,
}

impl InventoryUpdate {
    pub(crate) fn unchanged(products: &ProductCatalog) -> Self {
        Self {
            products: products.clone(),
            clamped: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Returns true if no stock level was clamped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.clamped.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClampMode {
    Clamp,
    Strict,
}

/// Stateless engine for stock levels and weighted-average cost.
pub struct InventoryCostEngine;

impl InventoryCostEngine {
    /// Applies a purchase or sell order edit.
    ///
    /// Purchase completion adds stock, sell completion removes it. An order
    /// moving between non-terminal states, or deleted while non-terminal,
    /// has no effect.
    pub fn apply_order_stock_change<O: StockOrder>(
        products: &ProductCatalog,
        new_order: Option<&O>,
        old_order: Option<&O>,
    ) -> Result<InventoryUpdate, InventoryError> {
        Self::apply_document_change(products, new_order, old_order)
    }

    /// Applies a movement edit: completion moves stock from source to destination.
    pub fn apply_movement_stock_change(
        products: &ProductCatalog,
        new_movement: Option<&ProductMovement>,
        old_movement: Option<&ProductMovement>,
    ) -> Result<InventoryUpdate, InventoryError> {
        Self::apply_document_change(products, new_movement, old_movement)
    }

    /// Applies a utilization edit: completion writes stock off.
    pub fn apply_utilization(
        products: &ProductCatalog,
        new_utilization: Option<&UtilizationOrder>,
        old_utilization: Option<&UtilizationOrder>,
    ) -> Result<InventoryUpdate, InventoryError> {
        Self::apply_document_change(products, new_utilization, old_utilization)
    }

    /// Checks that an edit can be applied without clamping any stock level.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` for the first level that would go
    /// negative, or any validation error of the new document.
    pub fn check_availability<D: StockDocument>(
        products: &ProductCatalog,
        new_doc: Option<&D>,
        old_doc: Option<&D>,
    ) -> Result<(), InventoryError> {
        Self::run(products, new_doc, old_doc, ClampMode::Strict).map(|_| ())
    }

    /// Validates a status change between two versions of a document.
    pub fn validate_transition<D: StockDocument>(new_doc: &D, old_doc: &D) -> Result<(), InventoryError> {
        let (from, to) = (old_doc.status(), new_doc.status());
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(InventoryError::InvalidTransition {
                from: format!("{from:?}"),
                to: format!("{to:?}"),
            })
        }
    }

    /// Reverse-then-apply for any stock document.
    pub fn apply_document_change<D: StockDocument>(
        products: &ProductCatalog,
        new_doc: Option<&D>,
        old_doc: Option<&D>,
    ) -> Result<InventoryUpdate, InventoryError> {
        Self::run(products, new_doc, old_doc, ClampMode::Clamp)
    }

    fn run<D: StockDocument>(
        products: &ProductCatalog,
        new_doc: Option<&D>,
        old_doc: Option<&D>,
        mode: ClampMode,
    ) -> Result<InventoryUpdate, InventoryError> {
        if let Some(doc) = new_doc {
            doc.validate()?;
        }
        if let (Some(new), Some(old)) = (new_doc, old_doc) {
            Self::validate_transition(new, old)?;
            if new == old {
                return Ok(InventoryUpdate::unchanged(products));
            }
        }

        let mut update = InventoryUpdate::unchanged(products);

        if let Some(old) = old_doc.filter(|d| d.status().is_completed()) {
            for effect in old.effects() {
                let reversed = StockEffect {
                    delta: -effect.delta,
                    ..effect
                };
                apply_effect(&mut update, reversed, mode)?;
            }
        }

        if let Some(new) = new_doc.filter(|d| d.status().is_completed()) {
            for effect in new.effects() {
                apply_effect(&mut update, effect, mode)?;
            }
        }

        debug!(
            clamped = update.clamped.len(),
            skipped = update.skipped.len(),
            "stock change applied"
        );
        Ok(update)
    }
}

fn apply_effect(
    update: &mut InventoryUpdate,
    effect: StockEffect,
    mode: ClampMode,
) -> Result<(), InventoryError> {
    let Some(product) = update.products.get_mut(effect.product_id) else {
        warn!(product_id = %effect.product_id, "skipping stock line for unknown product");
        if !update.skipped.contains(&effect.product_id) {
            update.skipped.push(effect.product_id);
        }
        return Ok(());
    };

    let available = product.stock_in(effect.warehouse_id);
    let next = available + effect.delta;

    let next = if next < Decimal::ZERO {
        if mode == ClampMode::Strict {
            return Err(InventoryError::InsufficientStock {
                product_id: effect.product_id,
                warehouse_id: effect.warehouse_id,
                available,
                required: -effect.delta,
            });
        }
        warn!(
            product_id = %effect.product_id,
            warehouse_id = %effect.warehouse_id,
            %available,
            delta = %effect.delta,
            "stock would go negative, clamping at zero"
        );
        update.clamped.push(StockClamp {
            product_id: effect.product_id,
            warehouse_id: effect.warehouse_id,
            available,
            delta: effect.delta,
        });
        Decimal::ZERO
    } else {
        next
    };

    product.stock.insert(effect.warehouse_id, next);
    Ok(())
}

fn validate_quantities<'a>(
    lines: impl ExactSizeIterator<Item = (ProductId, &'a Decimal)>,
) -> Result<(), InventoryError> {
    if lines.len() == 0 {
        return Err(InventoryError::NoLines);
    }
    for (product_id, quantity) in lines {
        if *quantity <= Decimal::ZERO {
            return Err(InventoryError::NonPositiveQuantity {
                product_id,
                quantity: *quantity,
            });
        }
    }
    Ok(())
}

fn order_lines(lines: &[OrderLine]) -> impl ExactSizeIterator<Item = (ProductId, &Decimal)> {
    lines.iter().map(|l| (l.product_id, &l.quantity))
}

fn movement_lines(lines: &[MovementLine]) -> impl ExactSizeIterator<Item = (ProductId, &Decimal)> {
    lines.iter().map(|l| (l.product_id, &l.quantity))
}

impl StockDocument for PurchaseOrder {
    type Status = PurchaseStatus;

    fn status(&self) -> Self::Status {
        self.status
    }

    fn effects(&self) -> Vec<StockEffect> {
        self.lines
            .iter()
            .map(|line| StockEffect {
                product_id: line.product_id,
                warehouse_id: self.warehouse_id,
                delta: line.quantity,
            })
            .collect()
    }

    fn validate(&self) -> Result<(), InventoryError> {
        validate_quantities(order_lines(&self.lines))
    }
}

impl StockDocument for SellOrder {
    type Status = SellStatus;

    fn status(&self) -> Self::Status {
        self.status
    }

    fn effects(&self) -> Vec<StockEffect> {
        self.lines
            .iter()
            .map(|line| StockEffect {
                product_id: line.product_id,
                warehouse_id: self.warehouse_id,
                delta: -line.quantity,
            })
            .collect()
    }

    fn validate(&self) -> Result<(), InventoryError> {
        validate_quantities(order_lines(&self.lines))
    }
}

impl StockDocument for ProductMovement {
    type Status = DocumentStatus;

    fn status(&self) -> Self::Status {
        self.status
    }

    fn effects(&self) -> Vec<StockEffect> {
        // Debit the source before crediting the destination.
        let out = self.lines.iter().map(|line| StockEffect {
            product_id: line.product_id,
            warehouse_id: self.source_warehouse_id,
            delta: -line.quantity,
        });
        let into = self.lines.iter().map(|line| StockEffect {
            product_id: line.product_id,
            warehouse_id: self.dest_warehouse_id,
            delta: line.quantity,
        });
        out.chain(into).collect()
    }

    fn validate(&self) -> Result<(), InventoryError> {
        if self.source_warehouse_id == self.dest_warehouse_id {
            return Err(InventoryError::SameWarehouse(self.source_warehouse_id));
        }
        validate_quantities(movement_lines(&self.lines))
    }
}

impl StockDocument for UtilizationOrder {
    type Status = DocumentStatus;

    fn status(&self) -> Self::Status {
        self.status
    }

    fn effects(&self) -> Vec<StockEffect> {
        self.lines
            .iter()
            .map(|line| StockEffect {
                product_id: line.product_id,
                warehouse_id: self.warehouse_id,
                delta: -line.quantity,
            })
            .collect()
    }

    fn validate(&self) -> Result<(), InventoryError> {
        validate_quantities(movement_lines(&self.lines))
    }
}
