//! Builders shared by the inventory tests.

use rust_decimal::Decimal;
use stockbook_shared::types::{
    Currency, MovementId, OrderId, ProductId, UtilizationId, WarehouseId,
};
use uuid::Uuid;

use super::types::{
    DocumentStatus, MovementLine, OrderFees, OrderLine, Product, ProductCatalog, ProductMovement,
    PurchaseOrder, PurchaseStatus, SellOrder, SellStatus, UtilizationOrder,
};

pub fn product_id(n: u128) -> ProductId {
    ProductId::from_uuid(Uuid::from_u128(n))
}

pub fn warehouse(n: u128) -> WarehouseId {
    WarehouseId::from_uuid(Uuid::from_u128(1_000 + n))
}

/// A catalog of one product stocked in one warehouse.
pub fn catalog_with(product: ProductId, wh: WarehouseId, qty: Decimal, avg_cost: Decimal) -> ProductCatalog {
    let mut p = Product::new(product, "Widget");
    if qty > Decimal::ZERO {
        p.stock.insert(wh, qty);
    }
    p.average_landed_cost = avg_cost;
    std::iter::once(p).collect()
}

pub fn stock_of(catalog: &ProductCatalog, product: ProductId, wh: WarehouseId) -> Decimal {
    catalog
        .get(product)
        .map_or(Decimal::ZERO, |p| p.stock_in(wh))
}

pub fn purchase(wh: WarehouseId, status: PurchaseStatus, lines: Vec<OrderLine>) -> PurchaseOrder {
    PurchaseOrder {
        id: OrderId::from_uuid(Uuid::from_u128(42)),
        warehouse_id: wh,
        status,
        currency: Currency::Azn,
        exchange_rate: None,
        lines,
        fees: OrderFees::default(),
    }
}

pub fn sell(wh: WarehouseId, status: SellStatus, lines: Vec<OrderLine>) -> SellOrder {
    SellOrder {
        id: OrderId::from_uuid(Uuid::from_u128(43)),
        warehouse_id: wh,
        status,
        currency: Currency::Azn,
        exchange_rate: None,
        lines,
        vat_percent: Some(Decimal::ZERO),
        total: None,
    }
}

pub fn movement(
    from: WarehouseId,
    to: WarehouseId,
    status: DocumentStatus,
    lines: Vec<MovementLine>,
) -> ProductMovement {
    ProductMovement {
        id: MovementId::from_uuid(Uuid::from_u128(44)),
        source_warehouse_id: from,
        dest_warehouse_id: to,
        status,
        lines,
    }
}

pub fn utilization(wh: WarehouseId, status: DocumentStatus, lines: Vec<MovementLine>) -> UtilizationOrder {
    UtilizationOrder {
        id: UtilizationId::from_uuid(Uuid::from_u128(45)),
        warehouse_id: wh,
        status,
        lines,
    }
}

pub fn line(product: ProductId, quantity: Decimal, unit_price: Decimal) -> OrderLine {
    OrderLine::new(product, quantity, unit_price)
}

pub fn move_line(product: ProductId, quantity: Decimal) -> MovementLine {
    MovementLine {
        product_id: product,
        quantity,
    }
}
