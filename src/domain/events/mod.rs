//! Domain events raised by the stores when catalog or order state changes.
//!
//! There is no external broker here; events drain into structured logs.

use rust_decimal::Decimal;

#[derive(Clone, Debug)]
pub enum DomainEvent {
    Product(ProductEvent),
    Order(OrderEvent),
}

#[derive(Clone, Debug)]
pub enum ProductEvent {
    Created { product_id: String, name: String },
    Updated { product_id: String },
    Deleted { product_id: String },
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Created {
        order_id: String,
        user_id: String,
        gateway: String,
        total: Decimal,
    },
}

pub fn publish(event: &DomainEvent) {
    tracing::info!(?event, "domain event");
}
