//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartLine};
pub use order::{Address, NewOrder, Order, OrderStatus, PaymentGateway, TimelineEntry};
pub use product::{Product, ProductVariant};
