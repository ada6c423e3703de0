//! In-memory order log, newest first, plus the admin stats rollup.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::checkout::orchestrator::{CreateOrder, OrderCreationError};
use crate::domain::aggregates::order::{NewOrder, Order};
use crate::domain::events::{self, DomainEvent, OrderEvent};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_sales: Decimal,
    pub total_orders: usize,
    pub total_users: usize,
    pub recent_orders: Vec<Order>,
}

pub struct OrderStore {
    orders: RwLock<Vec<Order>>,
}

impl OrderStore {
    pub fn new(seed: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(seed),
        }
    }

    pub fn list(&self) -> Vec<Order> {
        self.read().clone()
    }

    pub fn insert(&self, order: Order) -> Order {
        events::publish(&DomainEvent::Order(OrderEvent::Created {
            order_id: order.id.clone(),
            user_id: order.user_id.clone(),
            gateway: order.payment_gateway.to_string(),
            total: order.total,
        }));
        self.write().insert(0, order.clone());
        order
    }

    pub fn stats(&self, total_users: usize) -> StatsSnapshot {
        let orders = self.read();
        StatsSnapshot {
            total_sales: orders.iter().map(|o| o.total).sum(),
            total_orders: orders.len(),
            total_users,
            recent_orders: orders.iter().take(5).cloned().collect(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Order>> {
        self.orders.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Order>> {
        self.orders.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl CreateOrder for OrderStore {
    async fn create_order(&self, req: NewOrder) -> Result<Order, OrderCreationError> {
        Ok(self.insert(Order::create(req)))
    }
}
