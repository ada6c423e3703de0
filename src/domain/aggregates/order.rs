//! Order records and their append-only status timeline.

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::aggregates::cart::CartLine;
use crate::domain::value_objects::Currency;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    FraudCheck,
    Shipped,
    Delivered,
    Cancelled,
}

/// Simulated payment processors. No real integration exists behind any of
/// these names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentGateway {
    Stripe,
    PayPal,
    Iyzico,
    #[serde(rename = "PayTR")]
    PayTr,
    #[serde(rename = "COD")]
    Cod,
}

impl fmt::Display for PaymentGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stripe => "Stripe",
            Self::PayPal => "PayPal",
            Self::Iyzico => "Iyzico",
            Self::PayTr => "PayTR",
            Self::Cod => "COD",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Order creation payload: `POST /api/orders`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub currency: Currency,
    pub shipping_address: Address,
    pub payment_gateway: PaymentGateway,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub currency: Currency,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub payment_gateway: PaymentGateway,
    pub shipping_address: Address,
    pub timeline: Vec<TimelineEntry>,
}

impl Order {
    /// Accepts a validated creation payload: assigns the server-side id,
    /// moves the order to `processing` and seeds the timeline.
    pub fn create(req: NewOrder) -> Self {
        let mut order = Self {
            id: order_id(),
            user_id: req.user_id,
            items: req.items,
            total: req.total,
            currency: req.currency,
            status: OrderStatus::Processing,
            created_at: Utc::now(),
            payment_gateway: req.payment_gateway,
            shipping_address: req.shipping_address,
            timeline: vec![],
        };
        order.record("created", format!("Order created via {}", order.payment_gateway));
        order.record("paid", "Payment captured");
        order
    }

    /// Appends a timeline entry. Timestamps never go backwards even if the
    /// wall clock does.
    pub fn record(&mut self, status: impl Into<String>, description: impl Into<String>) {
        let now = Utc::now();
        let timestamp = self
            .timeline
            .last()
            .map_or(now, |last| last.timestamp.max(now));
        self.timeline.push(TimelineEntry {
            status: status.into(),
            timestamp,
            description: description.into(),
        });
    }

    /// Advances the order status and mirrors the change onto the timeline.
    pub fn advance(&mut self, status: OrderStatus, description: impl Into<String>) {
        self.status = status;
        let label = match status {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::FraudCheck => "fraud_check",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        self.record(label, description);
    }
}

fn order_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("ord_{suffix}")
}
