//! Payment orchestration: the one piece of this service with multi-step
//! sequencing and a failure-handling policy.
//!
//! Per checkout session the machine runs
//! `idle → processing_primary → success` or
//! `idle → processing_primary → failed_primary → processing_fallback →
//! success`, with simulated gateway latency between decisions. The primary
//! gateway fails a configured fraction of attempts; the fallback has no
//! simulated failure branch at all. Only an order-creation error sends the
//! machine back to `idle`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::checkout::draft::OrderDraft;
use crate::domain::aggregates::cart::Cart;
use crate::domain::aggregates::order::{NewOrder, Order, PaymentGateway};
use crate::domain::value_objects::Currency;
use crate::notify::{NotificationSink, ToastKind};

/// Simulation parameters, injected rather than embedded in control flow so
/// tests can run with fixed outcomes and collapsed delays.
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    pub primary_gateway: PaymentGateway,
    pub fallback_gateway: PaymentGateway,
    /// Fraction of primary attempts that fail, in `[0, 1]`.
    pub primary_failure_rate: f64,
    pub primary_delay: Duration,
    pub fallback_delay: Duration,
    /// Flat surcharge applied to the cart subtotal.
    pub tax_rate: Decimal,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            primary_gateway: PaymentGateway::Stripe,
            fallback_gateway: PaymentGateway::PayTr,
            primary_failure_rate: 0.10,
            primary_delay: Duration::from_millis(1500),
            fallback_delay: Duration::from_millis(1500),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

/// Session-local state of one checkout submission. Not persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentAttemptState {
    Idle,
    ProcessingPrimary,
    FailedPrimary,
    ProcessingFallback,
    Success {
        #[serde(rename = "orderId")]
        order_id: String,
    },
}

impl PaymentAttemptState {
    fn accepts_submission(&self) -> bool {
        matches!(self, Self::Idle | Self::Success { .. })
    }
}

/// Order Creation Service boundary. Either the order is fully created or
/// the call fails as one opaque error.
#[async_trait]
pub trait CreateOrder: Send + Sync {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrderCreationError>;
}

#[derive(Debug, Error)]
#[error("order creation failed: {0}")]
pub struct OrderCreationError(pub String);

/// Cart Store boundary as the orchestrator sees it.
pub trait CartAccess: Send + Sync {
    fn snapshot(&self, session: &str) -> Cart;
    fn clear(&self, session: &str);
}

/// One Bernoulli draw per primary gateway attempt.
pub trait GatewaySampler: Send + Sync {
    fn primary_fails(&self) -> bool;
}

/// Production sampler. The failure rate is independent of order content.
pub struct BernoulliSampler {
    rate: f64,
    rng: Mutex<StdRng>,
}

impl BernoulliSampler {
    pub fn new(rate: f64) -> Self {
        Self::with_rng(rate, StdRng::from_entropy())
    }

    pub fn seeded(rate: f64, seed: u64) -> Self {
        Self::with_rng(rate, StdRng::seed_from_u64(seed))
    }

    fn with_rng(rate: f64, rng: StdRng) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}

impl GatewaySampler for BernoulliSampler {
    fn primary_fails(&self) -> bool {
        lock(&self.rng).gen_bool(self.rate)
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("validation failed")]
    Invalid(HashMap<String, String>),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("A payment attempt is already in flight")]
    AttemptInFlight,
}

struct Attempt {
    state: watch::Sender<PaymentAttemptState>,
    task: JoinHandle<()>,
}

/// Sequences payment attempts across the primary and fallback gateways.
pub struct PaymentOrchestrator {
    config: CheckoutConfig,
    orders: Arc<dyn CreateOrder>,
    carts: Arc<dyn CartAccess>,
    sampler: Arc<dyn GatewaySampler>,
    notifier: Arc<dyn NotificationSink>,
    attempts: Mutex<HashMap<String, Attempt>>,
}

impl PaymentOrchestrator {
    pub fn new(
        config: CheckoutConfig,
        orders: Arc<dyn CreateOrder>,
        carts: Arc<dyn CartAccess>,
        sampler: Arc<dyn GatewaySampler>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            orders,
            carts,
            sampler,
            notifier,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Current attempt state for a session; `idle` when nothing was ever
    /// submitted.
    pub fn status(&self, session: &str) -> PaymentAttemptState {
        lock(&self.attempts)
            .get(session)
            .map(|a| a.state.borrow().clone())
            .unwrap_or(PaymentAttemptState::Idle)
    }

    /// Submits a checkout. Validation failures and an empty cart are
    /// rejected before any state changes; a submission while an attempt is
    /// outstanding starts nothing. On acceptance the machine enters
    /// `processing_primary` immediately and runs to a terminal outcome.
    pub fn submit(
        &self,
        session: &str,
        user_id: Option<String>,
        currency: Currency,
        draft: OrderDraft,
    ) -> Result<watch::Receiver<PaymentAttemptState>, CheckoutError> {
        let draft = draft.validated().map_err(CheckoutError::Invalid)?;
        let cart = self.carts.snapshot(session);
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut attempts = lock(&self.attempts);
        if let Some(existing) = attempts.get(session) {
            if !existing.state.borrow().accepts_submission() {
                return Err(CheckoutError::AttemptInFlight);
            }
        }

        let (tx, rx) = watch::channel(PaymentAttemptState::ProcessingPrimary);
        tracing::info!(session, gateway = %self.config.primary_gateway, "checkout submitted");
        self.notifier.notify(
            ToastKind::Info,
            &format!("Processing payment via {}", self.config.primary_gateway),
        );

        let run = AttemptRun {
            config: self.config.clone(),
            orders: Arc::clone(&self.orders),
            carts: Arc::clone(&self.carts),
            sampler: Arc::clone(&self.sampler),
            notifier: Arc::clone(&self.notifier),
            session: session.to_string(),
            user_id: user_id.unwrap_or_else(|| "guest".into()),
            currency,
            draft,
            cart,
            state: tx.clone(),
        };
        let task = tokio::spawn(run.run());
        attempts.insert(session.to_string(), Attempt { state: tx, task });
        Ok(rx)
    }

    /// Tears down a session's attempt, aborting its timers so nothing can
    /// mutate state after the session is gone.
    pub fn abandon(&self, session: &str) {
        if let Some(attempt) = lock(&self.attempts).remove(session) {
            attempt.task.abort();
            tracing::debug!(session, "checkout attempt abandoned");
        }
    }
}

struct AttemptRun {
    config: CheckoutConfig,
    orders: Arc<dyn CreateOrder>,
    carts: Arc<dyn CartAccess>,
    sampler: Arc<dyn GatewaySampler>,
    notifier: Arc<dyn NotificationSink>,
    session: String,
    user_id: String,
    currency: Currency,
    draft: OrderDraft,
    cart: Cart,
    state: watch::Sender<PaymentAttemptState>,
}

impl AttemptRun {
    async fn run(self) {
        tokio::time::sleep(self.config.primary_delay).await;

        if self.sampler.primary_fails() {
            self.transition(PaymentAttemptState::FailedPrimary);
            self.notifier
                .notify(ToastKind::Error, "Gateway timeout. Retrying with fallback");
            tracing::warn!(
                session = %self.session,
                gateway = %self.config.primary_gateway,
                "primary gateway failed, scheduling failover"
            );
            tokio::time::sleep(self.config.fallback_delay).await;
            self.transition(PaymentAttemptState::ProcessingFallback);
            self.notifier.notify(
                ToastKind::Info,
                &format!("Failover to {}", self.config.fallback_gateway),
            );
            self.finalize(self.config.fallback_gateway).await;
        } else {
            self.finalize(self.config.primary_gateway).await;
        }
    }

    async fn finalize(&self, gateway: PaymentGateway) {
        let subtotal = self.cart.total();
        let order = NewOrder {
            user_id: self.user_id.clone(),
            items: self.cart.items().to_vec(),
            total: subtotal.apply_rate(self.config.tax_rate).amount(),
            currency: self.currency,
            shipping_address: self.draft.shipping_address(),
            payment_gateway: gateway,
        };

        match self.orders.create_order(order).await {
            Ok(created) => {
                // Strictly after successful creation, and only here.
                self.carts.clear(&self.session);
                tracing::info!(session = %self.session, order_id = %created.id, %gateway, "checkout succeeded");
                self.notifier
                    .notify(ToastKind::Success, &format!("Order {} confirmed", created.id));
                self.transition(PaymentAttemptState::Success { order_id: created.id });
            }
            Err(error) => {
                tracing::error!(session = %self.session, %error, "order creation failed");
                self.notifier.notify(
                    ToastKind::Error,
                    "Payment could not be completed. Please try again.",
                );
                self.transition(PaymentAttemptState::Idle);
            }
        }
    }

    fn transition(&self, next: PaymentAttemptState) {
        tracing::debug!(session = %self.session, state = ?next, "payment state transition");
        self.state.send_replace(next);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
