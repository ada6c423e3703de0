//! HTTP surface: per-resource route modules merged into one router.

use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::checkout::orchestrator::{
    CartAccess, CheckoutConfig, CreateOrder, GatewaySampler, PaymentOrchestrator,
};
use crate::notify::{BroadcastSink, NotificationSink};
use crate::seed;
use crate::store::{CartStore, CatalogStore, KeyValueStore, OrderStore, SettingsStore, UserDirectory};

pub mod admin;
pub mod auth;
pub mod carts;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod settings;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub orders: Arc<OrderStore>,
    pub carts: Arc<CartStore>,
    pub users: Arc<UserDirectory>,
    pub settings: Arc<SettingsStore>,
    pub checkout: Arc<PaymentOrchestrator>,
    pub notifier: Arc<BroadcastSink>,
}

impl AppState {
    /// Wires the seeded stores and the payment orchestrator together. The
    /// sampler and persistence adapter are injected so tests can pin the
    /// gateway outcome and inspect saved state.
    pub fn new(
        config: CheckoutConfig,
        sampler: Arc<dyn GatewaySampler>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        let products = seed::products();
        let seeded_orders = seed::orders(&products);

        let catalog = Arc::new(CatalogStore::new(products));
        let orders = Arc::new(OrderStore::new(seeded_orders));
        let carts = Arc::new(CartStore::new(Arc::clone(&kv)));
        let users = Arc::new(UserDirectory::new(seed::users()));
        let settings = Arc::new(SettingsStore::new(kv));
        let notifier = Arc::new(BroadcastSink::new(64));

        let checkout = Arc::new(PaymentOrchestrator::new(
            config,
            Arc::clone(&orders) as Arc<dyn CreateOrder>,
            Arc::clone(&carts) as Arc<dyn CartAccess>,
            sampler,
            Arc::clone(&notifier) as Arc<dyn NotificationSink>,
        ));

        Self {
            catalog,
            orders,
            carts,
            users,
            settings,
            checkout,
            notifier,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::routes())
        .merge(catalog::routes())
        .merge(orders::routes())
        .merge(carts::routes())
        .merge(checkout::routes())
        .merge(settings::routes())
        .merge(admin::routes());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Nexus E-Commerce API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/login",
            "products": "/api/products",
            "orders": "/api/orders",
            "admin": "/api/admin/stats"
        }
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "timestamp": Utc::now() }))
}
