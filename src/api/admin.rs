//! Admin dashboard endpoints. These mutate the same product collection the
//! storefront catalog reads.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::api::AppState;
use crate::domain::aggregates::product::Product;
use crate::error::AppError;
use crate::notify::{NotificationSink, ToastKind};
use crate::store::catalog::{NewProduct, ProductPatch};
use crate::store::orders::StatsSnapshot;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/products", post(create_product))
        .route("/admin/products/:id", axum::routing::put(update_product).delete(delete_product))
        .route("/admin/stats", get(stats))
}

async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<NewProduct>,
) -> (StatusCode, Json<Product>) {
    let product = state.catalog.insert(req);
    state
        .notifier
        .notify(ToastKind::Success, "Product created successfully");
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .catalog
        .update(&id, patch)
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    state
        .notifier
        .notify(ToastKind::Success, "Product updated successfully");
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.catalog.remove(&id) {
        state
            .notifier
            .notify(ToastKind::Success, "Product deleted successfully");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Product not found".into()))
    }
}

async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.orders.stats(state.users.count()))
}
