//! Read-only catalog queries.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::AppState;
use crate::domain::aggregates::product::Product;
use crate::error::AppError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
        .route("/products/:id/related", get(related_products))
}

async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.list())
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    state
        .catalog
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
}

async fn related_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Product>> {
    Json(state.catalog.related(&id))
}
