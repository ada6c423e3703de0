//! Session-scoped cart endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::aggregates::cart::{Cart, CartLine};
use crate::domain::value_objects::Currency;
use crate::error::AppError;
use crate::notify::{NotificationSink, ToastKind};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/cart/:session",
        get(get_cart).post(add_to_cart).put(update_quantity).delete(clear_cart),
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView {
    items: Vec<CartLine>,
    subtotal: Decimal,
    currency: Currency,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let subtotal = cart.total();
        Self {
            items: cart.items().to_vec(),
            subtotal: subtotal.amount(),
            currency: subtotal.currency(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest {
    product_id: String,
    #[serde(default)]
    variant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateQuantityRequest {
    product_id: String,
    quantity: i64,
    #[serde(default)]
    variant_id: Option<String>,
}

async fn get_cart(State(state): State<AppState>, Path(session): Path<String>) -> Json<CartView> {
    Json(state.carts.snapshot(&session).into())
}

async fn add_to_cart(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(req): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartView>), AppError> {
    let product = state
        .catalog
        .get(&req.product_id)
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    let name = product.name.clone();
    let cart = state.carts.add_item(&session, product, req.variant_id);
    state
        .notifier
        .notify(ToastKind::Success, &format!("Added {name} to cart"));
    Ok((StatusCode::CREATED, Json(cart.into())))
}

async fn update_quantity(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    let cart = state.carts.update_quantity(
        &session,
        &req.product_id,
        req.quantity,
        req.variant_id.as_deref(),
    );
    Json(cart.into())
}

async fn clear_cart(State(state): State<AppState>, Path(session): Path<String>) -> StatusCode {
    state.carts.clear(&session);
    StatusCode::NO_CONTENT
}
