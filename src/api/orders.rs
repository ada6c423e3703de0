//! Order listing and the Order Creation Service endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::AppState;
use crate::checkout::orchestrator::CreateOrder;
use crate::domain::aggregates::order::{NewOrder, Order};
use crate::error::AppError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders", get(list_orders).post(create_order))
}

async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.orders.list())
}

/// Creates the order record or fails as a whole; there is no partial
/// success.
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state
        .orders
        .create_order(req)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(order)))
}
