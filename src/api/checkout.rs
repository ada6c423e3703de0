//! Checkout submission and status polling.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::checkout::draft::OrderDraft;
use crate::checkout::orchestrator::PaymentAttemptState;
use crate::error::AppError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkout/:session", post(submit).get(status))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(flatten)]
    draft: OrderDraft,
}

/// Accepts a checkout submission and kicks off the payment attempt. The
/// response carries the machine's current state; progress is polled via
/// `GET`.
async fn submit(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<PaymentAttemptState>), AppError> {
    let rx = state.checkout.submit(
        &session,
        req.user_id,
        state.settings.currency(),
        req.draft,
    )?;
    let current = rx.borrow().clone();
    Ok((StatusCode::ACCEPTED, Json(current)))
}

async fn status(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Json<PaymentAttemptState> {
    Json(state.checkout.status(&session))
}
