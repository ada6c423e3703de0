//! Display settings: active currency and the mock FX table.

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::value_objects::Currency;
use crate::store::settings::Settings;

pub fn routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(set_currency))
}

#[derive(Debug, Deserialize)]
struct UpdateSettingsRequest {
    currency: Currency,
}

async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.snapshot())
}

async fn set_currency(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Json<Settings> {
    Json(state.settings.set_currency(req.currency))
}
