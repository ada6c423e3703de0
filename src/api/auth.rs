//! Demo login: email lookup against the seed users, no password.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::error::AppError;
use crate::notify::{NotificationSink, ToastKind};
use crate::store::users::User;

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    user: User,
    token: String,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .users
        .find_by_email(&req.email)
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".into()))?;
    let token = state.users.issue_token(&user);
    tracing::info!(user_id = %user.id, "login");
    state
        .notifier
        .notify(ToastKind::Success, &format!("Welcome back, {}!", user.name));
    Ok(Json(LoginResponse { user, token }))
}
