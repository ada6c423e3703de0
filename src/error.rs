//! API error type. Everything that leaves a handler as an error turns into
//! a JSON `{"message": ...}` body with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

use crate::checkout::orchestrator::CheckoutError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Validation failed")]
    Validation(HashMap<String, String>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized(message) => reply(StatusCode::UNAUTHORIZED, &message),
            AppError::NotFound(message) => reply(StatusCode::NOT_FOUND, &message),
            AppError::BadRequest(message) => reply(StatusCode::BAD_REQUEST, &message),
            AppError::Conflict(message) => reply(StatusCode::CONFLICT, &message),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": "Validation failed", "errors": errors })),
            )
                .into_response(),
            AppError::Internal(error) => {
                tracing::error!("internal server error: {error:#}");
                reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(error: CheckoutError) -> Self {
        match error {
            CheckoutError::Invalid(fields) => AppError::Validation(fields),
            CheckoutError::EmptyCart => AppError::BadRequest("Cart is empty".into()),
            CheckoutError::AttemptInFlight => {
                AppError::Conflict("A payment attempt is already in flight".into())
            }
        }
    }
}

fn reply(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}
