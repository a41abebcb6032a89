//! Moderation Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::permissions::GateError;

/// An active ban. At most one per username, enforced by the store.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ban {
    pub username: String,
    pub reason: String,
    pub banned_by: String,
    pub created_at: DateTime<Utc>,
}

/// Ban request body.
#[derive(Debug, Deserialize, Validate)]
pub struct BanRequest {
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

/// Moderation error type.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    /// Target user does not exist.
    #[error("User not found")]
    UserNotFound,

    /// No active ban for the username.
    #[error("Ban not found")]
    BanNotFound,

    /// Gate rejection (role or self-targeting).
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ModerationError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            Self::BanNotFound => (StatusCode::NOT_FOUND, "BAN_NOT_FOUND"),
            Self::Gate(e) => return (*e).into_response(),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Database(err) => {
                tracing::error!(error = %err, "Moderation database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(serde_json::json!({
            "error": code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
