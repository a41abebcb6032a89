//! Admin module types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::db::User;
use crate::permissions::{GateError, Role};

/// Admin API error type.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Acting identity is not staff.
    #[error("Staff privileges required")]
    NotStaff,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

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

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotStaff => (StatusCode::FORBIDDEN, "NOT_STAFF"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Gate(e) => return (*e).into_response(),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Database(err) => {
                tracing::error!(error = %err, "Admin database error");
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

// Request types

/// Role change body.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: Role,
}

/// Announcement body.
#[derive(Debug, Deserialize, Validate)]
pub struct AnnouncementRequest {
    #[validate(length(min = 1, max = 2000, message = "Text must be 1-2000 characters"))]
    pub text: String,
}

// Response types

/// Roster entry for the admin user table.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            role: user.role,
            active: user.active,
            created_at: user.created_at,
        }
    }
}
