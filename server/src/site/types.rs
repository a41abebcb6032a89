//! Site singleton types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::permissions::GateError;

/// A keyed site setting (current book of the week, banner text, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
}

/// One word-of-the-day entry per calendar date.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WordOfDay {
    pub entry_date: NaiveDate,
    pub word: String,
    pub meaning: String,
    pub example: Option<String>,
    pub posted_by: String,
    pub updated_at: DateTime<Utc>,
}

/// Setting update body.
#[derive(Debug, Deserialize, Validate)]
pub struct PutSettingRequest {
    #[validate(length(min = 1, max = 2000, message = "Value must be 1-2000 characters"))]
    pub value: String,
}

/// Word-of-the-day update body. Omitting `date` targets today.
#[derive(Debug, Deserialize, Validate)]
pub struct PutWordRequest {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100, message = "Word must be 1-100 characters"))]
    pub word: String,
    #[validate(length(min = 1, max = 1000, message = "Meaning must be 1-1000 characters"))]
    pub meaning: String,
    #[validate(length(max = 1000, message = "Example must be at most 1000 characters"))]
    pub example: Option<String>,
}

/// Query for reading a word-of-the-day entry.
#[derive(Debug, Deserialize)]
pub struct WordQuery {
    pub date: Option<NaiveDate>,
}

/// Site singleton error type.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// No value stored under the key or date.
    #[error("{0} not found")]
    NotFound(String),

    /// Gate rejection.
    #[error(transparent)]
    Gate(#[from] GateError),

    /// Validation error.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Gate(e) => return (*e).into_response(),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Database(err) => {
                tracing::error!(error = %err, "Site database error");
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
