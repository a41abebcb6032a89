//! Content Types
//!
//! Every user-generated item is one row in the `content` table: a kind
//! tag, an owning username, and a kind-specific payload. The payload is a
//! tagged sum type so each kind stays strongly typed on the Rust side.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::permissions::GateError;

// ============================================================================
// Kinds
// ============================================================================

/// Category of user-generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Chat,
    Homework,
    Material,
    Essay,
    Rating,
    Article,
    Announcement,
    Schedule,
}

impl ContentKind {
    /// Lowercase name, matching the stored kind tag and URL segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Homework => "homework",
            Self::Material => "material",
            Self::Essay => "essay",
            Self::Rating => "rating",
            Self::Article => "article",
            Self::Announcement => "announcement",
            Self::Schedule => "schedule",
        }
    }

    /// All kinds, for iteration in tests.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Chat,
            Self::Homework,
            Self::Material,
            Self::Essay,
            Self::Rating,
            Self::Article,
            Self::Announcement,
            Self::Schedule,
        ]
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Self::Chat),
            "homework" => Ok(Self::Homework),
            "material" => Ok(Self::Material),
            "essay" => Ok(Self::Essay),
            "rating" => Ok(Self::Rating),
            "article" => Ok(Self::Article),
            "announcement" => Ok(Self::Announcement),
            "schedule" => Ok(Self::Schedule),
            other => Err(ContentError::UnknownKind(other.to_string())),
        }
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Kind-specific payload, serialized as tagged JSON in the `payload` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentPayload {
    /// Chat room message.
    Chat { text: String },
    /// Shared homework post, optionally with an uploaded attachment.
    Homework {
        title: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_id: Option<Uuid>,
    },
    /// Learning material.
    Material {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_id: Option<Uuid>,
    },
    /// Uploaded essay.
    Essay { title: String, file_id: Uuid },
    /// Book rating (1-5 stars).
    Rating {
        book_title: String,
        rating: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        review: Option<String>,
    },
    /// Shared discussion article link.
    Article {
        title: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    /// Staff announcement.
    Announcement { text: String },
    /// Class schedule entry.
    Schedule {
        title: String,
        date: NaiveDate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    },
}

impl ContentPayload {
    /// The kind tag of this payload.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Chat { .. } => ContentKind::Chat,
            Self::Homework { .. } => ContentKind::Homework,
            Self::Material { .. } => ContentKind::Material,
            Self::Essay { .. } => ContentKind::Essay,
            Self::Rating { .. } => ContentKind::Rating,
            Self::Article { .. } => ContentKind::Article,
            Self::Announcement { .. } => ContentKind::Announcement,
            Self::Schedule { .. } => ContentKind::Schedule,
        }
    }

    /// The denormalized rating sort key, for rating payloads.
    #[must_use]
    pub const fn rating_key(&self) -> Option<i64> {
        match self {
            Self::Rating { rating, .. } => Some(*rating),
            _ => None,
        }
    }

    /// The denormalized date sort key, for schedule payloads.
    #[must_use]
    pub const fn date_key(&self) -> Option<NaiveDate> {
        match self {
            Self::Schedule { date, .. } => Some(*date),
            _ => None,
        }
    }

    /// Check kind-specific field constraints.
    pub fn validate(&self) -> Result<(), ContentError> {
        let err = |msg: &str| Err(ContentError::Validation(msg.to_string()));

        match self {
            Self::Chat { text } | Self::Announcement { text } => {
                if text.is_empty() || text.chars().count() > 2000 {
                    return err("Text must be 1-2000 characters");
                }
            }
            Self::Homework { title, body, .. } => {
                if title.is_empty() || title.chars().count() > 200 {
                    return err("Title must be 1-200 characters");
                }
                if body.chars().count() > 10_000 {
                    return err("Body must be at most 10000 characters");
                }
            }
            Self::Material { title, .. } | Self::Essay { title, .. } => {
                if title.is_empty() || title.chars().count() > 200 {
                    return err("Title must be 1-200 characters");
                }
            }
            Self::Rating {
                book_title, rating, ..
            } => {
                if book_title.is_empty() || book_title.chars().count() > 200 {
                    return err("Book title must be 1-200 characters");
                }
                if !(1..=5).contains(rating) {
                    return err("Rating must be between 1 and 5");
                }
            }
            Self::Article { title, url, .. } => {
                if title.is_empty() || title.chars().count() > 200 {
                    return err("Title must be 1-200 characters");
                }
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return err("URL must start with http:// or https://");
                }
            }
            Self::Schedule { title, .. } => {
                if title.is_empty() || title.chars().count() > 200 {
                    return err("Title must be 1-200 characters");
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Items
// ============================================================================

/// A stored content item.
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    pub id: Uuid,
    /// Owning username. Kept as a plain string so items survive owner
    /// retirement (orphaned content is allowed).
    pub owner: String,
    #[serde(flatten)]
    pub payload: ContentPayload,
    pub created_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for ContentItem {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let sqlx::types::Json(payload) =
            row.try_get::<sqlx::types::Json<ContentPayload>, _>("payload")?;

        Ok(Self {
            id: row.try_get("id")?,
            owner: row.try_get("owner")?,
            payload,
            created_at: row.try_get("created_at")?,
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Content repository error type.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Unrecognized kind segment in the URL.
    #[error("Unknown content kind: {0}")]
    UnknownKind(String),

    /// Payload tag does not match the URL kind.
    #[error("Payload kind {got} does not match {expected}")]
    KindMismatch {
        expected: ContentKind,
        got: ContentKind,
    },

    /// No such item for the kind.
    #[error("No {kind} item with id {id}")]
    NotFound { kind: ContentKind, id: Uuid },

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

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::UnknownKind(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_KIND"),
            Self::KindMismatch { .. } => (StatusCode::BAD_REQUEST, "KIND_MISMATCH"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "CONTENT_NOT_FOUND"),
            Self::Gate(e) => return (*e).into_response(),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Database(err) => {
                tracing::error!(error = %err, "Content database error");
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
