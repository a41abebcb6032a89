//! File Upload Handling
//!
//! Uploads go to local disk under an opaque id; only the metadata row and
//! the id cross the API boundary.

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::db;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during file upload operations.
#[derive(Debug, Error)]
pub enum UploadError {
    /// File not found.
    #[error("File not found")]
    NotFound,

    /// File too large.
    #[error("File too large (max: {max_size} bytes)")]
    TooLarge {
        /// Maximum allowed size in bytes.
        max_size: usize,
    },

    /// No file provided.
    #[error("No file provided")]
    NoFile,

    /// Invalid filename.
    #[error("Invalid filename")]
    InvalidFilename,

    /// Malformed multipart body.
    #[error("Invalid upload: {0}")]
    Multipart(String),

    /// Storage error.
    #[error("Storage error")]
    Storage(#[from] std::io::Error),

    /// Database error.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::NotFound => (StatusCode::NOT_FOUND, "FILE_NOT_FOUND"),
            Self::TooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            Self::NoFile => (StatusCode::BAD_REQUEST, "NO_FILE"),
            Self::InvalidFilename => (StatusCode::BAD_REQUEST, "INVALID_FILENAME"),
            Self::Multipart(_) => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"),
            Self::Storage(err) => {
                tracing::error!(error = %err, "Attachment storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            Self::Database(err) => {
                tracing::error!(error = %err, "Attachment database error");
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

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a successful file upload.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    /// Opaque attachment reference.
    pub id: Uuid,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// Upload a file.
///
/// Expects a multipart form with a `file` field. Returns the opaque id
/// that content payloads reference.
///
/// POST /api/files
#[tracing::instrument(skip(state, multipart), fields(username = %auth_user.username))]
pub async fn upload(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFile>), UploadError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(sanitize_filename)
            .filter(|name| !name.is_empty())
            .ok_or(UploadError::InvalidFilename)?;

        let mime_type = field.content_type().map_or_else(
            || {
                mime_guess::from_path(&filename)
                    .first_or_octet_stream()
                    .to_string()
            },
            ToString::to_string,
        );

        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        if bytes.len() > state.config.max_upload_size {
            return Err(UploadError::TooLarge {
                max_size: state.config.max_upload_size,
            });
        }

        let id = Uuid::now_v7();
        state.files.save(id, &bytes).await?;

        let record = db::create_file_record(
            &state.db,
            id,
            &filename,
            &mime_type,
            bytes.len() as i64,
            &auth_user.username,
        )
        .await?;

        tracing::info!(file_id = %id, size = bytes.len(), "File uploaded");

        return Ok((
            StatusCode::CREATED,
            Json(UploadedFile {
                id: record.id,
                filename: record.filename,
                mime_type: record.mime_type,
                size: record.size_bytes,
            }),
        ));
    }

    Err(UploadError::NoFile)
}

/// Download a file by its opaque id.
///
/// GET /api/files/{id}
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, UploadError> {
    let record = db::find_file_by_id(&state.db, id)
        .await?
        .ok_or(UploadError::NotFound)?;

    let bytes = state.files.read(id).await?.ok_or(UploadError::NotFound)?;

    let headers = [
        (header::CONTENT_TYPE, record.mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", record.filename),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Strip path components and control characters from a client filename.
fn sanitize_filename(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .take(255)
        .collect()
}
