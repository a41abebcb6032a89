//! Content HTTP Handlers
//!
//! One uniform create/list/delete surface for every content kind.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::queries;
use super::types::{ContentError, ContentItem, ContentKind, ContentPayload};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::permissions::{check, Action};

/// Create a content item of the path kind.
///
/// Open to every authenticated identity, guests included; announcements
/// are the exception and require staff.
///
/// POST /api/content/{kind}
#[tracing::instrument(skip(state, payload), fields(username = %auth_user.username))]
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(kind): Path<String>,
    Json(payload): Json<ContentPayload>,
) -> Result<(StatusCode, Json<ContentItem>), ContentError> {
    let kind: ContentKind = kind.parse()?;

    if payload.kind() != kind {
        return Err(ContentError::KindMismatch {
            expected: kind,
            got: payload.kind(),
        });
    }
    payload.validate()?;

    let action = if kind == ContentKind::Announcement {
        Action::PostAnnouncement
    } else {
        Action::CreateContent
    };
    check(auth_user.role, &auth_user.username, &action, &state.policy())?;

    let item = queries::create_content(&state.db, &auth_user.username, &payload).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// List items of the path kind.
///
/// GET /api/content/{kind}
pub async fn list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<ContentItem>>, ContentError> {
    let kind: ContentKind = kind.parse()?;

    let items = queries::list_content(&state.db, kind, state.config.list_cap).await?;
    Ok(Json(items))
}

/// Delete one item.
///
/// Owners may delete their own items; staff may delete anyone's.
///
/// DELETE /api/content/{kind}/{id}
#[tracing::instrument(skip(state), fields(username = %auth_user.username))]
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ContentError> {
    let kind: ContentKind = kind.parse()?;

    let item = queries::find_content(&state.db, kind, id)
        .await?
        .ok_or(ContentError::NotFound { kind, id })?;

    check(
        auth_user.role,
        &auth_user.username,
        &Action::DeleteContent { owner: &item.owner },
        &state.policy(),
    )?;

    queries::delete_content(&state.db, kind, id).await?;

    tracing::info!(kind = %kind, content_id = %id, "Content deleted");

    Ok(StatusCode::NO_CONTENT)
}
