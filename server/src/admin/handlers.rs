//! Admin HTTP handlers: user management, cross-cutting content deletion,
//! and announcements. Ban handling lives in the moderation module.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use super::types::{AdminError, AnnouncementRequest, ChangeRoleRequest, UserSummary};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::content::{self, ContentItem, ContentKind, ContentPayload};
use crate::db;
use crate::permissions::{check, Action};

/// List all users for the admin roster.
///
/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<UserSummary>>, AdminError> {
    check(
        auth_user.role,
        &auth_user.username,
        &Action::ListUsers,
        &state.policy(),
    )?;

    let users = db::list_users(&state.db).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// Change a user's role. Takes effect from their next login.
///
/// POST /api/admin/users/{username}/role
#[tracing::instrument(skip(state, body), fields(actor = %auth_user.username))]
pub async fn change_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
    Json(body): Json<ChangeRoleRequest>,
) -> Result<Json<UserSummary>, AdminError> {
    check(
        auth_user.role,
        &auth_user.username,
        &Action::ChangeRole,
        &state.policy(),
    )?;

    let user = db::update_user_role(&state.db, &username, body.role)
        .await?
        .ok_or_else(|| AdminError::NotFound("User".to_string()))?;

    tracing::info!(
        username = %user.username,
        role = %user.role,
        changed_by = %auth_user.username,
        "Role changed"
    );

    Ok(Json(UserSummary::from(user)))
}

/// Retire a user's account. The row is deactivated, not deleted, so their
/// content keeps an owner. Self-targeting is rejected.
///
/// DELETE /api/admin/users/{username}
#[tracing::instrument(skip(state), fields(actor = %auth_user.username))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
) -> Result<StatusCode, AdminError> {
    check(
        auth_user.role,
        &auth_user.username,
        &Action::DeleteUser { target: &username },
        &state.policy(),
    )?;

    if !db::set_user_active(&state.db, &username, false).await? {
        return Err(AdminError::NotFound("User".to_string()));
    }

    tracing::info!(username = %username, retired_by = %auth_user.username, "Account retired");

    Ok(StatusCode::NO_CONTENT)
}

/// Delete any content item, regardless of ownership.
///
/// DELETE /api/admin/content/{kind}/{id}
#[tracing::instrument(skip(state), fields(actor = %auth_user.username))]
pub async fn delete_content(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AdminError> {
    check(
        auth_user.role,
        &auth_user.username,
        &Action::DeleteAnyContent,
        &state.policy(),
    )?;

    let kind: ContentKind = kind
        .parse()
        .map_err(|_| AdminError::Validation(format!("Unknown content kind: {kind}")))?;

    if !content::delete_content(&state.db, kind, id).await? {
        return Err(AdminError::NotFound(format!("{kind} item")));
    }

    tracing::info!(kind = %kind, content_id = %id, "Content removed by staff");

    Ok(StatusCode::NO_CONTENT)
}

/// Publish an announcement. Stored as an announcement content item owned
/// by the posting staff member.
///
/// POST /api/admin/announcements
#[tracing::instrument(skip(state, body), fields(actor = %auth_user.username))]
pub async fn create_announcement(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(body): Json<AnnouncementRequest>,
) -> Result<(StatusCode, Json<ContentItem>), AdminError> {
    body.validate()
        .map_err(|e| AdminError::Validation(e.to_string()))?;

    check(
        auth_user.role,
        &auth_user.username,
        &Action::PostAnnouncement,
        &state.policy(),
    )?;

    let payload = ContentPayload::Announcement { text: body.text };
    let item = content::create_content(&state.db, &auth_user.username, &payload).await?;

    Ok((StatusCode::CREATED, Json(item)))
}
