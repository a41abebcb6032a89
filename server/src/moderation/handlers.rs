//! Moderation HTTP handlers, mounted under the admin router.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::queries;
use super::types::{Ban, BanRequest, ModerationError};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::db;
use crate::permissions::{check, Action};

/// Ban a user.
///
/// The ban registry blocks the username's future logins; the account row
/// is deactivated rather than deleted so their content keeps an owner.
///
/// POST /api/admin/users/{username}/ban
#[tracing::instrument(skip(state, body))]
pub async fn ban_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
    Json(body): Json<BanRequest>,
) -> Result<Json<Ban>, ModerationError> {
    body.validate()
        .map_err(|e| ModerationError::Validation(e.to_string()))?;

    check(
        auth_user.role,
        &auth_user.username,
        &Action::BanUser { target: &username },
        &state.policy(),
    )?;

    let user = db::find_user_by_username(&state.db, &username)
        .await?
        .ok_or(ModerationError::UserNotFound)?;

    let ban = queries::upsert_ban(&state.db, &user.username, &body.reason, &auth_user.username)
        .await?;
    db::set_user_active(&state.db, &user.username, false).await?;

    tracing::info!(
        username = %user.username,
        banned_by = %auth_user.username,
        "User banned"
    );

    Ok(Json(ban))
}

/// Lift a ban and reactivate the account.
///
/// DELETE /api/admin/users/{username}/ban
#[tracing::instrument(skip(state))]
pub async fn unban_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
) -> Result<StatusCode, ModerationError> {
    check(
        auth_user.role,
        &auth_user.username,
        &Action::UnbanUser,
        &state.policy(),
    )?;

    if !queries::delete_ban(&state.db, &username).await? {
        return Err(ModerationError::BanNotFound);
    }
    db::set_user_active(&state.db, &username, true).await?;

    tracing::info!(
        username = %username,
        unbanned_by = %auth_user.username,
        "User unbanned"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// List active bans. Staff-gated by the admin router middleware.
///
/// GET /api/admin/bans
pub async fn list_bans(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ban>>, ModerationError> {
    let bans = queries::list_bans(&state.db).await?;
    Ok(Json(bans))
}
