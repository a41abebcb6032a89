//! Site singleton HTTP handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use validator::Validate;

use super::queries;
use super::types::{PutSettingRequest, PutWordRequest, SiteError, SiteSetting, WordOfDay, WordQuery};
use crate::api::AppState;
use crate::auth::AuthUser;
use crate::permissions::{check, Action};

/// Read a setting.
///
/// GET /api/site/settings/{key}
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SiteSetting>, SiteError> {
    let setting = queries::find_setting(&state.db, &key)
        .await?
        .ok_or_else(|| SiteError::NotFound(format!("setting '{key}'")))?;

    Ok(Json(setting))
}

/// Write a setting.
///
/// Historically open to any signed-in member; the shared-edit policy flag
/// can restrict this to staff.
///
/// PUT /api/site/settings/{key}
#[tracing::instrument(skip(state, body), fields(username = %auth_user.username))]
pub async fn put_setting(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(key): Path<String>,
    Json(body): Json<PutSettingRequest>,
) -> Result<Json<SiteSetting>, SiteError> {
    body.validate()
        .map_err(|e| SiteError::Validation(e.to_string()))?;
    if key.is_empty() || key.len() > 100 {
        return Err(SiteError::Validation(
            "Key must be 1-100 characters".to_string(),
        ));
    }

    check(
        auth_user.role,
        &auth_user.username,
        &Action::EditSharedContent,
        &state.policy(),
    )?;

    let setting =
        queries::upsert_setting(&state.db, &key, &body.value, &auth_user.username).await?;

    Ok(Json(setting))
}

/// Read the word of the day. Defaults to today.
///
/// GET /api/site/word-of-day?date=YYYY-MM-DD
pub async fn get_word(
    State(state): State<AppState>,
    Query(query): Query<WordQuery>,
) -> Result<Json<WordOfDay>, SiteError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let word = queries::find_word(&state.db, date)
        .await?
        .ok_or_else(|| SiteError::NotFound(format!("word of the day for {date}")))?;

    Ok(Json(word))
}

/// Set the word of the day for a date (today when omitted).
///
/// One row per date; a second write for the same date replaces the first.
///
/// PUT /api/site/word-of-day
#[tracing::instrument(skip(state, body), fields(username = %auth_user.username))]
pub async fn put_word(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(body): Json<PutWordRequest>,
) -> Result<Json<WordOfDay>, SiteError> {
    body.validate()
        .map_err(|e| SiteError::Validation(e.to_string()))?;

    check(
        auth_user.role,
        &auth_user.username,
        &Action::EditSharedContent,
        &state.policy(),
    )?;

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let word = queries::upsert_word(
        &state.db,
        date,
        &body.word,
        &body.meaning,
        body.example.as_deref(),
        &auth_user.username,
    )
    .await?;

    Ok(Json(word))
}
