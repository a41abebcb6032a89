//! Authentication HTTP Handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::{AuthError, AuthResult};
use super::jwt::{issue_guest_token, issue_user_token};
use super::middleware::AuthUser;
use super::password::{hash_password, verify_password};
use crate::api::AppState;
use crate::db;
use crate::moderation;
use crate::permissions::Role;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username (3-32 lowercase alphanumeric + underscore).
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// Password (8-128 characters).
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Login request. `secret` is either the account password or, when the
/// legacy compatibility path is enabled, a shared role passphrase.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password or role passphrase.
    pub secret: String,
}

/// Authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Access token.
    pub access_token: String,
    /// Token expiry in seconds.
    pub expires_in: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
    /// Session role.
    pub role: Role,
}

/// Current identity response.
#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    /// User ID, absent for guests.
    pub id: Option<String>,
    /// Username.
    pub username: String,
    /// Session role.
    pub role: Role,
    /// Whether this is a guest session.
    pub guest: bool,
}

// ============================================================================
// Validation
// ============================================================================

/// Username validation regex (matches the DB convention).
static USERNAME_REGEX: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| {
        regex::Regex::new(r"^[a-z0-9_]{3,32}$").expect("username regex is valid")
    });

fn validate_username(username: &str) -> AuthResult<()> {
    if USERNAME_REGEX.is_match(username) {
        Ok(())
    } else {
        Err(AuthError::Validation(
            "Username must be 3-32 lowercase letters, digits, or underscores".to_string(),
        ))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new member.
///
/// Duplicate usernames surface as a UNIQUE violation from the store, so two
/// concurrent registrations of the same name cannot both succeed.
///
/// POST /auth/register
#[tracing::instrument(skip(state, body), fields(username = %body.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AuthResponse>)> {
    body.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;
    validate_username(&body.username)?;

    let password_hash = hash_password(&body.password).map_err(|_| AuthError::PasswordHash)?;

    let user = db::create_user(&state.db, &body.username, &password_hash)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                AuthError::DuplicateUsername
            } else {
                AuthError::Database(e)
            }
        })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let token = issue_user_token(
        user.id,
        &user.username,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_access_expiry,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token: token,
            expires_in: state.config.jwt_access_expiry,
            token_type: "Bearer".to_string(),
            role: user.role,
        }),
    ))
}

/// Login with username and password, or with a shared role passphrase when
/// the legacy compatibility path is enabled.
///
/// The ban registry is consulted before any secret is checked: a banned
/// username is rejected even with a correct password or passphrase.
///
/// POST /auth/login
#[tracing::instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>> {
    // Ban check first, regardless of the secret.
    if let Some(ban) = moderation::find_ban(&state.db, &body.username).await? {
        tracing::info!(username = %body.username, "Login rejected: banned");
        return Err(AuthError::Banned(ban.reason));
    }

    // Legacy shared-passphrase elevation: promotes an existing user to the
    // matching role for this session only.
    if let Some(elevated_role) = state.config.passphrase_role(&body.secret) {
        let user = db::find_user_by_username(&state.db, &body.username)
            .await?
            .filter(|u| u.active)
            .ok_or(AuthError::UnknownUser)?;

        tracing::info!(
            username = %user.username,
            role = %elevated_role,
            "Session elevated via legacy passphrase"
        );

        let token = issue_user_token(
            user.id,
            &user.username,
            elevated_role,
            &state.config.jwt_secret,
            state.config.jwt_access_expiry,
        )?;

        return Ok(Json(AuthResponse {
            access_token: token,
            expires_in: state.config.jwt_access_expiry,
            token_type: "Bearer".to_string(),
            role: elevated_role,
        }));
    }

    // Exact credential pair.
    let user = db::find_user_by_username(&state.db, &body.username)
        .await?
        .filter(|u| u.active)
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&body.secret, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let token = issue_user_token(
        user.id,
        &user.username,
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_access_expiry,
    )?;

    Ok(Json(AuthResponse {
        access_token: token,
        expires_in: state.config.jwt_access_expiry,
        token_type: "Bearer".to_string(),
        role: user.role,
    }))
}

/// Obtain the shared guest identity without credentials.
///
/// Guests act as a student-tier identity named `guest` and are never
/// written to the credential store.
///
/// POST /auth/guest
pub async fn guest(State(state): State<AppState>) -> AuthResult<Json<AuthResponse>> {
    let token = issue_guest_token(&state.config.jwt_secret, state.config.jwt_access_expiry)?;

    Ok(Json(AuthResponse {
        access_token: token,
        expires_in: state.config.jwt_access_expiry,
        token_type: "Bearer".to_string(),
        role: Role::Student,
    }))
}

/// Logout. Sessions are stateless, so this only acknowledges the client
/// discarding its token.
///
/// POST /auth/logout
pub async fn logout(auth_user: AuthUser) -> StatusCode {
    tracing::debug!(username = %auth_user.username, "Logout");
    StatusCode::NO_CONTENT
}

/// Get the current identity.
///
/// GET /auth/me
pub async fn me(auth_user: AuthUser) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        id: auth_user.id.map(|id| id.to_string()),
        username: auth_user.username,
        role: auth_user.role,
        guest: auth_user.guest,
    })
}
