//! Authentication Middleware

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::db;
use crate::moderation;
use crate::permissions::Role;

use super::error::AuthError;
use super::jwt::validate_access_token;

/// Authenticated identity injected into request extensions.
///
/// Carries the request-scoped identity explicitly instead of ambient
/// session state; every handler that needs the current identity takes this.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID. `None` for the shared guest identity.
    pub id: Option<Uuid>,
    /// Username (`guest` for guest sessions).
    pub username: String,
    /// Session role.
    pub role: Role,
    /// Whether this is an unpersisted guest session.
    pub guest: bool,
}

/// Middleware to require authentication.
///
/// Extracts the Bearer token, validates it, and injects [`AuthUser`] into
/// request extensions. For registered users the account is reloaded so a
/// ban or retirement issued after login takes effect immediately.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = validate_access_token(token, &state.config.jwt_secret)?;

    let auth_user = if claims.guest {
        AuthUser {
            id: None,
            username: claims.username,
            role: Role::Student,
            guest: true,
        }
    } else {
        let user_id: Uuid = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;

        let user = db::find_user_by_id(&state.db, user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.active {
            let reason = moderation::find_ban(&state.db, &user.username)
                .await?
                .map_or_else(|| "account disabled".to_string(), |ban| ban.reason);
            return Err(AuthError::Banned(reason));
        }

        AuthUser {
            id: Some(user.id),
            username: user.username,
            // The session role comes from the token, not the row: the
            // legacy passphrase path can elevate a session beyond the
            // stored role, and role changes apply from the next login.
            role: claims.role,
            guest: false,
        }
    };

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extractor for the authenticated identity in handlers.
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)
    }
}
