//! JWT Token Generation and Validation
//!
//! HS256 access tokens. Sessions are stateless: everything about the
//! current identity lives in the token claims, nothing is persisted.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{AuthError, AuthResult};
use crate::permissions::Role;

/// Subject value used for guest tokens, which have no user row.
pub const GUEST_SUBJECT: &str = "guest";

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID as UUID string, or [`GUEST_SUBJECT`].
    pub sub: String,
    /// Username at issue time.
    pub username: String,
    /// Session role. May exceed the stored role when issued through the
    /// legacy passphrase elevation path.
    pub role: Role,
    /// Whether this is an unpersisted guest identity.
    #[serde(default)]
    pub guest: bool,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued at (Unix timestamp).
    pub iat: i64,
}

/// Issue an access token for a registered user.
pub fn issue_user_token(
    user_id: Uuid,
    username: &str,
    role: Role,
    secret: &str,
    expiry_seconds: i64,
) -> AuthResult<String> {
    issue_token(&user_id.to_string(), username, role, false, secret, expiry_seconds)
}

/// Issue an access token for the shared guest identity.
pub fn issue_guest_token(secret: &str, expiry_seconds: i64) -> AuthResult<String> {
    issue_token(
        GUEST_SUBJECT,
        GUEST_SUBJECT,
        Role::Student,
        true,
        secret,
        expiry_seconds,
    )
}

fn issue_token(
    sub: &str,
    username: &str,
    role: Role,
    guest: bool,
    secret: &str,
    expiry_seconds: i64,
) -> AuthResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        username: username.to_string(),
        role,
        guest,
        exp: (now + Duration::seconds(expiry_seconds)).timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Validate and decode an access token.
pub fn validate_access_token(token: &str, secret: &str) -> AuthResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}
