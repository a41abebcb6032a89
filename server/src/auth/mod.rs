//! Authentication Service
//!
//! Identity resolution: registration, password login, the legacy
//! shared-passphrase elevation path, guest sessions, and the `require_auth`
//! middleware.

mod error;
mod handlers;
pub mod jwt;
mod middleware;
mod password;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};

use crate::api::AppState;

pub use error::{AuthError, AuthResult};
pub use middleware::{require_auth, AuthUser};

/// Create the authentication router.
///
/// Public routes (no auth required):
/// - POST /register - Register a new member
/// - POST /login - Login with username/password or role passphrase
/// - POST /guest - Obtain the shared guest identity
///
/// Protected routes (auth required):
/// - POST /logout - Acknowledge token discard
/// - GET /me - Get current identity
pub fn router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/guest", post(handlers::guest));

    let protected_routes = Router::new()
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::me))
        .layer(axum_middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(protected_routes)
}
