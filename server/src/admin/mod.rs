//! Admin Module
//!
//! Staff-only surface for member moderation:
//! - user roster, role changes, account retirement
//! - bans and unbans (handlers in the moderation module)
//! - cross-cutting content deletion and announcements

pub mod handlers;
pub mod middleware;
pub mod types;

use axum::{
    middleware::from_fn,
    routing::{delete, get, post},
    Router,
};

use crate::api::AppState;
use crate::moderation;

pub use middleware::require_staff;
pub use types::AdminError;

/// Create the admin router.
///
/// Every route requires staff (applied via middleware); `require_auth`
/// is layered by the caller.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/{username}/role", post(handlers::change_role))
        .route("/users/{username}", delete(handlers::delete_user))
        .route(
            "/users/{username}/ban",
            post(moderation::handlers::ban_user).delete(moderation::handlers::unban_user),
        )
        .route("/bans", get(moderation::handlers::list_bans))
        .route("/content/{kind}/{id}", delete(handlers::delete_content))
        .route("/announcements", post(handlers::create_announcement))
        .layer(from_fn(require_staff))
}
