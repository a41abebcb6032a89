//! Content Repository
//!
//! Generic CRUD over every user-generated kind: chat messages, homework,
//! materials, essays, book ratings, article links, announcements, and
//! schedule entries.

mod handlers;
mod queries;
mod types;

use axum::routing::get;
use axum::Router;

use crate::api::AppState;

pub use queries::{create_content, delete_content, find_content, list_content};
pub use types::{ContentError, ContentItem, ContentKind, ContentPayload};

/// Create the content router. Mounted behind `require_auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{kind}", get(handlers::list).post(handlers::create))
        .route("/{kind}/{id}", axum::routing::delete(handlers::delete))
}
