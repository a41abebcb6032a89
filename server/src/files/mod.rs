//! Attachment storage: opaque-id file uploads on local disk.

mod handlers;
mod store;

use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

pub use handlers::{UploadError, UploadedFile};
pub use store::FileStore;

/// Create the files router. Mounted behind `require_auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::upload))
        .route("/{id}", get(handlers::download))
}
