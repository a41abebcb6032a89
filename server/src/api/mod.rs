//! API Router and Application State
//!
//! Central routing configuration and shared state.

use axum::{
    extract::DefaultBodyLimit, extract::State, middleware::from_fn_with_state, routing::get, Json,
    Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    admin, auth,
    config::Config,
    content,
    files::{self, FileStore},
    permissions::Policy,
    site,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Server configuration
    pub config: Arc<Config>,
    /// Attachment storage
    pub files: FileStore,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(db: SqlitePool, config: Config, files: FileStore) -> Self {
        Self {
            db,
            config: Arc::new(config),
            files,
        }
    }

    /// Gate policy derived from configuration.
    #[must_use]
    pub fn policy(&self) -> Policy {
        Policy {
            restrict_shared_edits: self.config.restrict_shared_edits,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Body limit leaves headroom over the payload cap for multipart
    // framing; the upload handler enforces the exact cap.
    let body_limit = state.config.max_upload_size + 64 * 1024;

    // Protected routes that require authentication. The admin router
    // additionally applies its own staff check.
    let protected_routes = Router::new()
        .nest("/api/content", content::router())
        .nest("/api/site", site::router())
        .nest("/api/files", files::router())
        .nest("/api/admin", admin::router())
        .layer(from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Auth routes (pass state for middleware)
        .nest("/auth", auth::router(state.clone()))
        // Portal routes
        .merge(protected_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        // Body limit sized for file uploads (default is 2MB)
        .layer(DefaultBodyLimit::max(body_limit))
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
    /// Whether the legacy passphrase login path is enabled
    legacy_passphrases: bool,
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        legacy_passphrases: state.config.legacy_role_passphrases,
    })
}
