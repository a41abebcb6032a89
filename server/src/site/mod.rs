//! Shared singleton content: site settings (book of the week, banner) and
//! the word of the day. One row per key or date, upserted in the store.

mod handlers;
mod queries;
mod types;

use axum::routing::get;
use axum::Router;

use crate::api::AppState;

pub use queries::{find_setting, find_word, upsert_setting, upsert_word};
pub use types::{SiteError, SiteSetting, WordOfDay};

/// Create the site router. Mounted behind `require_auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings/{key}",
            get(handlers::get_setting).put(handlers::put_setting),
        )
        .route(
            "/word-of-day",
            get(handlers::get_word).put(handlers::put_word),
        )
}
