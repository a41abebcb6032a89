//! Moderation Registry
//!
//! Tracks banned usernames and blocks their re-entry. Consulted by login
//! before any secret is validated and by `require_auth` on every request.

pub mod handlers;
mod queries;
mod types;

pub use queries::{delete_ban, find_ban, list_bans, upsert_ban};
pub use types::{Ban, BanRequest, ModerationError};
