//! Server Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::permissions::Role;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// `SQLite` connection URL
    pub database_url: String,

    /// JWT signing secret
    pub jwt_secret: String,

    /// JWT access token expiry in seconds (default: 3600 = 1 hour)
    pub jwt_access_expiry: i64,

    /// Directory for uploaded file payloads
    pub upload_dir: PathBuf,

    /// Maximum file upload size in bytes (default: 10MB)
    pub max_upload_size: usize,

    /// Maximum number of items returned by a content listing (default: 100)
    pub list_cap: i64,

    /// Legacy shared passphrase that elevates an existing user to the
    /// teacher role at login (see `legacy_role_passphrases`)
    pub teacher_passphrase: Option<String>,

    /// Legacy shared passphrase that elevates an existing user to the
    /// creator role at login
    pub creator_passphrase: Option<String>,

    /// Enable the legacy shared-passphrase elevation path at login.
    /// Off by default; durable role grants go through the admin API.
    pub legacy_role_passphrases: bool,

    /// Restrict edits of shared singleton content (site settings, word of
    /// the day) to staff. Off by default, matching the historical behavior
    /// where any signed-in member could edit them.
    pub restrict_shared_edits: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:aula.db?mode=rwc".into()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_access_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10 * 1024 * 1024), // 10MB
            list_cap: env::var("LIST_CAP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            teacher_passphrase: env::var("TEACHER_PASSPHRASE").ok(),
            creator_passphrase: env::var("CREATOR_PASSPHRASE").ok(),
            legacy_role_passphrases: env::var("LEGACY_ROLE_PASSPHRASES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            restrict_shared_edits: env::var("RESTRICT_SHARED_EDITS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Resolve the elevated role for a legacy passphrase login attempt.
    ///
    /// Returns `None` when the path is disabled or the secret matches
    /// neither passphrase. The creator passphrase wins if both are set to
    /// the same value.
    #[must_use]
    pub fn passphrase_role(&self, secret: &str) -> Option<Role> {
        if !self.legacy_role_passphrases {
            return None;
        }
        if self.creator_passphrase.as_deref() == Some(secret) {
            return Some(Role::Creator);
        }
        if self.teacher_passphrase.as_deref() == Some(secret) {
            return Some(Role::Teacher);
        }
        None
    }

    /// Create a default configuration for testing.
    ///
    /// Uses an in-memory database; the legacy passphrase path is enabled so
    /// the compatibility behavior stays covered by tests.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            database_url: "sqlite::memory:".into(),
            jwt_secret: "test-secret".into(),
            jwt_access_expiry: 3600,
            upload_dir: PathBuf::from("uploads"),
            max_upload_size: 10 * 1024 * 1024,
            list_cap: 100,
            teacher_passphrase: Some("teacher-pass".into()),
            creator_passphrase: Some("creator-pass".into()),
            legacy_role_passphrases: true,
            restrict_shared_edits: false,
        }
    }
}
