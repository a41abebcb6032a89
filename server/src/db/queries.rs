//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).
//!
//! All query functions include error context logging to aid debugging.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;

use super::models::{FileRecord, User};
use crate::permissions::Role;

/// Log and return a database error with context.
macro_rules! db_error {
    ($query:expr) => {
        |e| {
            error!(query = $query, error = %e, "Database query failed");
            e
        }
    };
    ($query:expr, $($field:tt)+) => {
        |e| {
            error!(query = $query, $($field)+, error = %e, "Database query failed");
            e
        }
    };
}

// ============================================================================
// User Queries
// ============================================================================

/// Find user by ID.
pub async fn find_user_by_id(pool: &SqlitePool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_id", user_id = %id))
}

/// Find user by username.
pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_username", username = %username))
}

/// Create a new user with the default student role.
///
/// Username uniqueness is enforced by the UNIQUE constraint; a duplicate
/// surfaces as a unique-violation database error rather than a pre-check,
/// so concurrent registrations cannot race.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> sqlx::Result<User> {
    let now = Utc::now();
    sqlx::query_as::<_, User>(
        r"
        INSERT INTO users (id, username, password_hash, role, active, created_at, updated_at)
        VALUES (?, ?, ?, 'student', 1, ?, ?)
        RETURNING *
        ",
    )
    .bind(Uuid::now_v7())
    .bind(username)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List all users ordered by username.
pub async fn list_users(pool: &SqlitePool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
        .fetch_all(pool)
        .await
        .map_err(db_error!("list_users"))
}

/// Update a user's role. Returns the updated row, or `None` if the
/// username is unknown.
pub async fn update_user_role(
    pool: &SqlitePool,
    username: &str,
    role: Role,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET role = ?, updated_at = ? WHERE username = ? RETURNING *",
    )
    .bind(role)
    .bind(Utc::now())
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("update_user_role", username = %username))
}

/// Set a user's active flag. Returns whether a row was touched.
pub async fn set_user_active(
    pool: &SqlitePool,
    username: &str,
    active: bool,
) -> sqlx::Result<bool> {
    let result = sqlx::query("UPDATE users SET active = ?, updated_at = ? WHERE username = ?")
        .bind(active)
        .bind(Utc::now())
        .bind(username)
        .execute(pool)
        .await
        .map_err(db_error!("set_user_active", username = %username))?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// File Queries
// ============================================================================

/// Record uploaded file metadata.
pub async fn create_file_record(
    pool: &SqlitePool,
    id: Uuid,
    filename: &str,
    mime_type: &str,
    size_bytes: i64,
    uploaded_by: &str,
) -> sqlx::Result<FileRecord> {
    sqlx::query_as::<_, FileRecord>(
        r"
        INSERT INTO files (id, filename, mime_type, size_bytes, uploaded_by, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        ",
    )
    .bind(id)
    .bind(filename)
    .bind(mime_type)
    .bind(size_bytes)
    .bind(uploaded_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_file_record", file_id = %id))
}

/// Find file metadata by ID.
pub async fn find_file_by_id(pool: &SqlitePool, id: Uuid) -> sqlx::Result<Option<FileRecord>> {
    sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_file_by_id", file_id = %id))
}

/// Map a database error onto a domain error when it is a UNIQUE violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.is_unique_violation()
    )
}
