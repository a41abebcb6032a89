//! Ban registry queries.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;

use super::types::Ban;

/// Record (or refresh) a ban for a username.
///
/// The primary key on `username` keeps this at one active ban per user;
/// re-banning updates the reason in place instead of failing.
pub async fn upsert_ban(
    pool: &SqlitePool,
    username: &str,
    reason: &str,
    banned_by: &str,
) -> sqlx::Result<Ban> {
    sqlx::query_as::<_, Ban>(
        r"
        INSERT INTO bans (username, reason, banned_by, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (username) DO UPDATE SET
            reason = excluded.reason,
            banned_by = excluded.banned_by,
            created_at = excluded.created_at
        RETURNING *
        ",
    )
    .bind(username)
    .bind(reason)
    .bind(banned_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        error!(query = "upsert_ban", username = %username, error = %e, "Database query failed");
        e
    })
}

/// Look up the active ban for a username, if any.
pub async fn find_ban(pool: &SqlitePool, username: &str) -> sqlx::Result<Option<Ban>> {
    sqlx::query_as::<_, Ban>("SELECT * FROM bans WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(query = "find_ban", username = %username, error = %e, "Database query failed");
            e
        })
}

/// Remove a ban. Returns whether one existed.
pub async fn delete_ban(pool: &SqlitePool, username: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM bans WHERE username = ?")
        .bind(username)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(query = "delete_ban", username = %username, error = %e, "Database query failed");
            e
        })?;

    Ok(result.rows_affected() > 0)
}

/// List active bans, most recent first.
pub async fn list_bans(pool: &SqlitePool) -> sqlx::Result<Vec<Ban>> {
    sqlx::query_as::<_, Ban>("SELECT * FROM bans ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(query = "list_bans", error = %e, "Database query failed");
            e
        })
}
