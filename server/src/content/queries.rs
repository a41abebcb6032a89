//! Content repository queries.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::error;
use uuid::Uuid;

use super::types::{ContentItem, ContentKind, ContentPayload};

/// Insert a content item owned by `owner`.
pub async fn create_content(
    pool: &SqlitePool,
    owner: &str,
    payload: &ContentPayload,
) -> sqlx::Result<ContentItem> {
    sqlx::query_as::<_, ContentItem>(
        r"
        INSERT INTO content (id, kind, owner, payload, rating, entry_date, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        ",
    )
    .bind(Uuid::now_v7())
    .bind(payload.kind().as_str())
    .bind(owner)
    .bind(sqlx::types::Json(payload))
    .bind(payload.rating_key())
    .bind(payload.date_key())
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        error!(query = "create_content", kind = %payload.kind(), error = %e, "Database query failed");
        e
    })
}

/// List items of a kind.
///
/// Ordering is by recency, except ratings (highest rating first) and
/// schedule entries (soonest date first). Listings are capped at `limit`.
pub async fn list_content(
    pool: &SqlitePool,
    kind: ContentKind,
    limit: i64,
) -> sqlx::Result<Vec<ContentItem>> {
    // UUIDv7 ids are time-ordered, so `id` breaks same-timestamp ties
    // deterministically.
    let sql = match kind {
        ContentKind::Rating => {
            "SELECT * FROM content WHERE kind = ? ORDER BY rating DESC, id DESC LIMIT ?"
        }
        ContentKind::Schedule => {
            "SELECT * FROM content WHERE kind = ? ORDER BY entry_date ASC, id ASC LIMIT ?"
        }
        _ => "SELECT * FROM content WHERE kind = ? ORDER BY id DESC LIMIT ?",
    };

    sqlx::query_as::<_, ContentItem>(sql)
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!(query = "list_content", kind = %kind, error = %e, "Database query failed");
            e
        })
}

/// Find one item by kind and id.
pub async fn find_content(
    pool: &SqlitePool,
    kind: ContentKind,
    id: Uuid,
) -> sqlx::Result<Option<ContentItem>> {
    sqlx::query_as::<_, ContentItem>("SELECT * FROM content WHERE kind = ? AND id = ?")
        .bind(kind.as_str())
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(query = "find_content", kind = %kind, content_id = %id, error = %e, "Database query failed");
            e
        })
}

/// Delete one item. Returns whether it existed.
pub async fn delete_content(pool: &SqlitePool, kind: ContentKind, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM content WHERE kind = ? AND id = ?")
        .bind(kind.as_str())
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(query = "delete_content", kind = %kind, content_id = %id, error = %e, "Database query failed");
            e
        })?;

    Ok(result.rows_affected() > 0)
}
