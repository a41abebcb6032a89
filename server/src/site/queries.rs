//! Site singleton queries.
//!
//! Settings and word-of-the-day rows are upserted through the store's own
//! conflict handling, so concurrent edits cannot create duplicates.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::error;

use super::types::{SiteSetting, WordOfDay};

/// Read one setting.
pub async fn find_setting(pool: &SqlitePool, key: &str) -> sqlx::Result<Option<SiteSetting>> {
    sqlx::query_as::<_, SiteSetting>("SELECT * FROM site_settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(query = "find_setting", key = %key, error = %e, "Database query failed");
            e
        })
}

/// Insert or replace a setting.
pub async fn upsert_setting(
    pool: &SqlitePool,
    key: &str,
    value: &str,
    updated_by: &str,
) -> sqlx::Result<SiteSetting> {
    sqlx::query_as::<_, SiteSetting>(
        r"
        INSERT INTO site_settings (key, value, updated_by, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (key) DO UPDATE SET
            value = excluded.value,
            updated_by = excluded.updated_by,
            updated_at = excluded.updated_at
        RETURNING *
        ",
    )
    .bind(key)
    .bind(value)
    .bind(updated_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        error!(query = "upsert_setting", key = %key, error = %e, "Database query failed");
        e
    })
}

/// Read the word for a date.
pub async fn find_word(pool: &SqlitePool, date: NaiveDate) -> sqlx::Result<Option<WordOfDay>> {
    sqlx::query_as::<_, WordOfDay>("SELECT * FROM word_of_day WHERE entry_date = ?")
        .bind(date)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!(query = "find_word", date = %date, error = %e, "Database query failed");
            e
        })
}

/// Insert or replace the word for a date.
pub async fn upsert_word(
    pool: &SqlitePool,
    date: NaiveDate,
    word: &str,
    meaning: &str,
    example: Option<&str>,
    posted_by: &str,
) -> sqlx::Result<WordOfDay> {
    sqlx::query_as::<_, WordOfDay>(
        r"
        INSERT INTO word_of_day (entry_date, word, meaning, example, posted_by, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (entry_date) DO UPDATE SET
            word = excluded.word,
            meaning = excluded.meaning,
            example = excluded.example,
            posted_by = excluded.posted_by,
            updated_at = excluded.updated_at
        RETURNING *
        ",
    )
    .bind(date)
    .bind(word)
    .bind(meaning)
    .bind(example)
    .bind(posted_by)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        error!(query = "upsert_word", date = %date, error = %e, "Database query failed");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test]
    async fn test_setting_upsert_replaces_value(pool: SqlitePool) {
        assert!(find_setting(&pool, "book_of_week").await.unwrap().is_none());

        upsert_setting(&pool, "book_of_week", "Holes", "amy")
            .await
            .unwrap();
        let setting = upsert_setting(&pool, "book_of_week", "Hatchet", "bob")
            .await
            .unwrap();

        assert_eq!(setting.value, "Hatchet");
        assert_eq!(setting.updated_by, "bob");

        let found = find_setting(&pool, "book_of_week").await.unwrap().unwrap();
        assert_eq!(found.value, "Hatchet");
    }

    #[sqlx::test]
    async fn test_one_word_per_date(pool: SqlitePool) {
        let date: NaiveDate = "2026-08-04".parse().unwrap();

        upsert_word(&pool, date, "ardent", "very enthusiastic", None, "amy")
            .await
            .unwrap();
        let word = upsert_word(&pool, date, "keen", "eager", Some("a keen reader"), "amy")
            .await
            .unwrap();

        assert_eq!(word.word, "keen");
        assert_eq!(word.example.as_deref(), Some("a keen reader"));

        // The replacement wins; no second row exists for the date.
        let found = find_word(&pool, date).await.unwrap().unwrap();
        assert_eq!(found.word, "keen");

        let other: NaiveDate = "2026-08-05".parse().unwrap();
        assert!(find_word(&pool, other).await.unwrap().is_none());
    }
}
