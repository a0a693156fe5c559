//! Dream journal persistence and the aggregate counts the engines consume.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::instrument;

use super::init::DbPool;
use super::models::{DreamRecord, DreamRow, NewDream};

/// Inserts a dream inside an open transaction and returns its row id.
pub async fn insert_dream(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    dream: &NewDream,
    created_at: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let tags = serde_json::to_string(&dream.tags).unwrap_or_else(|_| "[]".into());
    let emotions = serde_json::to_string(&dream.emotions).unwrap_or_else(|_| "[]".into());
    let result = sqlx::query(
        "INSERT INTO dreams (user_id, title, body, is_lucid, tags, emotions, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(&dream.title)
    .bind(&dream.body)
    .bind(dream.is_lucid)
    .bind(tags)
    .bind(emotions)
    .bind(created_at)
    .execute(&mut **tx)
    .await?;
    Ok(result.last_insert_rowid())
}

/// All of a user's dreams, newest first.
#[instrument(level = "debug", skip(pool))]
pub async fn get_dreams(pool: &DbPool, user_id: i64) -> Result<Vec<DreamRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DreamRow>(
        "SELECT dream_id, user_id, title, body, is_lucid, tags, emotions, created_at
         FROM dreams WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(DreamRecord::from).collect())
}

/// `(total, lucid)` dream counts for a user in one query.
pub async fn count_dreams(pool: &DbPool, user_id: i64) -> Result<(i64, i64), sqlx::Error> {
    sqlx::query_as::<_, (i64, i64)>(
        "SELECT COUNT(*), COALESCE(SUM(is_lucid), 0) FROM dreams WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Entry timestamps only, for the streak engine.
pub async fn get_dream_timestamps(
    pool: &DbPool,
    user_id: i64,
) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
    let rows: Vec<(DateTime<Utc>,)> =
        sqlx::query_as("SELECT created_at FROM dreams WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(ts,)| ts).collect())
}
