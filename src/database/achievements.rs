//! Persistence for the per-user unlocked achievement set.
//!
//! The `(user_id, achievement_id)` primary key enforces the append-only,
//! at-most-once invariant at the storage layer; re-inserts are no-ops.

use chrono::{DateTime, Duration, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::instrument;

use super::init::DbPool;
use super::models::UnlockedAchievement;

/// Ids of everything the user has already unlocked.
pub async fn get_unlocked_ids(pool: &DbPool, user_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT achievement_id FROM user_achievements WHERE user_id = ?")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Full unlock rows for a user, newest first.
#[instrument(level = "debug", skip(pool))]
pub async fn get_unlocked(
    pool: &DbPool,
    user_id: i64,
) -> Result<Vec<UnlockedAchievement>, sqlx::Error> {
    sqlx::query_as::<_, UnlockedAchievement>(
        "SELECT achievement_id, unlocked_at FROM user_achievements
         WHERE user_id = ? ORDER BY unlocked_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Inserts an unlock within a transaction. Returns `true` when the row is new.
pub async fn insert_unlock(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    achievement_id: &str,
    unlocked_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO user_achievements (user_id, achievement_id, unlocked_at) VALUES (?, ?, ?)
         ON CONFLICT (user_id, achievement_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(achievement_id)
    .bind(unlocked_at)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Unlocks whose `unlocked_at` falls inside the trailing window, newest first.
/// Consumers use this to decide whether an unlock celebration is still due.
pub async fn get_recent_unlocks(
    pool: &DbPool,
    user_id: i64,
    within_minutes: i64,
) -> Result<Vec<UnlockedAchievement>, sqlx::Error> {
    let cutoff = Utc::now() - Duration::minutes(within_minutes);
    sqlx::query_as::<_, UnlockedAchievement>(
        "SELECT achievement_id, unlocked_at FROM user_achievements
         WHERE user_id = ? AND unlocked_at >= ? ORDER BY unlocked_at DESC",
    )
    .bind(user_id)
    .bind(cutoff)
    .fetch_all(pool)
    .await
}
