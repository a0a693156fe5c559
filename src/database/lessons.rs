//! Lesson completion tracking. Completions are idempotent per (user, lesson).

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};

use super::init::DbPool;

/// Records a completion. Returns `true` when the row is new, i.e. this is the
/// first time the user finished this lesson.
pub async fn record_completion(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    lesson_id: &str,
    completed_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO completed_lessons (user_id, lesson_id, completed_at) VALUES (?, ?, ?)
         ON CONFLICT (user_id, lesson_id) DO NOTHING",
    )
    .bind(user_id)
    .bind(lesson_id)
    .bind(completed_at)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// How many distinct lessons the user has completed.
pub async fn count_completions(pool: &DbPool, user_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM completed_lessons WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
