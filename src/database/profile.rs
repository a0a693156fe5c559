//! This module contains all functions for interacting with the `profiles` table.
//! It is the single source of truth for per-user XP totals.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::instrument;

use super::init::DbPool;
use super::models::Profile;

/// Retrieves a user's profile from the database. Creates one if it doesn't exist.
#[instrument(level = "debug", skip(pool))]
pub async fn get_or_create_profile(pool: &DbPool, user_id: i64) -> Result<Profile, sqlx::Error> {
    sqlx::query("INSERT INTO profiles (user_id) VALUES (?) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;
    sqlx::query_as::<_, Profile>(
        "SELECT user_id, total_xp, achievements_checked_at FROM profiles WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Adds to a user's XP total within a transaction.
/// The increment form keeps concurrent awards from losing updates.
pub async fn add_xp(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    amount: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO profiles (user_id) VALUES (?) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("UPDATE profiles SET total_xp = total_xp + ? WHERE user_id = ?")
        .bind(amount)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Stamps the last achievement evaluation time. Written only in the same
/// transaction that persisted new unlocks.
pub async fn set_achievements_checked_at(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE profiles SET achievements_checked_at = ? WHERE user_id = ?")
        .bind(at)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
