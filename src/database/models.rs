//! Contains the data structures that map to database tables or query results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A user's core progression profile.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct Profile {
    pub user_id: i64,
    pub total_xp: i64,
    /// Stamped only when an achievement check persisted new unlocks.
    pub achievements_checked_at: Option<DateTime<Utc>>,
}

/// A journaled dream with its decoded tag and emotion lists.
#[derive(Debug, Clone, Serialize)]
pub struct DreamRecord {
    pub dream_id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub is_lucid: bool,
    pub tags: Vec<String>,
    pub emotions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Raw `dreams` row; the tag/emotion lists are stored as JSON text.
#[derive(FromRow, Debug, Clone)]
pub(crate) struct DreamRow {
    pub dream_id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub is_lucid: bool,
    pub tags: String,
    pub emotions: String,
    pub created_at: DateTime<Utc>,
}

impl From<DreamRow> for DreamRecord {
    fn from(row: DreamRow) -> Self {
        Self {
            dream_id: row.dream_id,
            user_id: row.user_id,
            title: row.title,
            body: row.body,
            is_lucid: row.is_lucid,
            tags: serde_json::from_str(&row.tags).unwrap_or_default(),
            emotions: serde_json::from_str(&row.emotions).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

/// A single persisted achievement unlock.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
}

/// Fields for inserting a new dream; `created_at` is stamped at insert time.
#[derive(Debug, Clone, Default)]
pub struct NewDream {
    pub title: String,
    pub body: String,
    pub is_lucid: bool,
    pub tags: Vec<String>,
    pub emotions: Vec<String>,
}
