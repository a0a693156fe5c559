//! Database pool type and startup schema management.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// A type alias for the database connection pool (`Pool<Sqlite>`).
/// This is used throughout the application to provide a consistent, clear name
/// for the shared database connection state.
pub type DbPool = Pool<Sqlite>;

/// Opens the database at `url`, creating the file on first run.
pub async fn connect(url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Single-connection in-memory database, used by tests and ephemeral runs.
/// One connection only: every new in-memory connection would otherwise be a
/// fresh, empty database.
pub async fn connect_in_memory() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .connect_with(options)
        .await
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS profiles (
        user_id INTEGER PRIMARY KEY,
        total_xp INTEGER NOT NULL DEFAULT 0,
        achievements_checked_at TEXT
    )",
    "CREATE TABLE IF NOT EXISTS dreams (
        dream_id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        body TEXT NOT NULL DEFAULT '',
        is_lucid INTEGER NOT NULL DEFAULT 0,
        tags TEXT NOT NULL DEFAULT '[]',
        emotions TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_dreams_user_created ON dreams (user_id, created_at)",
    "CREATE TABLE IF NOT EXISTS completed_lessons (
        user_id INTEGER NOT NULL,
        lesson_id TEXT NOT NULL,
        completed_at TEXT NOT NULL,
        PRIMARY KEY (user_id, lesson_id)
    )",
    "CREATE TABLE IF NOT EXISTS user_achievements (
        user_id INTEGER NOT NULL,
        achievement_id TEXT NOT NULL,
        unlocked_at TEXT NOT NULL,
        PRIMARY KEY (user_id, achievement_id)
    )",
];

/// Creates the schema idempotently. Safe to run at every startup.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
