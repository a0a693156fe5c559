//! This module defines the shared application state handed to the service layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::database::init::DbPool;
use crate::progression::achievements::DreamStats;

// Type aliases to reduce clippy::type_complexity noise and clarify intent.
type UserStatsCacheEntry = (Instant, DreamStats);
type UserStatsCache = HashMap<i64, UserStatsCacheEntry>;

/// The central, shared state of the application: the connection pool plus
/// short-lived per-user caches for derived aggregates.
pub struct AppState {
    /// The connection pool for the SQLite database.
    pub db: DbPool,
    /// Cached aggregate stats per user with TTL; invalidated on any write.
    pub stats_cache: Arc<RwLock<UserStatsCache>>,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            stats_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Invalidate a user's cached stats after a journal or lesson write.
    pub async fn invalidate_user_cache(&self, user_id: i64) {
        self.stats_cache.write().await.remove(&user_id);
    }
}
