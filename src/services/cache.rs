//! Generic TTL cache helper utilities.
//! These helpers wrap the common pattern of (Instant, Value) stored in a
//! HashMap behind an `RwLock`, as used by the per-user caches in `AppState`.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Attempt to fetch a cloned value from a `(Instant, V)` TTL cache.
/// Returns `None` if the key is absent or the entry is expired. Expired entries
/// are eagerly removed.
pub async fn get_with_ttl<K, V>(
    map: &RwLock<HashMap<K, (Instant, V)>>,
    key: &K,
    ttl: Duration,
) -> Option<V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // Fast path: read lock
    if let Some((ts, val)) = map.read().await.get(key).cloned() {
        if ts.elapsed() < ttl {
            return Some(val);
        }
    } else {
        return None;
    }
    // Entry expired: acquire write lock to remove (avoid holding write unless needed)
    let mut write = map.write().await;
    if let Some((ts, _)) = write.get(key)
        && ts.elapsed() >= ttl
    {
        write.remove(key);
    }
    None
}

/// Insert / overwrite a value in the TTL cache with current timestamp.
pub async fn insert<K, V>(map: &RwLock<HashMap<K, (Instant, V)>>, key: K, value: V)
where
    K: Eq + Hash,
{
    map.write().await.insert(key, (Instant::now(), value));
}
