//! Query result cache
//!
//! Results are kept per query key for a fixed freshness window. Within the
//! window a lookup returns the stored value; afterwards the entry is stale and
//! the caller is expected to query again and [`QueryCache::insert`] the new
//! result. A result whose query started before the one that produced the
//! current entry is discarded, so a slow, superseded query never overwrites a
//! newer answer. Freshness is counted from when a result was stored, not from
//! when its query started.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Identifies a cached query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// All posts, newest first
    AllPosts,
    /// A single post lookup
    PostById(String),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::AllPosts => write!(f, "posts"),
            QueryKey::PostById(id) => write!(f, "post:{}", id),
        }
    }
}

/// A cached value, when its query started and when it completed
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    started_at: Instant,
    fetched_at: Instant,
}

/// Per-key cache with a freshness window and a bound on the number of keys
#[derive(Debug)]
pub struct QueryCache<V> {
    ttl: Duration,
    max_entries: usize,
    entries: RwLock<HashMap<QueryKey, CacheEntry<V>>>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The cached value for `key`, if it is still fresh
    pub async fn get_fresh(&self, key: &QueryKey) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            tracing::debug!("Cache hit: {}", key);
            Some(entry.value.clone())
        } else {
            tracing::debug!("Cache stale: {}", key);
            None
        }
    }

    /// Store the result of a query that started at `started_at`
    ///
    /// Returns the value held for `key` afterwards, which is the existing one
    /// when it came from a more recently started query. Stale entries are
    /// dropped, and when the cache is full the entry fetched longest ago makes
    /// room for a new key.
    pub async fn insert(&self, key: QueryKey, value: V, started_at: Instant) -> V {
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(&key) {
            if existing.started_at > started_at {
                tracing::debug!("Discarding superseded result: {}", key);
                return existing.value.clone();
            }
        }

        let ttl = self.ttl;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);

        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!("Cache full, evicting {}", oldest);
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                started_at,
                fetched_at: Instant::now(),
            },
        );
        value
    }

    /// Number of entries, fresh or stale
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_entry_is_returned() {
        let cache = QueryCache::new(Duration::from_secs(60), 16);
        assert_eq!(cache.get_fresh(&QueryKey::AllPosts).await, None::<u32>);

        cache.insert(QueryKey::AllPosts, 7, Instant::now()).await;
        assert_eq!(cache.get_fresh(&QueryKey::AllPosts).await, Some(7));
        assert_eq!(
            cache.get_fresh(&QueryKey::PostById("x".to_string())).await,
            None
        );
    }

    #[tokio::test]
    async fn test_expired_entry_is_not_returned() {
        let cache = QueryCache::new(Duration::ZERO, 16);
        cache.insert(QueryKey::AllPosts, 1, Instant::now()).await;
        assert_eq!(cache.get_fresh(&QueryKey::AllPosts).await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_newer_result_replaces_entry() {
        let cache = QueryCache::new(Duration::from_secs(60), 16);
        let first = Instant::now();
        cache.insert(QueryKey::AllPosts, 1, first).await;
        let held = cache
            .insert(QueryKey::AllPosts, 2, first + Duration::from_millis(5))
            .await;
        assert_eq!(held, 2);
        assert_eq!(cache.get_fresh(&QueryKey::AllPosts).await, Some(2));
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let cache = QueryCache::new(Duration::from_secs(60), 16);
        let slow_start = Instant::now();
        let fast_start = slow_start + Duration::from_millis(10);

        cache.insert(QueryKey::AllPosts, "fast", fast_start).await;
        let held = cache.insert(QueryKey::AllPosts, "slow", slow_start).await;

        assert_eq!(held, "fast");
        assert_eq!(cache.get_fresh(&QueryKey::AllPosts).await, Some("fast"));
    }

    #[tokio::test]
    async fn test_freshness_counts_from_completion() {
        let cache = QueryCache::new(Duration::from_secs(5), 16);
        let slow_start = Instant::now()
            .checked_sub(Duration::from_secs(10))
            .unwrap();
        cache.insert(QueryKey::AllPosts, 1, slow_start).await;
        assert_eq!(cache.get_fresh(&QueryKey::AllPosts).await, Some(1));
    }

    #[tokio::test]
    async fn test_stale_entries_are_dropped_on_insert() {
        let cache = QueryCache::new(Duration::ZERO, 16);
        for id in ["a", "b", "c"] {
            cache
                .insert(QueryKey::PostById(id.to_string()), None::<u32>, Instant::now())
                .await;
        }
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_full_cache_evicts_oldest() {
        let cache = QueryCache::new(Duration::from_secs(60), 2);
        let key = |id: &str| QueryKey::PostById(id.to_string());

        for (id, value) in [("a", 1), ("b", 2), ("c", 3)] {
            cache.insert(key(id), value, Instant::now()).await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get_fresh(&key("a")).await, None);
        assert_eq!(cache.get_fresh(&key("b")).await, Some(2));
        assert_eq!(cache.get_fresh(&key("c")).await, Some(3));

        // Refreshing a held key does not evict another
        cache.insert(key("b"), 4, Instant::now()).await;
        assert_eq!(cache.get_fresh(&key("c")).await, Some(3));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(QueryKey::AllPosts.to_string(), "posts");
        assert_eq!(QueryKey::PostById("a".to_string()).to_string(), "post:a");
    }
}
