//! Typed in-memory cache built on moka.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use docvault_core::config::cache::CacheConfig;

/// A bounded, TTL-evicting cache holding values of a single type.
///
/// Entries are cloned on read, so `T` should be cheap to clone or
/// wrapped in `Arc`. A miss and an expired entry are indistinguishable
/// to callers; both simply return `None`.
#[derive(Debug, Clone)]
pub struct ResultCache<T: Clone + Send + Sync + 'static> {
    cache: Cache<String, T>,
}

impl<T: Clone + Send + Sync + 'static> ResultCache<T> {
    /// Create a cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl_seconds))
            .build();
        Self { cache }
    }

    /// Look up a cached value.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.cache.get(key).await
    }

    /// Store a value under the cache's configured TTL.
    pub async fn insert(&self, key: String, value: T) {
        self.cache.insert(key, value).await;
    }

    /// Remove a single entry. Removing an absent key is a no-op.
    pub async fn invalidate(&self, key: &str) {
        self.cache.remove(key).await;
        debug!(key, "invalidated cache entry");
    }
}
