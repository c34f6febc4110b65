//! Cache-aside access layer.
//!
//! Read path: check the store, on miss run the producer and store its value with
//! the tier's expiry. Write path: mutation handlers invalidate the keys their
//! read path uses, immediately after the write commits.
//!
//! The store is an optimisation, never a dependency. Store failures degrade reads
//! to "always miss" and are logged; they never reach the caller. Producer errors
//! are the caller's and pass through untouched.
//!
//! There is no single-flight: concurrent misses on one key each run the producer,
//! and the last write wins.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::cache::store::CacheStore;
use crate::cache::tier::TtlTier;

#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Returns the cached value at `key`, or runs `producer`, caches its value for
    /// `tier` and returns it.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        tier: TtlTier,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if key.is_empty() {
            warn!("Empty cache key, bypassing cache");
            return producer().await;
        }

        match self.store.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    debug!("Cache hit for key: {key}");
                    return Ok(value);
                }
                Err(e) => warn!("Discarding undecodable cache entry {key}: {e}"),
            },
            Ok(None) => debug!("Cache miss for key: {key}"),
            Err(e) => {
                warn!(
                    "Cache read failed for key {key} ({}): {e}; serving uncached",
                    self.store.backend()
                );
                return producer().await;
            }
        }

        let value = producer().await?;
        self.fill(key, &value, tier).await;
        Ok(value)
    }

    async fn fill<T: Serialize>(&self, key: &str, value: &T, tier: TtlTier) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Value for cache key {key} is not serializable: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw, tier.as_secs()).await {
            warn!("Cache write failed for key {key}: {e}");
        }
    }

    /// Deletes one entry. Absent keys and store failures are not errors.
    pub async fn invalidate(&self, key: &str) {
        match self.store.del(&[key.to_string()]).await {
            Ok(()) => info!("Cache invalidated for key: {key}"),
            Err(e) => warn!("Failed to invalidate cache key {key}: {e}"),
        }
    }

    pub async fn invalidate_all<I, K>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.invalidate(key.as_ref()).await;
        }
    }

    /// Deletes every key matching a glob. Enumeration and deletion are two separate
    /// store calls; a key written in between survives until its own expiry.
    pub async fn invalidate_pattern(&self, pattern: &str) {
        let keys = match self.store.keys(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to list cache keys for pattern {pattern}: {e}");
                return;
            }
        };
        if keys.is_empty() {
            return;
        }
        match self.store.del(&keys).await {
            Ok(()) => info!(
                "Invalidated {} cache keys matching pattern: {pattern}",
                keys.len()
            ),
            Err(e) => warn!("Failed to invalidate cache pattern {pattern}: {e}"),
        }
    }

    pub async fn invalidate_patterns<I, P>(&self, patterns: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        for pattern in patterns {
            self.invalidate_pattern(pattern.as_ref()).await;
        }
    }
}
