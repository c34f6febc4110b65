//! The key-value store boundary consumed by [`CacheAside`](super::CacheAside).
//!
//! Any backend that can get, set-with-expiry, delete and glob-list keys can sit
//! behind the cache. Values are opaque JSON text at this level.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid key pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Key-value store with per-entry expiry.
///
/// Carried by the cache as `Arc<dyn CacheStore>` so the backend is chosen at startup.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` at `key`, replacing any previous entry and its expiry.
    async fn set(&self, key: &str, value: &str, expire_secs: u64) -> Result<(), StoreError>;

    /// Deletes every listed key. Absent keys are ignored.
    async fn del(&self, keys: &[String]) -> Result<(), StoreError>;

    /// Lists live keys matching a Redis-style glob (`*`, `?`, `[...]`).
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;

    /// Short backend name used in log lines.
    fn backend(&self) -> &'static str;
}
