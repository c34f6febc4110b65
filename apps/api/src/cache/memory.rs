//! In-process store. Used by tests and as the fallback when no `REDIS_URL` is set.
//!
//! Deadlines use `tokio::time::Instant`, so a paused test clock drives expiry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use globset::{GlobBuilder, GlobMatcher};
use tokio::time::Instant;

use crate::cache::store::{CacheStore, StoreError};

/// Expired entries nobody reads again are dropped on every Nth write.
const SWEEP_EVERY: usize = 64;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries held in memory, expired or not.
    #[cfg(test)]
    fn stored(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, expire_secs: u64) -> Result<(), StoreError> {
        let now = Instant::now();
        let expires_at = now + Duration::from_secs(expire_secs);
        let mut entries = self.lock()?;
        if self.writes.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            entries.retain(|_, e| e.is_live(now));
        }
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn del(&self, keys: &[String]) -> Result<(), StoreError> {
        let mut entries = self.lock()?;
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let matcher = compile_pattern(pattern)?;
        let now = Instant::now();
        let mut entries = self.lock()?;
        entries.retain(|_, e| e.is_live(now));

        let mut matched: Vec<String> = entries
            .keys()
            .filter(|k| matcher.is_match(k.as_str()))
            .cloned()
            .collect();
        matched.sort();
        Ok(matched)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Compiles a Redis-style key glob. Keys are not paths, so `*` crosses every character.
fn compile_pattern(pattern: &str) -> Result<GlobMatcher, StoreError> {
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| StoreError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_writes_sweep_expired_entries_that_are_never_read() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store.set(&format!("short:{i}"), "1", 1).await.unwrap();
        }
        tokio::time::advance(Duration::from_secs(2)).await;

        for i in 0..SWEEP_EVERY {
            store.set(&format!("long:{i}"), "1", 600).await.unwrap();
        }

        assert_eq!(store.stored(), store.len());
        assert!(store.stored() <= SWEEP_EVERY);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("resume:u1", "\"hello\"", 60).await.unwrap();
        assert_eq!(
            store.get("resume:u1").await.unwrap().as_deref(),
            Some("\"hello\"")
        );
        assert_eq!(store.get("resume:u2").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_deadline() {
        let store = MemoryStore::new();
        store.set("k", "1", 10).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_resets_expiry() {
        let store = MemoryStore::new();
        store.set("k", "1", 10).await.unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;
        store.set("k", "2", 10).await.unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_del_ignores_absent_keys() {
        let store = MemoryStore::new();
        store.set("a", "1", 60).await.unwrap();
        store
            .del(&["a".to_string(), "missing".to_string()])
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_keys_glob_crosses_colons() {
        let store = MemoryStore::new();
        for key in [
            "improve:u1:summary:abc",
            "improve:u1:skills:def",
            "improve:u10:summary:abc",
            "improve:coverLetter:u1:body:abc",
        ] {
            store.set(key, "\"x\"", 60).await.unwrap();
        }

        let matched = store.keys("improve:u1:*").await.unwrap();
        assert_eq!(
            matched,
            vec![
                "improve:u1:skills:def".to_string(),
                "improve:u1:summary:abc".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_keys_question_mark_and_class() {
        let store = MemoryStore::new();
        for key in ["job:a1", "job:b1", "job:c22"] {
            store.set(key, "0", 60).await.unwrap();
        }
        assert_eq!(store.keys("job:??").await.unwrap().len(), 2);
        assert_eq!(store.keys("job:[ab]1").await.unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_skips_expired_entries() {
        let store = MemoryStore::new();
        store.set("a:1", "0", 5).await.unwrap();
        store.set("a:2", "0", 500).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        assert_eq!(store.keys("a:*").await.unwrap(), vec!["a:2".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_reported() {
        let store = MemoryStore::new();
        let err = store.keys("improve:[u1").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidPattern { .. }));
    }
}
