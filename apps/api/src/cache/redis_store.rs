//! Redis-backed store for production.
//!
//! The connection is opened on first use rather than at startup, so the service
//! boots (and serves uncached) while Redis is down. Opening is bounded: one
//! attempt, capped by `CONNECT_TIMEOUT`, made by one request at a time. Requests
//! that arrive while an attempt is running, or during the cooldown after a failed
//! one, get `StoreError::Unavailable` immediately instead of waiting.
//! Once connected, `ConnectionManager` reconnects on its own.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Client as RedisClient;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::cache::store::{CacheStore, StoreError};

const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);
const RECONNECT_COOLDOWN: Duration = Duration::from_secs(10);

#[derive(Default)]
struct ConnState {
    conn: Option<ConnectionManager>,
    /// Set after a failed connect; no new attempt before this instant.
    retry_after: Option<Instant>,
}

pub struct RedisStore {
    client: RedisClient,
    state: Mutex<ConnState>,
    connecting: tokio::sync::Mutex<()>,
}

impl RedisStore {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            state: Mutex::new(ConnState::default()),
            connecting: tokio::sync::Mutex::new(()),
        }
    }

    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        Ok(Self::new(RedisClient::open(redis_url)?))
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, ConnState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("redis state lock poisoned".to_string()))
    }

    /// The established connection, or an error saying why there is none right now.
    fn ready(&self) -> Result<Option<ConnectionManager>, StoreError> {
        let state = self.lock_state()?;
        if let Some(conn) = &state.conn {
            return Ok(Some(conn.clone()));
        }
        match state.retry_after {
            Some(at) if Instant::now() < at => Err(StoreError::Unavailable(
                "redis unreachable, waiting before reconnecting".to_string(),
            )),
            _ => Ok(None),
        }
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        if let Some(conn) = self.ready()? {
            return Ok(conn);
        }

        let _attempt = self.connecting.try_lock().map_err(|_| {
            StoreError::Unavailable("redis connection attempt in progress".to_string())
        })?;
        // Another request may have connected between `ready` and `try_lock`.
        if let Some(conn) = self.ready()? {
            return Ok(conn);
        }

        let opened = tokio::time::timeout(
            CONNECT_TIMEOUT,
            ConnectionManager::new_with_backoff(self.client.clone(), 2, 100, 0),
        )
        .await;

        let mut state = self.lock_state()?;
        match opened {
            Ok(Ok(conn)) => {
                info!("Redis connection established");
                state.conn = Some(conn.clone());
                state.retry_after = None;
                Ok(conn)
            }
            Ok(Err(e)) => {
                warn!(
                    "Redis connect failed, retrying in {}s: {e}",
                    RECONNECT_COOLDOWN.as_secs()
                );
                state.retry_after = Some(Instant::now() + RECONNECT_COOLDOWN);
                Err(e.into())
            }
            Err(_) => {
                warn!(
                    "Redis connect timed out after {}ms, retrying in {}s",
                    CONNECT_TIMEOUT.as_millis(),
                    RECONNECT_COOLDOWN.as_secs()
                );
                state.retry_after = Some(Instant::now() + RECONNECT_COOLDOWN);
                Err(StoreError::Unavailable("redis connect timed out".to_string()))
            }
        }
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, expire_secs: u64) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(expire_secs)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn del(&self, keys: &[String]) -> Result<(), StoreError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection().await?;
        redis::cmd("DEL")
            .arg(keys)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = redis::cmd("KEYS").arg(pattern).query_async(&mut conn).await?;
        Ok(keys)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
