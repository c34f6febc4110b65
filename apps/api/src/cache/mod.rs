//! Cache-aside layer fronting the database and the LLM.
//!
//! Every cached read goes through [`CacheAside::get_or_compute`] with a key from
//! [`keys`] and a [`TtlTier`]; every mutation invalidates through the same builders.

pub mod aside;
pub mod keys;
pub mod memory;
pub mod redis_store;
pub mod store;
pub mod tier;

use std::sync::Arc;

use tracing::{info, warn};

pub use aside::CacheAside;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{CacheStore, StoreError};
pub use tier::TtlTier;

/// Picks the store backend: Redis when a URL is configured, otherwise in-process.
pub fn build_cache(redis_url: Option<&str>) -> Result<CacheAside, StoreError> {
    let store: Arc<dyn CacheStore> = match redis_url {
        Some(url) => {
            info!("Cache backend: redis");
            Arc::new(RedisStore::open(url)?)
        }
        None => {
            warn!("REDIS_URL not set, using in-process cache (not shared across instances)");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(CacheAside::new(store))
}
