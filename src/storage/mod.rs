//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::{StoreConfig, StoreType};
use crate::interfaces::{KvStore, Result};

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis;

pub use memory::InMemoryStore;

#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

/// Initialize the key-value store based on configuration.
pub async fn init_store(config: &StoreConfig) -> Result<Arc<dyn KvStore>> {
    match config.store_type {
        StoreType::Memory => {
            info!("Store: in-memory");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "redis")]
        StoreType::Redis => {
            info!("Store: redis at {}", config.redis.url);
            Ok(Arc::new(RedisStore::new(&config.redis.url).await?))
        }
        #[cfg(not(feature = "redis"))]
        StoreType::Redis => {
            tracing::error!("Redis store requested but 'redis' feature is not enabled");
            Err(crate::interfaces::StoreError::Unavailable(
                "redis feature not enabled".to_string(),
            ))
        }
    }
}
