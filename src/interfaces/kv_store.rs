//! Key-value store interface.

use std::time::Duration;

use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Counter at {key} is not an integer: {value:?}")]
    InvalidCounter { key: String, value: String },

    #[error("Counter at {key} would overflow")]
    CounterOverflow { key: String },
}

/// Minimal interface to an external key-value store.
///
/// Every call is a single round trip. Implementations never retry; a failure
/// surfaces immediately to the caller.
///
/// Implementations:
/// - `RedisStore`: Redis via a multiplexed connection manager
/// - `InMemoryStore`: process-local maps, used for tests and the `memory` store type
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Write a value, replacing any existing one.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Read a value. Returns `None` if the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increment the integer at `key` by one.
    ///
    /// A missing key counts as zero. Returns the new value. A value that is
    /// not an integer, or is already `i64::MAX`, is an error and is left
    /// unchanged.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Push an item onto the tail of a list.
    async fn append(&self, list: &str, item: &[u8]) -> Result<()>;

    /// Append several items in one atomic step.
    ///
    /// Either all items are appended or none are, and no other append can
    /// land between them.
    async fn append_all(&self, items: &[(&str, &[u8])]) -> Result<()>;

    /// Read an entire list in insertion order. Missing lists are empty.
    async fn range(&self, list: &str) -> Result<Vec<Vec<u8>>>;

    /// Write a value that the store evicts once `ttl` has elapsed.
    ///
    /// TTLs are applied with whole-second resolution, minimum one second.
    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Remove every key in the store's namespace.
    async fn clear_all(&self) -> Result<()>;
}

/// Read an integer counter written by `incr`. A missing key reads as zero.
pub async fn read_counter(store: &dyn KvStore, key: &str) -> Result<i64> {
    match store.get(key).await? {
        None => Ok(0),
        Some(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            text.trim()
                .parse::<i64>()
                .map_err(|_| StoreError::InvalidCounter {
                    key: key.to_string(),
                    value: text.into_owned(),
                })
        }
    }
}

/// Round a TTL to the whole seconds the store understands.
pub fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}
