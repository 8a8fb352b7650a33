//! Redis KvStore implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::{debug, info};

use crate::interfaces::kv_store::ttl_seconds;
use crate::interfaces::{KvStore, Result};

/// Redis key-value store.
///
/// Keys are used verbatim, with no prefix, so counters and history lists
/// are readable by any other Redis client under their documented names.
/// `clear_all` flushes the selected database.
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis.
    ///
    /// # Arguments
    /// * `url` - Redis connection URL (e.g., redis://localhost:6379/0)
    pub async fn new(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        info!(url = %url, "Connected to Redis");

        Ok(Self { conn })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;

        debug!(key = %key, bytes = value.len(), "SET");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.incr(key, 1i64).await?;

        debug!(key = %key, count = count, "INCR");
        Ok(count)
    }

    async fn append(&self, list: &str, item: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.rpush(list, item).await?;
        Ok(())
    }

    async fn append_all(&self, items: &[(&str, &[u8])]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for (list, item) in items {
            pipe.rpush(*list, *item).ignore();
        }

        let mut conn = self.conn.clone();
        let _: () = pipe.query_async(&mut conn).await?;

        debug!(count = items.len(), "MULTI RPUSH");
        Ok(())
    }

    async fn range(&self, list: &str) -> Result<Vec<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let items: Vec<Vec<u8>> = conn.lrange(list, 0, -1).await?;
        Ok(items)
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let seconds = ttl_seconds(ttl);
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, seconds).await?;

        debug!(key = %key, ttl_secs = seconds, "SETEX");
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut conn).await?;

        info!("Flushed Redis database");
        Ok(())
    }
}
