//! In-memory KvStore implementation.
//!
//! Backs the `memory` store type and all unit tests. Expiry follows
//! `tokio::time`, so tests running with paused time can advance past a TTL
//! without sleeping.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::interfaces::kv_store::ttl_seconds;
use crate::interfaces::{KvStore, Result, StoreError};

/// Stored value with optional expiry deadline.
struct StoredValue {
    bytes: Vec<u8>,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, StoredValue>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

/// Process-local key-value store.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
    unavailable: RwLock<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with `StoreError::Unavailable`.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    async fn check_available(&self) -> Result<()> {
        if *self.unavailable.read().await {
            return Err(StoreError::Unavailable("in-memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check_available().await?;
        self.inner.write().await.values.insert(
            key.to_string(),
            StoredValue {
                bytes: value.to_vec(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_available().await?;
        let now = Instant::now();
        {
            let inner = self.inner.read().await;
            match inner.values.get(key) {
                None => return Ok(None),
                Some(v) if v.is_live(now) => return Ok(Some(v.bytes.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it unless it was rewritten in the meantime.
        let mut inner = self.inner.write().await;
        if inner.values.get(key).is_some_and(|v| !v.is_live(now)) {
            inner.values.remove(key);
        }
        Ok(None)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.check_available().await?;
        let now = Instant::now();
        let mut inner = self.inner.write().await;

        let current = match inner.values.get(key).filter(|v| v.is_live(now)) {
            Some(stored) => {
                let text = String::from_utf8_lossy(&stored.bytes);
                text.parse::<i64>()
                    .map_err(|_| StoreError::InvalidCounter {
                        key: key.to_string(),
                        value: text.into_owned(),
                    })?
            }
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::CounterOverflow {
                key: key.to_string(),
            })?;
        inner.values.insert(
            key.to_string(),
            StoredValue {
                bytes: next.to_string().into_bytes(),
                expires_at: None,
            },
        );
        Ok(next)
    }

    async fn append(&self, list: &str, item: &[u8]) -> Result<()> {
        self.check_available().await?;
        self.inner
            .write()
            .await
            .lists
            .entry(list.to_string())
            .or_default()
            .push(item.to_vec());
        Ok(())
    }

    async fn append_all(&self, items: &[(&str, &[u8])]) -> Result<()> {
        self.check_available().await?;
        let mut inner = self.inner.write().await;
        for (list, item) in items {
            inner
                .lists
                .entry((*list).to_string())
                .or_default()
                .push(item.to_vec());
        }
        Ok(())
    }

    async fn range(&self, list: &str) -> Result<Vec<Vec<u8>>> {
        self.check_available().await?;
        let inner = self.inner.read().await;
        Ok(inner.lists.get(list).cloned().unwrap_or_default())
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        self.check_available().await?;
        let now = Instant::now();
        let deadline = now + Duration::from_secs(ttl_seconds(ttl));
        let mut inner = self.inner.write().await;
        inner.values.retain(|_, v| v.is_live(now));
        inner.values.insert(
            key.to_string(),
            StoredValue {
                bytes: value.to_vec(),
                expires_at: Some(deadline),
            },
        );
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.check_available().await?;
        let mut inner = self.inner.write().await;
        inner.values.clear();
        inner.lists.clear();
        Ok(())
    }
}
