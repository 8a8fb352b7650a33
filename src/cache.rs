//! Cache facade.
//!
//! Stores scalar values under freshly generated keys and reads them back,
//! optionally through a decoder. Every `store` call is counted and recorded
//! under the [`STORE_OPERATION`] identity so it can later be replayed.
//!
//! ```ignore
//! let cache = Cache::new(store).await?;
//! let key = cache.store("hello").await?;
//! assert_eq!(cache.retrieve_as_text(&key).await?, Some("hello".to_string()));
//! cache.replay().await?;
//! ```

use std::convert::Infallible;
use std::num::{ParseFloatError, ParseIntError};
use std::string::FromUtf8Error;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::advice::{instrument, Counted, Operation, OperationId, Recorded};
use crate::ids::UuidGenerator;
use crate::interfaces::{IdGenerator, KvStore, Result, StoreError};
use crate::replay::ReplayReport;
use crate::value::Value;

/// Identity of the instrumented `store` operation.
pub const STORE_OPERATION: &str = "Cache.store";

/// Errors from decoding a stored value.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Value is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    #[error("Value is not a base-10 integer: {0}")]
    Integer(#[from] ParseIntError),

    #[error("Value is not a float: {0}")]
    Float(#[from] ParseFloatError),

    #[error("Decode failed: {0}")]
    Custom(String),
}

impl From<Infallible> for DecodeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Errors from reading through the cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Interpret raw bytes as UTF-8 text.
pub fn decode_text(bytes: Vec<u8>) -> std::result::Result<String, DecodeError> {
    Ok(String::from_utf8(bytes)?)
}

/// Parse raw bytes as a base-10 integer.
pub fn decode_integer(bytes: Vec<u8>) -> std::result::Result<i64, DecodeError> {
    let text = decode_text(bytes)?;
    Ok(text.trim().parse::<i64>()?)
}

/// Parse raw bytes as a floating-point number.
pub fn decode_float(bytes: Vec<u8>) -> std::result::Result<f64, DecodeError> {
    let text = decode_text(bytes)?;
    Ok(text.trim().parse::<f64>()?)
}

/// Base operation behind `Cache::store`: write a value under a new key.
pub struct StoreValue {
    store: Arc<dyn KvStore>,
    ids: Arc<dyn IdGenerator>,
}

impl StoreValue {
    pub fn new(store: Arc<dyn KvStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }
}

#[async_trait]
impl Operation for StoreValue {
    type Input = Value;
    type Output = String;

    async fn call(&self, value: Value) -> Result<String> {
        let key = self.ids.new_id();
        self.store.set(&key, &value.to_bytes()).await?;

        debug!(key = %key, "Stored value");
        Ok(key)
    }
}

/// Instrumented cache over a key-value store.
///
/// Construction clears the whole store namespace so counters and history
/// start from zero. Point it at a dedicated database.
pub struct Cache {
    store: Arc<dyn KvStore>,
    store_op: Recorded<Counted<StoreValue>>,
}

impl Cache {
    /// Create a cache that keys values by random UUIDs.
    pub async fn new(store: Arc<dyn KvStore>) -> Result<Self> {
        Self::with_ids(store, Arc::new(UuidGenerator)).await
    }

    /// Create a cache with a custom identifier generator.
    pub async fn with_ids(store: Arc<dyn KvStore>, ids: Arc<dyn IdGenerator>) -> Result<Self> {
        store.clear_all().await?;

        let base = StoreValue::new(store.clone(), ids);
        let store_op = instrument(store.clone(), OperationId::new(STORE_OPERATION), base);

        info!("Cache initialized with a clean store");
        Ok(Self { store, store_op })
    }

    /// Store a value under a freshly generated key and return the key.
    pub async fn store(&self, value: impl Into<Value>) -> Result<String> {
        self.store_op.call(value.into()).await
    }

    /// Identity under which `store` calls are counted and recorded.
    pub fn store_op_id(&self) -> &OperationId {
        self.store_op.id()
    }

    /// The underlying store handle.
    pub fn kv_store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Read the raw bytes stored under `key`. Absent keys yield `None`.
    pub async fn retrieve(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.store.get(key).await
    }

    /// Read a value and convert it with `decode`.
    ///
    /// Absent keys yield `None` without calling `decode`. Decoder failures
    /// are returned as `CacheError::Decode`.
    pub async fn retrieve_with<T, E, F>(
        &self,
        key: &str,
        decode: F,
    ) -> std::result::Result<Option<T>, CacheError>
    where
        F: FnOnce(Vec<u8>) -> std::result::Result<T, E>,
        E: Into<DecodeError>,
    {
        match self.retrieve(key).await? {
            Some(bytes) => Ok(Some(decode(bytes).map_err(Into::into)?)),
            None => Ok(None),
        }
    }

    pub async fn retrieve_as_text(
        &self,
        key: &str,
    ) -> std::result::Result<Option<String>, CacheError> {
        self.retrieve_with(key, decode_text).await
    }

    pub async fn retrieve_as_integer(
        &self,
        key: &str,
    ) -> std::result::Result<Option<i64>, CacheError> {
        self.retrieve_with(key, decode_integer).await
    }

    pub async fn retrieve_as_float(
        &self,
        key: &str,
    ) -> std::result::Result<Option<f64>, CacheError> {
        self.retrieve_with(key, decode_float).await
    }

    /// Print the recorded history of `store` calls.
    pub async fn replay(&self) -> Result<ReplayReport> {
        crate::replay::replay(self.store.as_ref(), self.store_op_id()).await
    }
}
