//! kvtrace - instrumented caching over a key-value store
//!
//! Stores scalar values under generated keys, counts and records every
//! `store` call, replays recorded history, and caches fetched pages with a
//! short TTL. All state lives in the store (Redis in production).

pub mod advice;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod ids;
pub mod interfaces;
pub mod replay;
pub mod storage;
pub mod utils;
pub mod value;

pub use advice::{instrument, Counted, Operation, OperationId, Recorded};
pub use cache::{Cache, CacheError, DecodeError, STORE_OPERATION};
pub use fetch::{FetchCache, HttpFetcher};
pub use interfaces::{Fetcher, IdGenerator, KvStore, StoreError};
pub use replay::{replay, ReplayReport};
pub use value::Value;
