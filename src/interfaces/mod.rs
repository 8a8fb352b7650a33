//! Abstract interfaces for kvtrace components.
//!
//! These traits define the contracts for:
//! - Key-value storage (the only holder of state)
//! - Identifier generation (keys for stored values)
//! - Content fetching (the fetch cache's collaborator)

pub mod fetcher;
pub mod id_generator;
pub mod kv_store;

pub use fetcher::{FetchError, Fetcher};
pub use id_generator::IdGenerator;
pub use kv_store::{KvStore, Result, StoreError};
