//! Shared storage integration tests.
//!
//! Tests the KvStore interface against all implementations.
//! Each implementation module imports these test functions and runs them.

pub mod kv_store_tests;
