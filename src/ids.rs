//! Identifier generators.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::interfaces::IdGenerator;

/// Random UUID v4 identifiers in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic identifiers: `{prefix}-0`, `{prefix}-1`, ...
///
/// Unique within one generator instance only. Intended for tests that assert
/// on exact keys.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
