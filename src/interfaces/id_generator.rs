//! Identifier generation interface.

/// Produces unique string identifiers for stored entries.
///
/// Identifiers must not repeat, including across concurrent callers.
/// No ordering is implied.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}
