//! Aspect-oriented advice for cross-cutting concerns.
//!
//! This module provides wrapper types that add orthogonal behavior
//! (call counting, call history) without polluting the wrapped operation.
//!
//! # Architecture
//!
//! Advice is applied at composition time, not in implementations:
//!
//! ```ignore
//! // Core operation - a plain store write
//! let op = StoreValue::new(store.clone(), ids);
//!
//! // Apply advice layers: history outermost, then the counter
//! let op = instrument(store, OperationId::new("Cache.store"), op);
//!
//! // Use as normal - counting and history are transparent
//! let key = op.call(Value::from("a")).await?;
//! ```
//!
//! # Available Advice
//!
//! - [`Counted`] - Increments `{id}` before every call
//! - [`Recorded`] - Appends to `{id}:inputs` and `{id}:outputs` after every call

pub mod args;
mod counted;
mod operation;
mod recorded;

use std::sync::Arc;

pub use args::{CallArgs, Repr};
pub use counted::{call_count, Counted};
pub use operation::{Operation, OperationId};
pub use recorded::Recorded;

use crate::interfaces::KvStore;

/// Wrap an operation with history recording around call counting.
///
/// Each logical call is counted once and recorded once.
pub fn instrument<Op: Operation>(
    store: Arc<dyn KvStore>,
    id: OperationId,
    op: Op,
) -> Recorded<Counted<Op>> {
    let counted = Counted::new(store.clone(), id.clone(), op);
    Recorded::new(store, id, counted)
}
