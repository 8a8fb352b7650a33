//! Call counting advice.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::operation::{Operation, OperationId};
use crate::interfaces::kv_store::read_counter;
use crate::interfaces::{KvStore, Result};

/// Wrapper that counts every invocation of the inner operation.
///
/// The counter is incremented before delegating, so attempts are counted
/// whether or not the inner call succeeds. If the increment itself fails,
/// the error is returned and the inner operation is not invoked.
pub struct Counted<Op> {
    store: Arc<dyn KvStore>,
    id: OperationId,
    inner: Op,
}

impl<Op> Counted<Op> {
    pub fn new(store: Arc<dyn KvStore>, id: OperationId, inner: Op) -> Self {
        Self { store, id, inner }
    }

    pub fn id(&self) -> &OperationId {
        &self.id
    }

    /// Get a reference to the inner operation.
    pub fn inner(&self) -> &Op {
        &self.inner
    }
}

#[async_trait]
impl<Op: Operation> Operation for Counted<Op> {
    type Input = Op::Input;
    type Output = Op::Output;

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let count = self.store.incr(self.id.counter_key()).await?;
        debug!(operation = %self.id, count = count, "Counted call");

        self.inner.call(input).await
    }
}

/// Read the invocation counter for an operation.
///
/// A missing counter means the operation was never called.
pub async fn call_count(store: &dyn KvStore, id: &OperationId) -> Result<i64> {
    read_counter(store, id.counter_key()).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::interfaces::StoreError;
    use crate::storage::InMemoryStore;

    /// Echoes its input, optionally failing.
    struct Echo {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Echo {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl Operation for Echo {
        type Input = (String,);
        type Output = String;

        async fn call(&self, input: Self::Input) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Unavailable("echo failed".into()));
            }
            Ok(input.0)
        }
    }

    async fn counted(fail: bool) -> (Arc<InMemoryStore>, Counted<Echo>) {
        let store = Arc::new(InMemoryStore::new());
        let op = Counted::new(store.clone(), OperationId::new("Echo.call"), Echo::new(fail));
        (store, op)
    }

    #[tokio::test]
    async fn test_count_matches_calls() {
        for n in [0usize, 1, 5, 100] {
            let (store, op) = counted(false).await;
            for i in 0..n {
                let out = op.call((format!("v{}", i),)).await.unwrap();
                assert_eq!(out, format!("v{}", i));
            }
            assert_eq!(call_count(store.as_ref(), op.id()).await.unwrap(), n as i64);
            assert_eq!(op.inner().calls.load(Ordering::SeqCst), n);
        }
    }

    #[tokio::test]
    async fn test_failed_calls_are_counted() {
        let (store, op) = counted(true).await;

        assert!(op.call(("x".into(),)).await.is_err());
        assert!(op.call(("y".into(),)).await.is_err());

        assert_eq!(call_count(store.as_ref(), op.id()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_increment_failure_skips_inner_call() {
        let (store, op) = counted(false).await;
        store.set_unavailable(true).await;

        assert!(op.call(("x".into(),)).await.is_err());
        assert_eq!(op.inner().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_counter_reads_zero() {
        let store = InMemoryStore::new();
        let count = call_count(&store, &OperationId::new("Never.called"))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_garbage_counter_is_an_error() {
        let store = InMemoryStore::new();
        store.set("Bad.counter", b"lots").await.unwrap();

        let err = call_count(&store, &OperationId::new("Bad.counter"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCounter { .. }));
    }
}
