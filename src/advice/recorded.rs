//! Call history advice.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::args::CallArgs;
use super::operation::{Operation, OperationId};
use crate::interfaces::{KvStore, Result};

/// Wrapper that records the arguments and result of every invocation.
///
/// Inputs are appended to `{id}:inputs` and outputs to `{id}:outputs`. Both
/// entries are written in a single atomic `append_all` once the inner call
/// returns, so concurrent invocations can never pair the input of one call
/// with the output of another.
///
/// A failed inner call is recorded with the output `<error: {message}>`,
/// keeping both lists the same length as the number of recorded calls.
/// That includes a failed counter increment under [`instrument`], so a
/// store whose INCR fails while RPUSH succeeds ends up with more history
/// entries than counted calls.
///
/// [`instrument`]: super::instrument
pub struct Recorded<Op> {
    store: Arc<dyn KvStore>,
    id: OperationId,
    inner: Op,
}

impl<Op> Recorded<Op> {
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
impl<Op: Operation> Operation for Recorded<Op> {
    type Input = Op::Input;
    type Output = Op::Output;

    async fn call(&self, input: Self::Input) -> Result<Self::Output> {
        let args = input.args_repr();
        let result = self.inner.call(input).await;

        let output = match &result {
            Ok(value) => value.to_string(),
            Err(e) => format!("<error: {}>", e),
        };

        let recorded = self
            .store
            .append_all(&[
                (self.id.inputs_key(), args.as_bytes()),
                (self.id.outputs_key(), output.as_bytes()),
            ])
            .await;

        match (result, recorded) {
            (Ok(value), Ok(())) => {
                debug!(operation = %self.id, args = %args, output = %output, "Recorded call");
                Ok(value)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(record_err)) => {
                warn!(
                    operation = %self.id,
                    error = %record_err,
                    "Failed to record history for failed call"
                );
                Err(e)
            }
        }
    }
}
