//! Replay of recorded call history.
//!
//! Reads the counter and history lists written by [`Counted`] and
//! [`Recorded`] and renders them as:
//!
//! ```text
//! Cache.store was called 3 times:
//! Cache.store(*('a',)) -> 0b0c6f2e-...
//! Cache.store(*('b',)) -> 6a1d4f3b-...
//! Cache.store(*('c',)) -> d2b7e0c9-...
//! ```
//!
//! The wrapped operation itself is never invoked.
//!
//! [`Counted`]: crate::advice::Counted
//! [`Recorded`]: crate::advice::Recorded

use std::fmt;

use tracing::debug;

use crate::advice::{call_count, OperationId};
use crate::interfaces::{KvStore, Result};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Rendered argument tuple, e.g. `('a',)`.
    pub input: String,
    /// Rendered result.
    pub output: String,
}

/// Snapshot of an operation's counter and history.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub id: OperationId,
    /// Invocation counter. Counts attempts, so it can exceed `calls.len()`
    /// when history writes failed.
    pub count: i64,
    /// Recorded calls in invocation order.
    pub calls: Vec<RecordedCall>,
}

impl ReplayReport {
    /// Read counter and history for `id`.
    ///
    /// A missing counter reads as zero calls. Input and output lists of
    /// different lengths are paired up to the shorter one.
    pub async fn load(store: &dyn KvStore, id: &OperationId) -> Result<Self> {
        let count = call_count(store, id).await?;
        let inputs = store.range(id.inputs_key()).await?;
        let outputs = store.range(id.outputs_key()).await?;

        if inputs.len() != outputs.len() {
            debug!(
                operation = %id,
                inputs = inputs.len(),
                outputs = outputs.len(),
                "History lists differ in length"
            );
        }

        let calls = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| RecordedCall {
                input: String::from_utf8_lossy(&input).into_owned(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
            .collect();

        Ok(Self {
            id: id.clone(),
            count,
            calls,
        })
    }

    /// Header line: `{id} was called {count} times:`.
    pub fn header(&self) -> String {
        format!("{} was called {} times:", self.id, self.count)
    }

    /// One line per recorded call: `{id}(*{input}) -> {output}`.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|call| format!("{}(*{}) -> {}", self.id, call.input, call.output))
            .collect()
    }
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for line in self.call_lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Load the history of `id` and print it to stdout.
pub async fn replay(store: &dyn KvStore, id: &OperationId) -> Result<ReplayReport> {
    let report = ReplayReport::load(store, id).await?;
    print!("{}", report);
    Ok(report)
}
