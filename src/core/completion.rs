//! Single-resolution handoff between the dispatcher and a waiting caller

use crate::core::types::ApiResponse;
use crate::utils::error::{PackerError, Result};
use tokio::sync::oneshot;

/// Create a linked sink/waiter pair for one call
pub fn completion() -> (CompletionSink, CompletionWaiter) {
    let (tx, rx) = oneshot::channel();
    (CompletionSink { tx }, CompletionWaiter { rx })
}

/// Write side of a call's completion
///
/// `resolve` takes the sink by value, so a call can be resolved at most once.
#[derive(Debug)]
pub struct CompletionSink {
    tx: oneshot::Sender<Result<ApiResponse>>,
}

impl CompletionSink {
    /// Deliver the call's outcome to its caller
    ///
    /// Returns `false` when the caller stopped waiting.
    pub fn resolve(self, outcome: Result<ApiResponse>) -> bool {
        self.tx.send(outcome).is_ok()
    }

    /// Whether the caller has stopped waiting
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Read side of a call's completion
#[derive(Debug)]
pub struct CompletionWaiter {
    rx: oneshot::Receiver<Result<ApiResponse>>,
}

impl CompletionWaiter {
    /// Wait for the call's outcome
    ///
    /// A sink dropped without being resolved yields [`PackerError::Dispatch`].
    pub async fn wait(self) -> Result<ApiResponse> {
        self.rx
            .await
            .map_err(|_| PackerError::dispatch("batch dropped before the call was resolved"))?
    }
}
