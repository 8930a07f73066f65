//! Pending batch of admitted calls

use crate::core::completion::CompletionSink;
use crate::core::types::Call;

/// An admitted call waiting for its batch to be dispatched
#[derive(Debug)]
pub(crate) struct PendingCall {
    pub call: Call,
    pub sink: CompletionSink,
}

/// Ordered calls collected for one execute script
///
/// Admission order is script order and result order. A batch is swapped out
/// whole when flushed and never collects again.
#[derive(Debug)]
pub(crate) struct Batch {
    id: u64,
    calls: Vec<PendingCall>,
}

impl Batch {
    pub fn new(id: u64, capacity: usize) -> Self {
        Self {
            id,
            calls: Vec::with_capacity(capacity),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Append a call and return the new batch length
    pub fn push(&mut self, call: Call, sink: CompletionSink) -> usize {
        self.calls.push(PendingCall { call, sink });
        self.calls.len()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Split into the calls to encode and the sinks to resolve, index-aligned
    pub fn into_parts(self) -> (Vec<Call>, Vec<CompletionSink>) {
        self.calls
            .into_iter()
            .map(|pending| (pending.call, pending.sink))
            .unzip()
    }
}
