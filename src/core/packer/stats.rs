//! Packer counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct PackerStats {
    batches_dispatched: AtomicU64,
    calls_batched: AtomicU64,
    calls_bypassed: AtomicU64,
    admission_rejections: AtomicU64,
    batch_failures: AtomicU64,
    sub_call_failures: AtomicU64,
    calls_abandoned: AtomicU64,
}

impl PackerStats {
    pub fn record_batch(&self, size: usize) {
        self.batches_dispatched.fetch_add(1, Ordering::Relaxed);
        self.calls_batched.fetch_add(size as u64, Ordering::Relaxed);
    }

    pub fn record_bypass(&self) {
        self.calls_bypassed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.admission_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch_failure(&self) {
        self.batch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sub_call_failure(&self) {
        self.sub_call_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_abandoned(&self) {
        self.calls_abandoned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            batches_dispatched: self.batches_dispatched.load(Ordering::Relaxed),
            calls_batched: self.calls_batched.load(Ordering::Relaxed),
            calls_bypassed: self.calls_bypassed.load(Ordering::Relaxed),
            admission_rejections: self.admission_rejections.load(Ordering::Relaxed),
            batch_failures: self.batch_failures.load(Ordering::Relaxed),
            sub_call_failures: self.sub_call_failures.load(Ordering::Relaxed),
            calls_abandoned: self.calls_abandoned.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the packer counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Execute calls issued
    pub batches_dispatched: u64,
    /// Calls that went out inside an execute script
    pub calls_batched: u64,
    /// Calls forwarded to the transport unchanged
    pub calls_bypassed: u64,
    /// Calls refused before reaching a batch
    pub admission_rejections: u64,
    /// Batches that failed as a whole
    pub batch_failures: u64,
    /// Individual sub-calls that failed inside a successful batch
    pub sub_call_failures: u64,
    /// Results dropped because the caller stopped waiting
    pub calls_abandoned: u64,
}
