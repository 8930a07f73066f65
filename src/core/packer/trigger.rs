//! Time-based flush trigger

use super::Packer;
use crate::transport::Transport;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Background task calling [`Packer::send`] on a fixed period
///
/// The task stops when the trigger is stopped or dropped.
#[derive(Debug)]
pub struct FlushTrigger {
    handle: JoinHandle<()>,
}

impl FlushTrigger {
    pub(super) fn spawn<T: Transport>(packer: Packer<T>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                let flushed = packer.send();
                if flushed > 0 && packer.settings().debug {
                    debug!(flushed, "packer: timer flush");
                }
            }
        });
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the trigger; calls already flushed are unaffected
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for FlushTrigger {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
