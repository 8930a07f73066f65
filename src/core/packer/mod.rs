//! Execute packer
//!
//! [`Packer`] wraps a [`Transport`] and packs concurrent, independent calls
//! into execute scripts of up to `max_packed_requests` calls. Each caller
//! awaits only its own result.
//!
//! Flow of a batchable call:
//!
//! 1. admission: filter check, method name check, credential harvesting
//! 2. append to the shared batch under the lock; the call that fills the
//!    batch swaps it out for a fresh one and hands it to a dispatch task
//! 3. the caller awaits its completion sink
//!
//! Batches that never fill up are flushed by [`Packer::send`], usually driven
//! by a [`FlushTrigger`].

mod batch;
mod dispatch;
mod filter;
mod stats;
mod trigger;


pub use filter::FilterPolicy;
pub use stats::StatsSnapshot;
pub use trigger::FlushTrigger;

use crate::config::{PackerConfig, PackerSettings, checked_max_packed_requests};
use crate::core::completion::completion;
use crate::core::script::{ScriptCodec, VkScriptCodec};
use crate::core::token_pool::TokenPool;
use crate::core::types::{ACCESS_TOKEN_PARAM, ApiResponse, Call, Params, is_valid_method_name};
use crate::transport::Transport;
use crate::utils::error::{PackerError, Result};
use crate::utils::logging::mask_token;
use async_trait::async_trait;
use batch::Batch;
use parking_lot::Mutex;
use serde_json::Value;
use stats::PackerStats;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub(crate) struct PackerInner<T> {
    settings: PackerSettings,
    transport: T,
    codec: Box<dyn ScriptCodec>,
    tokens: TokenPool,
    batch: Mutex<Batch>,
    next_batch_id: AtomicU64,
    stats: PackerStats,
}

impl<T> PackerInner<T> {
    fn fresh_batch(&self) -> Batch {
        let id = self.next_batch_id.fetch_add(1, Ordering::Relaxed);
        Batch::new(id, self.settings.max_packed_requests)
    }
}

/// Batching wrapper around a [`Transport`]
pub struct Packer<T: Transport> {
    inner: Arc<PackerInner<T>>,
}

impl<T: Transport> Clone for Packer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Transport> std::fmt::Debug for Packer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packer")
            .field("settings", &self.inner.settings)
            .field("pending", &self.pending())
            .field("tokens", &self.inner.tokens.len())
            .finish()
    }
}

impl<T: Transport> Packer<T> {
    /// Create a packer from configuration
    ///
    /// No flush trigger is started: a batch goes out only once it is full or
    /// [`Packer::send`] is called. See [`Packer::with_default_trigger`].
    pub fn new(transport: T, config: PackerConfig) -> Result<Self> {
        Ok(Self::with_settings(transport, config.settings()?))
    }

    /// Create a packer from resolved settings, using the VKScript codec
    pub fn with_settings(transport: T, settings: PackerSettings) -> Self {
        Self::with_codec(transport, settings, VkScriptCodec::new())
    }

    /// Create a packer with a custom script codec
    ///
    /// A batch size outside `1..=25` falls back to 25, as in
    /// [`PackerConfig::settings`].
    pub fn with_codec<C: ScriptCodec>(
        transport: T,
        mut settings: PackerSettings,
        codec: C,
    ) -> Self {
        settings.max_packed_requests = checked_max_packed_requests(settings.max_packed_requests);
        let tokens = match &settings.tokens {
            Some(tokens) => TokenPool::with_tokens(tokens.iter().cloned()),
            None => TokenPool::new(),
        };
        let batch = Batch::new(0, settings.max_packed_requests);

        Self {
            inner: Arc::new(PackerInner {
                settings,
                transport,
                codec: Box::new(codec),
                tokens,
                batch: Mutex::new(batch),
                next_batch_id: AtomicU64::new(1),
                stats: PackerStats::default(),
            }),
        }
    }

    /// Create a packer and start a flush trigger at the configured interval
    ///
    /// Must be called within a Tokio runtime.
    pub fn with_default_trigger(
        transport: T,
        config: PackerConfig,
    ) -> Result<(Self, FlushTrigger)> {
        let packer = Self::new(transport, config)?;
        let trigger = packer.spawn_flush_loop(packer.settings().flush_interval);
        Ok((packer, trigger))
    }

    pub fn settings(&self) -> &PackerSettings {
        &self.inner.settings
    }

    pub fn tokens(&self) -> &TokenPool {
        &self.inner.tokens
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.stats.snapshot()
    }

    /// Number of calls in the batch currently collecting
    pub fn pending(&self) -> usize {
        self.inner.batch.lock().len()
    }

    /// Perform one API call, packed into an execute script when eligible
    pub async fn handle(&self, method: &str, params: Params) -> Result<ApiResponse> {
        let settings = &self.inner.settings;
        if settings.debug {
            debug!(method, "packer: handle call");
        }

        if !settings.filter.is_batchable(method) {
            self.inner.stats.record_bypass();
            return self.inner.transport.invoke(method, params).await;
        }

        if let Err(err) = self.admit(method, &params) {
            self.inner.stats.record_rejection();
            return Err(err);
        }

        let (sink, waiter) = completion();
        let call = Call::new(method, params);

        let full = {
            let mut batch = self.inner.batch.lock();
            let len = batch.push(call, sink);
            if len >= settings.max_packed_requests {
                Some(std::mem::replace(&mut *batch, self.inner.fresh_batch()))
            } else {
                None
            }
        };

        if let Some(batch) = full {
            self.spawn_dispatch(batch);
        }

        waiter.wait().await
    }

    /// Flush the collecting batch if it holds any calls
    ///
    /// Returns the number of calls flushed. Must be called within a Tokio
    /// runtime.
    pub fn send(&self) -> usize {
        let taken = {
            let mut batch = self.inner.batch.lock();
            if batch.is_empty() {
                None
            } else {
                Some(std::mem::replace(&mut *batch, self.inner.fresh_batch()))
            }
        };

        match taken {
            Some(batch) => {
                let size = batch.len();
                self.spawn_dispatch(batch);
                size
            }
            None => 0,
        }
    }

    /// Start a task calling [`Packer::send`] every `period`
    pub fn spawn_flush_loop(&self, period: Duration) -> FlushTrigger {
        FlushTrigger::spawn(self.clone(), period)
    }

    fn admit(&self, method: &str, params: &Params) -> Result<()> {
        if !is_valid_method_name(method) {
            return Err(PackerError::InvalidMethod(method.to_string()));
        }

        if !self.inner.settings.token_lazy_loading() {
            return Ok(());
        }

        let pool = &self.inner.tokens;
        match params.get(ACCESS_TOKEN_PARAM) {
            Some(Value::String(token)) if !token.is_empty() => {
                if pool.append(token.as_str()) && self.inner.settings.debug {
                    debug!(token = %mask_token(token), "packer: token added to pool");
                }
                Ok(())
            }
            None | Some(Value::Null) if pool.is_empty() => Err(PackerError::MissingCredential),
            Some(Value::String(_)) if pool.is_empty() => Err(PackerError::MissingCredential),
            Some(_) if pool.is_empty() => Err(PackerError::BadCredentialType),
            _ => Ok(()),
        }
    }

    fn spawn_dispatch(&self, batch: Batch) {
        if self.inner.settings.debug {
            debug!(batch = batch.id(), size = batch.len(), "packer: flushing batch");
        }
        tokio::spawn(dispatch::dispatch(self.inner.clone(), batch));
    }
}

#[async_trait]
impl<T: Transport> Transport for Packer<T> {
    async fn invoke(&self, method: &str, params: Params) -> Result<ApiResponse> {
        self.handle(method, params).await
    }
}
