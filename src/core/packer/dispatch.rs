//! Dispatch of a detached batch
//!
//! One execute call per batch. A failed call (transport error, whole-script
//! rejection, undecodable or short response) fails every member with the
//! same error; otherwise slot `i` resolves call `i`.

use super::PackerInner;
use super::batch::Batch;
use crate::core::completion::CompletionSink;
use crate::core::types::{ACCESS_TOKEN_PARAM, ApiResponse, Call, EXECUTE_METHOD};
use crate::transport::Transport;
use crate::utils::error::{PackerError, Result};
use crate::utils::logging::mask_token;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

pub(super) async fn dispatch<T: Transport>(inner: Arc<PackerInner<T>>, batch: Batch) {
    let id = batch.id();
    let (calls, sinks) = batch.into_parts();
    inner.stats.record_batch(calls.len());

    match execute(&inner, id, &calls).await {
        Ok(outcomes) => {
            for (sink, outcome) in sinks.into_iter().zip(outcomes) {
                if outcome.is_err() {
                    inner.stats.record_sub_call_failure();
                }
                deliver(&inner, id, sink, outcome);
            }
        }
        Err(err) => {
            warn!(batch = id, size = calls.len(), "packer: batch failed: {}", err);
            inner.stats.record_batch_failure();
            for sink in sinks {
                deliver(&inner, id, sink, Err(err.clone()));
            }
        }
    }
}

// Callers that stopped waiting are counted and skipped.
fn deliver<T: Transport>(
    inner: &PackerInner<T>,
    id: u64,
    sink: CompletionSink,
    outcome: Result<ApiResponse>,
) {
    if sink.is_abandoned() || !sink.resolve(outcome) {
        inner.stats.record_abandoned();
        if inner.settings.debug {
            debug!(batch = id, "packer: caller gone, result discarded");
        }
    }
}

async fn execute<T: Transport>(
    inner: &PackerInner<T>,
    id: u64,
    calls: &[Call],
) -> Result<Vec<Result<ApiResponse>>> {
    let mut params = inner.codec.encode(calls)?;

    let token = inner.tokens.next();
    if inner.settings.debug {
        let members: Vec<String> = calls
            .iter()
            .map(|call| call.credential.as_deref().map(mask_token).unwrap_or_default())
            .collect();
        debug!(
            batch = id,
            size = calls.len(),
            token = %token.as_deref().map(mask_token).unwrap_or_default(),
            members = ?members,
            "packer: dispatching execute"
        );
    }
    if let Some(token) = token {
        params.insert(ACCESS_TOKEN_PARAM.to_string(), Value::String(token));
    }

    let response = inner.transport.invoke(EXECUTE_METHOD, params).await?;
    let outcomes = inner.codec.decode(response, calls)?;

    if outcomes.len() != calls.len() {
        return Err(PackerError::protocol(format!(
            "execute returned {} results for {} calls",
            outcomes.len(),
            calls.len()
        )));
    }

    Ok(outcomes)
}
