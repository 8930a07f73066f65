//! Transport seam between the packer and the remote API
//!
//! A [`Transport`] issues exactly one remote call and decodes its envelope.
//! The packer wraps a transport and is itself a transport, so code written
//! against a raw client works unchanged against a packed one.

pub mod http;

pub use http::{HttpTransport, HttpTransportConfig};

use crate::core::types::{ApiResponse, Params};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// One blocking remote call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Invoke `method` with `params` and return the decoded envelope
    async fn invoke(&self, method: &str, params: Params) -> Result<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn invoke(&self, method: &str, params: Params) -> Result<ApiResponse> {
        (**self).invoke(method, params).await
    }
}
