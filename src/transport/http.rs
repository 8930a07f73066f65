//! HTTP transport for VK-style APIs
//!
//! Every call is a form-encoded `POST {base_url}/method/{method}`. The
//! response envelope carries either `error` or `response` (plus
//! `execute_errors` for execute calls).

use super::Transport;
use crate::core::types::{ACCESS_TOKEN_PARAM, ApiError, ApiResponse, ExecuteError, Params};
use crate::utils::error::{PackerError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.vk.com";

/// Default API version sent as `v`
pub const DEFAULT_API_VERSION: &str = "5.131";

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Base URL without the `/method` suffix
    pub base_url: String,
    /// API version
    pub version: String,
    /// Token used when a call carries none
    pub access_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpTransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_access_token<S: Into<String>>(mut self, token: S) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    response: Option<Value>,
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    execute_errors: Vec<ExecuteError>,
}

/// reqwest-backed [`Transport`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: HttpTransportConfig,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PackerError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/method/{}",
            self.config.base_url.trim_end_matches('/'),
            method
        )
    }

    fn form(&self, params: Params) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = params
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, form_value(value)))
            .collect();

        if !form.iter().any(|(key, _)| key == "v") {
            form.push(("v".to_string(), self.config.version.clone()));
        }
        if !form.iter().any(|(key, _)| key == ACCESS_TOKEN_PARAM) {
            if let Some(token) = &self.config.access_token {
                form.push((ACCESS_TOKEN_PARAM.to_string(), token.clone()));
            }
        }
        form
    }
}

/// Flatten a parameter value into its form representation
fn form_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Bool(b) => String::from(if b { "1" } else { "0" }),
        Value::Number(n) => n.to_string(),
        Value::Array(items) if items.iter().all(|v| !v.is_array() && !v.is_object()) => items
            .into_iter()
            .map(form_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, method: &str, params: Params) -> Result<ApiResponse> {
        let url = self.method_url(method);
        debug!("POST {}", url);

        let envelope: Envelope = self
            .client
            .post(&url)
            .form(&self.form(params))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = envelope.error {
            return Err(PackerError::Api(error));
        }

        Ok(ApiResponse {
            response: envelope.response.unwrap_or(Value::Null),
            execute_errors: envelope.execute_errors,
        })
    }
}
