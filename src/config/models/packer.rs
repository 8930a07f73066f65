//! Packer configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Packer configuration, as loaded from YAML or the environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackerConfig {
    /// Maximum calls packed into one execute script
    #[serde(default = "default_max_packed_requests")]
    pub max_packed_requests: usize,
    /// Batching filter
    #[serde(default)]
    pub filter: FilterRules,
    /// Static token pool; when set, tokens are not harvested from calls
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
    /// Log every handle, flush and dispatch
    #[serde(default)]
    pub debug: bool,
    /// Period of the time-based flush trigger
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            max_packed_requests: default_max_packed_requests(),
            filter: FilterRules::default(),
            tokens: None,
            debug: false,
            flush_interval_ms: default_flush_interval_ms(),
        }
    }
}

impl PackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of calls per execute script
    pub fn with_max_packed_requests(mut self, max: usize) -> Self {
        self.max_packed_requests = max;
        self
    }

    /// Set the batching rules
    pub fn with_rules<I, S>(mut self, mode: FilterMode, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = FilterRules::new(mode, methods);
        self
    }

    /// Use a fixed token pool instead of harvesting tokens from calls
    pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Whether tokens are harvested from incoming calls
    pub fn token_lazy_loading(&self) -> bool {
        self.tokens.is_none()
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}
