//! Configuration management for the packer
//!
//! [`PackerConfig`] is the serde-facing configuration. It is validated and
//! resolved once into [`PackerSettings`], which the packer keeps read-only
//! for its whole lifetime.

pub mod loader;
pub mod models;
pub mod validation;


pub use models::*;
pub use validation::Validate;

use crate::core::packer::FilterPolicy;
use crate::utils::error::{PackerError, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Resolved, immutable packer settings
#[derive(Debug, Clone)]
pub struct PackerSettings {
    pub max_packed_requests: usize,
    pub filter: FilterPolicy,
    pub tokens: Option<Vec<String>>,
    pub debug: bool,
    pub flush_interval: Duration,
}

impl PackerSettings {
    pub fn token_lazy_loading(&self) -> bool {
        self.tokens.is_none()
    }
}

impl Default for PackerSettings {
    fn default() -> Self {
        Self {
            max_packed_requests: MAX_PACKED_REQUESTS_LIMIT,
            filter: FilterPolicy::default(),
            tokens: None,
            debug: false,
            flush_interval: Duration::from_millis(default_flush_interval_ms()),
        }
    }
}

/// Batch size usable by the execute primitive
///
/// Values outside `1..=25` fall back to 25.
pub(crate) fn checked_max_packed_requests(max: usize) -> usize {
    if (1..=MAX_PACKED_REQUESTS_LIMIT).contains(&max) {
        max
    } else {
        warn!(
            "max_packed_requests {} is outside 1..={}, using {}",
            max, MAX_PACKED_REQUESTS_LIMIT, MAX_PACKED_REQUESTS_LIMIT
        );
        MAX_PACKED_REQUESTS_LIMIT
    }
}

impl PackerConfig {
    /// Validate and resolve into settings
    ///
    /// A batch size outside `1..=25` falls back to 25.
    pub fn settings(&self) -> Result<PackerSettings> {
        self.validate()
            .map_err(|e| PackerError::config(format!("Packer config error: {}", e)))?;

        let settings = PackerSettings {
            max_packed_requests: checked_max_packed_requests(self.max_packed_requests),
            filter: FilterPolicy::from_rules(&self.filter),
            tokens: self.tokens.clone(),
            debug: self.debug,
            flush_interval: self.flush_interval(),
        };

        debug!(
            "Packer settings resolved: max_packed_requests={}, lazy_tokens={}",
            settings.max_packed_requests,
            settings.token_lazy_loading()
        );
        Ok(settings)
    }
}
