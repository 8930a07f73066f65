//! Configuration loading utilities
//!
//! Loads [`PackerConfig`] from a YAML file or from `PACKER_*` environment
//! variables.

use super::models::*;
use crate::utils::error::{PackerError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

impl PackerConfig {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading packer configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PackerError::config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        debug!("Packer configuration parsed");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading packer configuration from environment variables");
        let mut config = Self::default();

        if let Some(max) = var("PACKER_MAX_PACKED_REQUESTS") {
            config.max_packed_requests = max
                .trim()
                .parse()
                .map_err(|e| PackerError::config(format!("Invalid max packed requests: {}", e)))?;
        }
        if let Some(mode) = var("PACKER_FILTER_MODE") {
            config.filter.mode = mode.parse().map_err(PackerError::config)?;
        }
        if let Some(methods) = var("PACKER_FILTER_METHODS") {
            config.filter.methods = split_list(&methods);
        }
        if let Some(tokens) = var("PACKER_TOKENS") {
            config.tokens = Some(split_list(&tokens));
        }
        if let Some(debug) = var("PACKER_DEBUG") {
            config.debug = parse_flag(&debug)
                .ok_or_else(|| PackerError::config(format!("Invalid debug flag: {}", debug)))?;
        }
        if let Some(interval) = var("PACKER_FLUSH_INTERVAL_MS") {
            config.flush_interval_ms = interval
                .trim()
                .parse()
                .map_err(|e| PackerError::config(format!("Invalid flush interval: {}", e)))?;
        }

        Ok(config)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
