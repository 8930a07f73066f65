//! # execute-packer
//!
//! Transparent request batching for VK-style APIs. Independent calls made
//! concurrently by many callers are packed into a single `execute` call
//! (a server-side script running up to 25 sub-calls), and each sub-result is
//! routed back to the caller that asked for it.
//!
//! ## Features
//!
//! - **Drop-in**: [`Packer`] implements [`Transport`], the same interface as
//!   the client it wraps
//! - **Size and time flushes**: a full batch is sent at once, a partial one by
//!   [`Packer::send`] or a [`FlushTrigger`]
//! - **Partial failures**: a failed sub-call reaches only its own caller; a
//!   failed execute call reaches every member of the batch
//! - **Token pooling**: execute calls are authorized from a static token set or
//!   from tokens harvested from incoming calls
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use execute_packer::{HttpTransport, HttpTransportConfig, Packer, PackerConfig, Params};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new(HttpTransportConfig::new())?;
//!     let (packer, _trigger) = Packer::with_default_trigger(transport, PackerConfig::default())?;
//!
//!     let params: Params = json!({"screen_name": "durov", "access_token": "..."})
//!         .as_object()
//!         .cloned()
//!         .unwrap_or_default();
//!     let resp = packer.handle("utils.resolveScreenName", params).await?;
//!     println!("{}", resp.response);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod transport;
pub mod utils;

// Re-export main types
pub use config::{FilterMode, FilterRules, PackerConfig, PackerSettings};
pub use crate::core::packer::{FilterPolicy, FlushTrigger, Packer, StatsSnapshot};
pub use crate::core::script::{ScriptCodec, VkScriptCodec};
pub use crate::core::token_pool::TokenPool;
pub use crate::core::types::{ApiError, ApiResponse, Call, EXECUTE_METHOD, ExecuteError, Params};
pub use transport::{HttpTransport, HttpTransportConfig, Transport};
pub use utils::error::{PackerError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
