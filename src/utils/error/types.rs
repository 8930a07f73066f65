//! Error types for the packer

use crate::core::types::{ApiError, ExecuteError};
use thiserror::Error;

/// Result type alias for the packer
pub type Result<T> = std::result::Result<T, PackerError>;

/// Main error type for the packer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackerError {
    /// Lazy credential loading is enabled, the pool is empty and the call has no token
    #[error("packer: missing access_token param")]
    MissingCredential,

    /// The call's `access_token` is not a string and the pool cannot cover for it
    #[error("packer: bad access_token type")]
    BadCredentialType,

    /// Method name cannot be spliced into a script
    #[error("Invalid method name: {0:?}")]
    InvalidMethod(String),

    /// The remote side rejected the whole call
    #[error("API error {}: {}", .0.error_code, .0.error_msg)]
    Api(ApiError),

    /// One sub-call of an execute script failed
    #[error("Execute error in {}: {} (code {})", .0.method, .0.error_msg, .0.error_code)]
    Execute(ExecuteError),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The execute response does not line up with the submitted batch
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The dispatcher went away without resolving a call
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

impl PackerError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn protocol<S: Into<String>>(message: S) -> Self {
        Self::Protocol(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn dispatch<S: Into<String>>(message: S) -> Self {
        Self::Dispatch(message.into())
    }

    /// Errors raised before a call ever reaches a batch
    pub fn is_admission(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::BadCredentialType | Self::InvalidMethod(_)
        )
    }

    /// Errors that fail a whole batch rather than a single member of it
    pub fn is_batch_level(&self) -> bool {
        matches!(
            self,
            Self::Api(_)
                | Self::Network(_)
                | Self::Timeout(_)
                | Self::Serialization(_)
                | Self::Protocol(_)
        )
    }
}
