//! Utility modules for the packer
//!
//! - **error**: error type and `Result` alias
//! - **logging**: tracing setup and log sanitization

pub mod error;
pub mod logging;

pub use error::{PackerError, Result};
