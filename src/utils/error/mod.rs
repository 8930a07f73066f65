//! Error handling for the packer
//!
//! Every failure a caller can observe is a [`PackerError`] value returned from
//! its own call. Errors are `Clone` so a batch-level failure can be handed to
//! every member of the batch unchanged.

mod conversions;
mod types;


pub use types::{PackerError, Result};
