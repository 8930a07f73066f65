//! Core batching engine
//!
//! - **types**: calls, responses and error envelopes
//! - **completion**: single-resolution handoff to a waiting caller
//! - **token_pool**: credentials used to authorize execute calls
//! - **script**: script encoding and response splitting
//! - **packer**: admission, flushing and dispatch

pub mod completion;
pub mod packer;
pub mod script;
pub mod token_pool;
pub mod types;
