//! Script encoding for batched calls
//!
//! A [`ScriptCodec`] turns an ordered batch of calls into the parameters of a
//! single execute call, and splits the execute response back into one outcome
//! per call. The grammar is remote-specific; [`VkScriptCodec`] speaks VKScript.

mod vkscript;


pub use vkscript::VkScriptCodec;

use crate::core::types::{ApiResponse, Call, Params};
use crate::utils::error::Result;

/// Encoder/decoder for execute scripts
pub trait ScriptCodec: Send + Sync + std::fmt::Debug + 'static {
    /// Parameters of one execute call running `calls` in order
    fn encode(&self, calls: &[Call]) -> Result<Params>;

    /// Split an execute response into per-call outcomes, in script order
    ///
    /// The returned vector has one entry per result slot the remote sent
    /// back; the caller checks it against the batch size.
    fn decode(&self, response: ApiResponse, calls: &[Call]) -> Result<Vec<Result<ApiResponse>>>;
}
