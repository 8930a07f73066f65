//! Configuration data models

pub mod filter;
pub mod packer;

pub use filter::*;
pub use packer::*;

/// Hard per-script ceiling of the execute primitive
pub const MAX_PACKED_REQUESTS_LIMIT: usize = 25;

pub fn default_max_packed_requests() -> usize {
    MAX_PACKED_REQUESTS_LIMIT
}

pub fn default_flush_interval_ms() -> u64 {
    2000
}
