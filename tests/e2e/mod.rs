//! End-to-end tests against the live API
//!
//! These tests require a real user token.
//! Run with: TOKEN=... cargo test -- --ignored

pub mod vk_api;
