//! Configuration validation

use super::models::*;
use crate::core::types::is_valid_method_name;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for FilterRules {
    fn validate(&self) -> Result<(), String> {
        match self.methods.iter().find(|m| !is_valid_method_name(m)) {
            Some(method) => Err(format!("filter method {:?} is not a valid method name", method)),
            None => Ok(()),
        }
    }
}

impl Validate for PackerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.flush_interval_ms == 0 {
            return Err("flush_interval_ms must be greater than 0".to_string());
        }

        if let Some(tokens) = &self.tokens {
            if tokens.iter().any(|t| t.trim().is_empty()) {
                return Err("tokens must not contain empty entries".to_string());
            }
        }

        self.filter.validate()
    }
}
