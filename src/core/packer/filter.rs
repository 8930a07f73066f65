//! Method filter deciding which calls are batched

use crate::config::{FilterMode, FilterRules};
use crate::core::types::EXECUTE_METHOD;
use std::collections::HashSet;

/// Resolved batching filter
///
/// An empty method set always batches everything, whatever the mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    mode: FilterMode,
    methods: HashSet<String>,
}

impl FilterPolicy {
    pub fn from_rules(rules: &FilterRules) -> Self {
        if rules.methods.is_empty() {
            return Self::default();
        }
        Self {
            mode: rules.mode,
            methods: rules.methods.iter().cloned().collect(),
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Whether `method` may be packed into a script
    ///
    /// Execute calls never are: scripts cannot nest.
    pub fn is_batchable(&self, method: &str) -> bool {
        if method == EXECUTE_METHOD {
            return false;
        }
        let listed = self.methods.contains(method);
        match self.mode {
            FilterMode::Allow => listed,
            FilterMode::Ignore => !listed,
        }
    }
}
