//! Batching filter rules

use serde::{Deserialize, Serialize};

/// How the method set of [`FilterRules`] is interpreted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Only listed methods are batched
    Allow,
    /// Listed methods bypass batching
    #[default]
    Ignore,
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("unknown filter mode: {}", other)),
        }
    }
}

/// Which methods are eligible for batching
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterRules {
    #[serde(default)]
    pub mode: FilterMode,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl FilterRules {
    pub fn new<I, S>(mode: FilterMode, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }
}
