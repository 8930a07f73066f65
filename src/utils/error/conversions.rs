//! Type conversions for PackerError

use super::types::PackerError;

impl From<reqwest::Error> for PackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PackerError::Timeout(err.to_string())
        } else if err.is_decode() {
            PackerError::Serialization(err.to_string())
        } else {
            PackerError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PackerError {
    fn from(err: serde_json::Error) -> Self {
        PackerError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for PackerError {
    fn from(err: serde_yaml::Error) -> Self {
        PackerError::Config(format!("Failed to parse config: {}", err))
    }
}
