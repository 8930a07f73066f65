//! Core data types shared by the packer and its transports

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Dot-separated identifiers, e.g. `users.get` or `utils.resolveScreenName`
static METHOD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*$").expect("Invalid method regex"));

/// Parameters of a single API call
pub type Params = serde_json::Map<String, Value>;

/// Method that runs a script of several calls on the remote side
pub const EXECUTE_METHOD: &str = "execute";

/// Parameter carrying the script body of an [`EXECUTE_METHOD`] call
pub const CODE_PARAM: &str = "code";

/// Parameter carrying the credential of a call
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Decoded envelope of one remote call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Payload of the call
    #[serde(default)]
    pub response: Value,
    /// Sub-call errors reported by an execute script, in the order they occurred
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execute_errors: Vec<ExecuteError>,
}

impl ApiResponse {
    pub fn new(response: Value) -> Self {
        Self {
            response,
            execute_errors: Vec::new(),
        }
    }
}

/// Whole-call error returned by the remote side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error_code: i64,
    pub error_msg: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(error_code: i64, error_msg: S) -> Self {
        Self {
            error_code,
            error_msg: error_msg.into(),
        }
    }
}

/// Error of one sub-call inside an execute script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteError {
    pub method: String,
    pub error_code: i64,
    pub error_msg: String,
}

impl ExecuteError {
    pub fn new<M: Into<String>, S: Into<String>>(method: M, error_code: i64, error_msg: S) -> Self {
        Self {
            method: method.into(),
            error_code,
            error_msg: error_msg.into(),
        }
    }
}

/// A single logical API call admitted for batching
///
/// Immutable once admitted; the credential has already been lifted out of
/// `params` and is kept only for the dispatch debug log (masked).
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: String,
    pub params: Params,
    pub credential: Option<String>,
}

impl Call {
    /// Build a call, moving `access_token` out of the parameters
    pub fn new<S: Into<String>>(method: S, mut params: Params) -> Self {
        let credential = match params.remove(ACCESS_TOKEN_PARAM) {
            Some(Value::String(token)) => Some(token),
            _ => None,
        };
        Self {
            method: method.into(),
            params,
            credential,
        }
    }
}

/// Whether `method` is safe to splice into a script as `API.<method>`
pub fn is_valid_method_name(method: &str) -> bool {
    METHOD_PATTERN.is_match(method)
}
