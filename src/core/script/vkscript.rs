//! VKScript codec
//!
//! Encodes a batch as `return [API.m1({..}),API.m2({..})];`. Parameters are
//! written as JSON object literals, so caller-provided strings always stay
//! quoted and escaped. Failed sub-calls come back as `false` slots, with the
//! matching entries listed in `execute_errors` in order of occurrence.

use super::ScriptCodec;
use crate::core::types::{ApiResponse, CODE_PARAM, Call, Params, is_valid_method_name};
use crate::utils::error::{PackerError, Result};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct VkScriptCodec;

impl VkScriptCodec {
    pub fn new() -> Self {
        Self
    }

    /// Script source for `calls`
    pub fn script(&self, calls: &[Call]) -> Result<String> {
        let mut code = String::with_capacity(16 + calls.len() * 64);
        code.push_str("return [");
        for (i, call) in calls.iter().enumerate() {
            if !is_valid_method_name(&call.method) {
                return Err(PackerError::InvalidMethod(call.method.clone()));
            }
            if i > 0 {
                code.push(',');
            }
            code.push_str("API.");
            code.push_str(&call.method);
            code.push('(');
            code.push_str(&serde_json::to_string(&call.params)?);
            code.push(')');
        }
        code.push_str("];");
        Ok(code)
    }
}

impl ScriptCodec for VkScriptCodec {
    fn encode(&self, calls: &[Call]) -> Result<Params> {
        let mut params = Params::new();
        params.insert(CODE_PARAM.to_string(), Value::String(self.script(calls)?));
        Ok(params)
    }

    fn decode(&self, response: ApiResponse, calls: &[Call]) -> Result<Vec<Result<ApiResponse>>> {
        let slots = match response.response {
            Value::Array(slots) => slots,
            other => {
                return Err(PackerError::protocol(format!(
                    "execute returned {} instead of a result array",
                    value_kind(&other)
                )));
            }
        };

        let mut errors = response.execute_errors.into_iter().peekable();
        let outcomes = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                let method = calls.get(i).map(|call| call.method.as_str());
                let failed = matches!(slot, Value::Bool(false) | Value::Null)
                    && errors
                        .peek()
                        .is_some_and(|err| Some(err.method.as_str()) == method);
                match errors.next_if(|_| failed) {
                    Some(err) => Err(PackerError::Execute(err)),
                    None => Ok(ApiResponse::new(slot)),
                }
            })
            .collect();

        Ok(outcomes)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
