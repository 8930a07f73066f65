//! In-process stand-in for the remote API
//!
//! [`FakeRemote`] parses the VKScript produced by the packer and answers each
//! sub-call. A sub-call whose params contain `"fail": <code>` comes back as a
//! `false` slot with a matching `execute_errors` entry.

use async_trait::async_trait;
use execute_packer::core::types::CODE_PARAM;
use execute_packer::{ApiResponse, EXECUTE_METHOD, ExecuteError, PackerError, Params, Transport};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::time::Duration;

/// How the fake answers execute calls
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answer every sub-call with `{"method": .., "params": ..}`
    Echo,
    /// Fail the whole execute call
    Fail(PackerError),
    /// Echo, but only return the first `n` slots
    Truncate(usize),
}

/// One call received by the fake
#[derive(Debug, Clone)]
pub struct Invocation {
    pub method: String,
    pub params: Params,
}

#[derive(Debug)]
pub struct FakeRemote {
    behavior: Behavior,
    latency: Option<Duration>,
    invocations: Mutex<Vec<Invocation>>,
}

impl FakeRemote {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            latency: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(Behavior::Echo)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    /// Execute calls received, in arrival order
    pub fn executes(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.method == EXECUTE_METHOD)
            .collect()
    }

    /// Parsed scripts of every execute call received
    pub fn scripts(&self) -> Vec<Vec<(String, Params)>> {
        self.executes()
            .iter()
            .map(|inv| {
                let code = inv
                    .params
                    .get(CODE_PARAM)
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                parse_script(code).unwrap_or_else(|| panic!("unparseable script: {}", code))
            })
            .collect()
    }

    fn answer_script(&self, params: &Params) -> ApiResponse {
        let code = params
            .get(CODE_PARAM)
            .and_then(Value::as_str)
            .unwrap_or_default();
        let calls = parse_script(code).unwrap_or_default();

        let mut slots = Vec::with_capacity(calls.len());
        let mut execute_errors = Vec::new();
        for (method, sub_params) in calls {
            match sub_params.get("fail").and_then(Value::as_i64) {
                Some(code) => {
                    slots.push(Value::Bool(false));
                    execute_errors.push(ExecuteError::new(method, code, "forced failure"));
                }
                None => slots.push(json!({"method": method, "params": sub_params})),
            }
        }

        if let Behavior::Truncate(n) = self.behavior {
            slots.truncate(n);
        }

        ApiResponse {
            response: Value::Array(slots),
            execute_errors,
        }
    }
}

#[async_trait]
impl Transport for FakeRemote {
    async fn invoke(&self, method: &str, params: Params) -> Result<ApiResponse, PackerError> {
        self.invocations.lock().push(Invocation {
            method: method.to_string(),
            params: params.clone(),
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if method != EXECUTE_METHOD {
            return Ok(ApiResponse::new(json!({"direct": method, "params": params})));
        }

        match &self.behavior {
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Echo | Behavior::Truncate(_) => Ok(self.answer_script(&params)),
        }
    }
}

/// Parse `return [API.m({..}),API.n({..})];` into its calls
pub fn parse_script(code: &str) -> Option<Vec<(String, Params)>> {
    let mut rest = code.strip_prefix("return [")?.strip_suffix("];")?;
    let mut calls = Vec::new();

    while !rest.is_empty() {
        rest = rest.strip_prefix("API.")?;
        let open = rest.find('(')?;
        let method = rest[..open].to_string();
        rest = &rest[open + 1..];

        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Params>();
        let params = stream.next()?.ok()?;
        let consumed = stream.byte_offset();
        rest = rest[consumed..].strip_prefix(')')?;
        rest = rest.strip_prefix(',').unwrap_or(rest);

        calls.push((method, params));
    }

    Some(calls)
}

#[test]
fn test_parse_script() {
    let calls = parse_script(r#"return [API.a.x({"k":"v),API.("}),API.b.y({})];"#).unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "a.x");
    assert_eq!(calls[0].1.get("k"), Some(&json!("v),API.(")));
    assert_eq!(calls[1].0, "b.y");
}

#[test]
fn test_parse_empty_script() {
    assert_eq!(parse_script("return [];").map(|c| c.len()), Some(0));
    assert!(parse_script("return 1;").is_none());
}
