use anyhow::{Context, Result};
use countdown_notify::NotifyError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Map<String, Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_arguments(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments: arguments_map(arguments),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MethodResponse {
    Success {
        result: Option<Value>,
    },
    NotImplemented,
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
}

impl MethodResponse {
    pub fn success() -> Self {
        MethodResponse::Success { result: None }
    }

    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        MethodResponse::Error {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MethodResponse::Success { .. })
    }
}

impl From<NotifyError> for MethodResponse {
    fn from(err: NotifyError) -> Self {
        let details = match &err {
            NotifyError::Platform { operation, .. } => Some(json!({ "operation": operation })),
        };
        MethodResponse::error("platform_error", err.to_string(), details)
    }
}

#[derive(Deserialize)]
struct CallEnvelope {
    method: String,
    #[serde(default)]
    arguments: Value,
}

/// Decodes `{"method": "...", "arguments": {...}}`; `arguments` may be
/// missing or null.
pub fn decode_call(raw: &str) -> Result<MethodCall> {
    let envelope: CallEnvelope =
        serde_json::from_str(raw).context("malformed method call envelope")?;
    Ok(MethodCall::with_arguments(envelope.method, envelope.arguments))
}

pub fn encode_response(response: &MethodResponse) -> Result<String> {
    serde_json::to_string(response).context("failed to encode method response")
}

fn arguments_map(arguments: Value) -> Map<String, Value> {
    match arguments {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            tracing::warn!(arguments = %other, "ignoring non-map method arguments");
            Map::new()
        }
    }
}
