//! Envelope - the uniform request/response wrapper for every tool call.
//!
//! A [`ToolResponse`] is created once per invocation and never mutated after
//! it is returned. Exactly one of `data` / `error_code` is populated and
//! `status` always agrees with which one; the constructors are the only way
//! to build a response and deserialization re-checks the same rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Error, RequestId};

pub mod enums;

pub use enums::*;

// =============================================================================
// Request
// =============================================================================

/// One tool invocation as supplied by a caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRequest {
    pub tool_name: String,

    #[serde(default = "empty_object")]
    pub arguments: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ToolRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }
}

// =============================================================================
// Usage metadata
// =============================================================================

/// Timing and upstream metadata recorded for the Executing phase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolUsage {
    /// Upstream URL that was called; absent for static tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Elapsed wall-clock milliseconds.
    pub duration_ms: f64,

    /// When execution started.
    pub timestamp: DateTime<Utc>,
}

impl ToolUsage {
    pub fn new(endpoint: Option<String>, duration_ms: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            endpoint,
            duration_ms,
            timestamp,
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Uniform response envelope returned by every tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawToolResponse")]
pub struct ToolResponse {
    status: ToolStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<ToolUsage>,
}

impl ToolResponse {
    /// Successful response carrying a payload.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: ToolStatus::Success,
            message: message.into(),
            data: Some(data),
            error_code: None,
            usage: None,
        }
    }

    /// Failed response carrying an error code.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
            data: None,
            error_code: Some(code),
            usage: None,
        }
    }

    /// Failed response built from a crate error.
    pub fn from_error(err: &Error) -> Self {
        Self::failure(err.code(), err.to_string())
    }

    pub fn with_usage(mut self, usage: ToolUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn status(&self) -> ToolStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    pub fn usage(&self) -> Option<&ToolUsage> {
        self.usage.as_ref()
    }

    /// Consume the envelope and return its JSON form.
    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or_else(|e| {
            serde_json::json!({
                "status": "error",
                "message": format!("failed to serialize response: {}", e),
                "error_code": ErrorCode::InternalError,
            })
        })
    }
}

/// Unchecked wire form; converted into [`ToolResponse`] only if consistent.
#[derive(Deserialize)]
struct RawToolResponse {
    status: ToolStatus,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error_code: Option<ErrorCode>,
    #[serde(default)]
    usage: Option<ToolUsage>,
}

impl TryFrom<RawToolResponse> for ToolResponse {
    type Error = String;

    fn try_from(raw: RawToolResponse) -> Result<Self, Self::Error> {
        match (raw.status, &raw.data, raw.error_code) {
            (ToolStatus::Success, Some(_), None) | (ToolStatus::Error, None, Some(_)) => Ok(Self {
                status: raw.status,
                message: raw.message,
                data: raw.data,
                error_code: raw.error_code,
                usage: raw.usage,
            }),
            (ToolStatus::Success, _, _) => {
                Err("success response must carry data and no error_code".to_string())
            }
            (ToolStatus::Error, _, _) => {
                Err("error response must carry error_code and no data".to_string())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_populates_data_only() {
        let resp = ToolResponse::success("ok", json!({"label": "x"}));
        assert!(resp.is_success());
        assert!(resp.data().is_some());
        assert!(resp.error_code().is_none());
    }

    #[test]
    fn test_failure_populates_code_only() {
        let resp = ToolResponse::failure(ErrorCode::NotFound, "missing");
        assert_eq!(resp.status(), ToolStatus::Error);
        assert!(resp.data().is_none());
        assert_eq!(resp.error_code(), Some(ErrorCode::NotFound));
    }

    #[test]
    fn test_serialized_shape_skips_absent_fields() {
        let value = ToolResponse::failure(ErrorCode::Timeout, "slow").into_value();
        assert_eq!(
            value,
            json!({"status": "error", "message": "slow", "error_code": "TIMEOUT"})
        );
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_envelope() {
        let bad = json!({"status": "success", "message": "x", "error_code": "TIMEOUT"});
        assert!(serde_json::from_value::<ToolResponse>(bad).is_err());

        let bad = json!({"status": "error", "message": "x", "data": {}});
        assert!(serde_json::from_value::<ToolResponse>(bad).is_err());

        let good = json!({"status": "error", "message": "x", "error_code": "NOT_FOUND"});
        let resp: ToolResponse = serde_json::from_value(good).unwrap();
        assert_eq!(resp.error_code(), Some(ErrorCode::NotFound));
    }

    #[test]
    fn test_request_defaults_arguments() {
        let req: ToolRequest = serde_json::from_value(json!({"tool_name": "list_tile_providers"})).unwrap();
        assert_eq!(req.arguments, json!({}));
        assert!(req.request_id.is_none());
    }
}
