//! Core enumerations for the response envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Machine-checkable failure kind carried by an error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Arguments failed validation; no I/O was performed.
    InvalidInput,
    /// Upstream did not respond within the configured window.
    Timeout,
    /// Upstream responded with a non-success status.
    UpstreamError,
    /// Upstream response could not be interpreted.
    ParseError,
    /// Dispatch target not registered.
    UnknownTool,
    /// Lookup found no matching record.
    NotFound,
    /// Fault inside this crate (configuration, contained panic).
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::UpstreamError => "UPSTREAM_ERROR",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::UnknownTool => "UNKNOWN_TOOL",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_serde_matches_as_str() {
        for code in [
            ErrorCode::InvalidInput,
            ErrorCode::Timeout,
            ErrorCode::UpstreamError,
            ErrorCode::ParseError,
            ErrorCode::UnknownTool,
            ErrorCode::NotFound,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_value(ToolStatus::Success).unwrap(), "success");
        assert_eq!(serde_json::to_value(ToolStatus::Error).unwrap(), "error");
    }
}
