//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and carry a
//! machine-checkable [`ErrorCode`] so callers can decide whether to retry with
//! different arguments.

use thiserror::Error;

use crate::envelope::ErrorCode;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for map-tools.
#[derive(Error, Debug)]
pub enum Error {
    /// Arguments failed validation before any I/O (maps to INVALID_INPUT).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upstream did not answer within the configured window (maps to TIMEOUT).
    #[error("timeout: {0}")]
    Timeout(String),

    /// Upstream answered with a non-success status or reported an error
    /// (maps to UPSTREAM_ERROR).
    #[error("{}", upstream_display(*status, message))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Upstream response could not be interpreted (maps to PARSE_ERROR).
    #[error("parse error: {0}")]
    Parse(String),

    /// Dispatch target is not registered (maps to UNKNOWN_TOOL).
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Lookup found no matching record (maps to NOT_FOUND).
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid process configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal errors, including contained panics.
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction errors.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

fn upstream_display(status: Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("upstream error (HTTP {}): {}", code, message),
        None => format!("upstream error: {}", message),
    }
}

impl Error {
    /// Machine-checkable code for the response envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidInput(_) => ErrorCode::InvalidInput,
            Error::Timeout(_) => ErrorCode::Timeout,
            Error::Upstream { .. } => ErrorCode::UpstreamError,
            Error::Parse(_) => ErrorCode::ParseError,
            Error::UnknownTool(_) => ErrorCode::UnknownTool,
            Error::NotFound(_) => ErrorCode::NotFound,
            Error::Config(_)
            | Error::Internal(_)
            | Error::Serialization(_)
            | Error::Http(_) => ErrorCode::InternalError,
        }
    }
}

// Convenience constructors
impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    pub fn upstream(status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
