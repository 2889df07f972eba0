//! Unified error handling for snipctl-core
//!
//! Three kinds of failure reach the caller:
//!
//! - [`CoreError::Validation`] - a request could not be built from its inputs.
//!   Raised before any network call.
//! - [`CoreError::Api`] - the remote service rejected a call. The canonical
//!   [`Code`] is preserved so callers can branch on it.
//! - [`CoreError::DeadlineExceeded`] - a long-running operation did not finish
//!   within its wait budget.
//!
//! # Example
//!
//! ```rust
//! use snipctl_core::{ApiError, Code, CoreError};
//!
//! let err: CoreError = ApiError::Status {
//!     http_status: 409,
//!     code: Code::AlreadyExists,
//!     message: "Secret [my-secret] already exists".to_string(),
//! }
//! .into();
//!
//! assert!(err.is_already_exists());
//! assert!(!err.is_retryable());
//! ```

use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// Canonical status codes shared by the managed service APIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
    /// A status name this crate does not know about, kept verbatim
    Other(String),
}

impl Code {
    /// Parse a status name such as `ALREADY_EXISTS`
    pub fn from_name(name: &str) -> Self {
        match name {
            "CANCELLED" => Code::Cancelled,
            "UNKNOWN" => Code::Unknown,
            "INVALID_ARGUMENT" => Code::InvalidArgument,
            "DEADLINE_EXCEEDED" => Code::DeadlineExceeded,
            "NOT_FOUND" => Code::NotFound,
            "ALREADY_EXISTS" => Code::AlreadyExists,
            "PERMISSION_DENIED" => Code::PermissionDenied,
            "RESOURCE_EXHAUSTED" => Code::ResourceExhausted,
            "FAILED_PRECONDITION" => Code::FailedPrecondition,
            "ABORTED" => Code::Aborted,
            "OUT_OF_RANGE" => Code::OutOfRange,
            "UNIMPLEMENTED" => Code::Unimplemented,
            "INTERNAL" => Code::Internal,
            "UNAVAILABLE" => Code::Unavailable,
            "DATA_LOSS" => Code::DataLoss,
            "UNAUTHENTICATED" => Code::Unauthenticated,
            other => Code::Other(other.to_string()),
        }
    }

    /// Map a numeric `google.rpc.Code` as found in long-running operation errors
    pub fn from_rpc(code: i32) -> Self {
        match code {
            1 => Code::Cancelled,
            2 => Code::Unknown,
            3 => Code::InvalidArgument,
            4 => Code::DeadlineExceeded,
            5 => Code::NotFound,
            6 => Code::AlreadyExists,
            7 => Code::PermissionDenied,
            8 => Code::ResourceExhausted,
            9 => Code::FailedPrecondition,
            10 => Code::Aborted,
            11 => Code::OutOfRange,
            12 => Code::Unimplemented,
            13 => Code::Internal,
            14 => Code::Unavailable,
            15 => Code::DataLoss,
            16 => Code::Unauthenticated,
            other => Code::Other(other.to_string()),
        }
    }

    /// Derive a code from the HTTP status when the body carries no status name
    pub fn from_http(status: u16) -> Self {
        match status {
            400 => Code::InvalidArgument,
            401 => Code::Unauthenticated,
            403 => Code::PermissionDenied,
            404 => Code::NotFound,
            409 => Code::AlreadyExists,
            412 => Code::FailedPrecondition,
            429 => Code::ResourceExhausted,
            499 => Code::Cancelled,
            501 => Code::Unimplemented,
            503 => Code::Unavailable,
            504 => Code::DeadlineExceeded,
            500..=599 => Code::Internal,
            _ => Code::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
            Code::Other(name) => name,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a remote service call
#[derive(Error, Debug)]
pub enum ApiError {
    /// The service answered with an error status
    #[error("{code} (HTTP {http_status}): {message}")]
    Status {
        http_status: u16,
        code: Code,
        message: String,
    },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response could not be decoded into the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// JSON error envelope: `{"error": {"code": 409, "message": "...", "status": "ALREADY_EXISTS"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl ApiError {
    /// Build an error from a non-success HTTP response body
    pub fn from_response(http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => {
                let code = envelope
                    .error
                    .status
                    .as_deref()
                    .map(Code::from_name)
                    .unwrap_or_else(|| Code::from_http(http_status));
                ApiError::Status {
                    http_status,
                    code,
                    message: envelope.error.message,
                }
            }
            Err(_) => ApiError::Status {
                http_status,
                code: Code::from_http(http_status),
                message: body.trim().to_string(),
            },
        }
    }

    /// Canonical code of this error, if the service returned one
    pub fn code(&self) -> Option<&Code> {
        match self {
            ApiError::Status { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Core error type for every recipe
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error from a remote service
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A long-running operation did not finish in time
    #[error("Operation timed out after {0:?}")]
    DeadlineExceeded(Duration),

    /// Input validation failed before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local file error (audio output and the like)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    fn has_code(&self, expected: &Code) -> bool {
        match self {
            CoreError::Api(e) => e.code() == Some(expected),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.has_code(&Code::NotFound)
    }

    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        self.has_code(&Code::AlreadyExists)
    }

    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        self.has_code(&Code::PermissionDenied)
    }

    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        self.has_code(&Code::Unauthenticated)
    }

    /// Returns true for invalid arguments, whether caught locally or remotely
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CoreError::Validation(_)) || self.has_code(&Code::InvalidArgument)
    }

    #[must_use]
    pub fn is_quota_exceeded(&self) -> bool {
        self.has_code(&Code::ResourceExhausted)
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// Returns true if this is a local wait timeout or a remote deadline
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, CoreError::DeadlineExceeded(_)) || self.has_code(&Code::DeadlineExceeded)
    }

    /// Returns true if a caller could reasonably try the same call again.
    ///
    /// Nothing in this crate retries on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::DeadlineExceeded(_) => true,
            CoreError::Api(ApiError::Request(_)) => true,
            CoreError::Api(e) => matches!(
                e.code(),
                Some(Code::Unavailable | Code::ResourceExhausted | Code::Aborted | Code::Internal)
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_status_name() {
        let body = r#"{"error": {"code": 409, "message": "Secret [projects/1/secrets/s] already exists.", "status": "ALREADY_EXISTS"}}"#;
        let err = ApiError::from_response(409, body);
        assert_eq!(err.code(), Some(&Code::AlreadyExists));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_from_response_falls_back_to_http_status() {
        // Compute errors carry no status name
        let body = r#"{"error": {"code": 403, "message": "Required 'compute.disks.create' permission", "errors": [{"reason": "forbidden"}]}}"#;
        let err = ApiError::from_response(403, body);
        assert_eq!(err.code(), Some(&Code::PermissionDenied));
    }

    #[test]
    fn test_from_response_non_json_body() {
        let err = ApiError::from_response(502, "Bad Gateway\n");
        match err {
            ApiError::Status { code, message, .. } => {
                assert_eq!(code, Code::Internal);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_status_name_is_preserved() {
        assert_eq!(
            Code::from_name("SOMETHING_NEW"),
            Code::Other("SOMETHING_NEW".to_string())
        );
        assert_eq!(Code::from_name("SOMETHING_NEW").to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn test_rpc_codes() {
        assert_eq!(Code::from_rpc(6), Code::AlreadyExists);
        assert_eq!(Code::from_rpc(8), Code::ResourceExhausted);
        assert_eq!(Code::from_rpc(42), Code::Other("42".to_string()));
    }

    #[test]
    fn test_core_error_helpers() {
        let quota: CoreError = ApiError::Status {
            http_status: 429,
            code: Code::ResourceExhausted,
            message: "Quota exceeded".to_string(),
        }
        .into();
        assert!(quota.is_quota_exceeded());
        assert!(quota.is_retryable());
        assert!(!quota.is_not_found());

        let denied: CoreError = ApiError::from_response(403, "{}").into();
        assert!(denied.is_permission_denied());
        assert!(!denied.is_retryable());
    }

    #[test]
    fn test_core_error_deadline() {
        let err = CoreError::DeadlineExceeded(Duration::from_secs(60));
        assert!(err.is_timeout());
        assert!(err.is_retryable());
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_core_error_validation() {
        let err = CoreError::validation("project_id must not be empty");
        assert!(err.is_validation());
        assert!(err.is_invalid_argument());
        assert!(!err.is_retryable());
    }
}
