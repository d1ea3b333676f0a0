//! Error types for tripkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, HTTP status, authentication, storage and input validation
//! failures.

use std::fmt;
use thiserror::Error;

/// The error message the backend puts in a 401 body when the access token
/// has expired and must be refreshed.
pub const TOKEN_EXPIRED_MESSAGE: &str = "authorization failed: Token is expired";

/// The unified error type for tripkit operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No response was received (DNS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server responded with a non-2xx status.
    #[error("{0}")]
    Http(HttpError),

    /// The server rejected the access token as expired.
    #[error("access token expired: {0}")]
    AuthExpired(HttpError),

    /// The refresh endpoint itself failed; carries the underlying error.
    #[error("token refresh failed: {0}")]
    RefreshFailed(#[source] Box<Error>),

    /// Local authentication preconditions were not met.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input validation errors (base URL, header values).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Durable credential storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A successful response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl Error {
    /// Returns the HTTP status code if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) | Error::AuthExpired(e) => Some(e.status),
            _ => None,
        }
    }

    /// Returns the server error if this is a non-2xx response of any kind.
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(e) | Error::AuthExpired(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the underlying cause of a failed refresh.
    pub fn refresh_cause(&self) -> Option<&Error> {
        match self {
            Error::RefreshFailed(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<HttpError> for Error {
    /// Classifies a non-2xx response, singling out the expired-token signal.
    fn from(err: HttpError) -> Self {
        if err.is_token_expired() {
            Error::AuthExpired(err)
        } else {
            Error::Http(err)
        }
    }
}

/// Transport-level errors: the request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Any other client-side HTTP failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-2xx response from the backend.
///
/// The body is kept as JSON. Bodies that are not valid JSON are stored as
/// a JSON string holding the raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: serde_json::Value,
}

impl HttpError {
    /// Create a new HTTP error.
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Build from a raw response body, parsing it as JSON when possible.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text)
                .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// The `error` field of a JSON object body, if present.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(|e| e.as_str())
    }

    /// True for the 401 expired-access-token signal.
    pub fn is_token_expired(&self) -> bool {
        self.status == 401 && self.error_message() == Some(TOKEN_EXPIRED_MESSAGE)
    }

    /// True for a 409 "already exists" response.
    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        match &self.body {
            serde_json::Value::Null => Ok(()),
            serde_json::Value::String(text) => write!(f, ": {}", text),
            body => match self.error_message() {
                Some(message) => write!(f, ": {}", message),
                None => write!(f, ": {}", body),
            },
        }
    }
}

impl std::error::Error for HttpError {}

/// Authentication-related errors raised before any request is sent.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credentials are installed.
    #[error("no active session")]
    NoSession,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// A token or other value cannot be carried in an HTTP header.
    #[error("invalid value for header '{name}'")]
    HeaderValue { name: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Durable credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored session could not be encoded or decoded.
    #[error("invalid stored session: {0}")]
    Format(#[from] serde_json::Error),

    /// The storage location could not be determined.
    #[error("storage unavailable: {message}")]
    Unavailable { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expired_signal_requires_status_and_message() {
        let expired = HttpError::new(401, json!({"error": TOKEN_EXPIRED_MESSAGE}));
        assert!(expired.is_token_expired());

        let other_401 = HttpError::new(401, json!({"error": "authorization failed: invalid"}));
        assert!(!other_401.is_token_expired());

        let wrong_status = HttpError::new(403, json!({"error": TOKEN_EXPIRED_MESSAGE}));
        assert!(!wrong_status.is_token_expired());
    }

    #[test]
    fn from_http_error_classifies_expired_token() {
        let err: Error = HttpError::new(401, json!({"error": TOKEN_EXPIRED_MESSAGE})).into();
        assert!(matches!(err, Error::AuthExpired(_)));
        assert_eq!(err.status(), Some(401));

        let err: Error = HttpError::new(409, json!({"error": "already exists"})).into();
        assert!(matches!(err, Error::Http(ref e) if e.is_conflict()));
    }

    #[test]
    fn from_text_keeps_non_json_bodies() {
        let err = HttpError::from_text(500, "Internal Server Error");
        assert_eq!(err.body, json!("Internal Server Error"));
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");

        let err = HttpError::from_text(503, "");
        assert_eq!(err.body, serde_json::Value::Null);
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn refresh_cause_exposes_underlying_error() {
        let cause = Error::Transport(TransportError::Timeout { duration_ms: 10 });
        let err = Error::RefreshFailed(Box::new(cause));
        assert!(matches!(
            err.refresh_cause(),
            Some(Error::Transport(TransportError::Timeout { .. }))
        ));
        assert!(err.to_string().contains("timed out"));
    }
}
