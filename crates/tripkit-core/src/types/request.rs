//! Request and response descriptors.
//!
//! These types describe a backend call as plain data. The transport turns
//! an [`ApiRequest`] into an [`ApiResponse`]; everything in between
//! (header stamping, refresh and retry) operates on these values.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::tokens::CredentialPair;

/// Header carrying the bearer access token.
pub const AUTHORIZATION: &str = "authorization";

/// Header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a successful response body should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Json,
    Bytes,
}

/// An outbound request.
///
/// Each call owns its descriptor, including the `retried` marker, so
/// concurrent requests never see each other's retry state.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub response_kind: ResponseKind,
    pub headers: Vec<(String, String)>,
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            response_kind: ResponseKind::Json,
            headers: Vec::new(),
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Set a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn response_kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    /// Returns a header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.remove_header(name);
        self.headers.push((name.to_string(), value.into()));
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    /// Replace the auth headers with those for `credentials`.
    ///
    /// `None` removes both headers.
    pub fn with_credentials(mut self, credentials: Option<&CredentialPair>) -> Self {
        match credentials {
            Some(pair) => {
                self.set_header(
                    AUTHORIZATION,
                    format!("Bearer {}", pair.access_token.as_str()),
                );
                self.set_header(REFRESH_TOKEN_HEADER, pair.refresh_token.as_str());
            }
            None => {
                self.remove_header(AUTHORIZATION);
                self.remove_header(REFRESH_TOKEN_HEADER);
            }
        }
        self
    }

    /// True if the auth headers were stamped from `credentials`.
    pub fn was_sent_with(&self, credentials: Option<&CredentialPair>) -> bool {
        match credentials {
            Some(pair) => {
                self.header(AUTHORIZATION)
                    == Some(format!("Bearer {}", pair.access_token.as_str()).as_str())
                    && self.header(REFRESH_TOKEN_HEADER) == Some(pair.refresh_token.as_str())
            }
            None => {
                self.header(AUTHORIZATION).is_none() && self.header(REFRESH_TOKEN_HEADER).is_none()
            }
        }
    }

    /// The same request, marked as already retried.
    pub fn into_retry(mut self) -> Self {
        self.retried = true;
        self
    }
}

/// A successful (2xx) response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Bytes(Vec<u8>),
}

/// A successful (2xx) response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(body),
        }
    }

    pub fn bytes(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body: ResponseBody::Bytes(body),
        }
    }

    /// Decode the body as JSON into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self.body {
            ResponseBody::Json(value) => {
                serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
            }
            ResponseBody::Bytes(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
            }
        }
    }

    /// Take the raw body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self.body {
            ResponseBody::Bytes(bytes) => bytes,
            ResponseBody::Json(serde_json::Value::Null) => Vec::new(),
            ResponseBody::Json(value) => value.to_string().into_bytes(),
        }
    }
}
