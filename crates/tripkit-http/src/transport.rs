//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument, trace, warn};

use tripkit_core::error::{InvalidInputError, TransportError};
use tripkit_core::{
    ApiRequest, ApiResponse, ApiUrl, Error, HttpError, Method, ResponseKind, Result, Transport,
};

use crate::config::ClientConfig;

/// Sends requests to a single backend over HTTP.
///
/// This is the raw transport: it attaches whatever headers the request
/// carries and classifies the response, nothing more.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: ApiUrl,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport for the configured base URL and timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| transport_error(e, config.timeout))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Handle a response, reading the body or building the error.
    async fn handle_response(
        &self,
        response: reqwest::Response,
        kind: ResponseKind,
    ) -> Result<ApiResponse> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            match kind {
                ResponseKind::Json => {
                    let text = response
                        .text()
                        .await
                        .map_err(|e| transport_error(e, self.timeout))?;
                    let body = if text.trim().is_empty() {
                        serde_json::Value::Null
                    } else {
                        serde_json::from_str(&text).map_err(|e| Error::Decode(e.to_string()))?
                    };
                    Ok(ApiResponse::json(status.as_u16(), body))
                }
                ResponseKind::Bytes => {
                    let bytes = response
                        .bytes()
                        .await
                        .map_err(|e| transport_error(e, self.timeout))?;
                    Ok(ApiResponse::bytes(status.as_u16(), bytes.to_vec()))
                }
            }
        } else {
            // Without the body an expired token cannot be told from any other 401.
            let text = response.text().await.map_err(|e| {
                warn!(status = %status, error = %e, "Failed to read error response body");
                transport_error(e, self.timeout)
            })?;
            Err(HttpError::from_text(status.as_u16(), &text).into())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.base_url.endpoint(&request.path);
        debug!(%url, retried = request.retried, "Sending request");
        trace!(query = ?request.query, "query parameters");

        let mut builder = self
            .client
            .request(reqwest_method(request.method), &url)
            .headers(header_map(&request.headers)?);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        self.handle_response(response, request.response_kind).await
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Convert request headers, rejecting values HTTP cannot carry.
fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let invalid = || InvalidInputError::HeaderValue { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Map a `reqwest` failure to a transport error.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: timeout_millis(timeout),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// Whole milliseconds in `timeout`, saturating at `u64::MAX`.
fn timeout_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
