//! Transport trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{ApiRequest, ApiResponse};

/// Sends one request and returns its response.
///
/// Implementations return `Ok` only for 2xx responses. Non-2xx responses
/// become [`Error::Http`] or, for the expired-token signal,
/// [`Error::AuthExpired`]; failures without a response become
/// [`Error::Transport`].
///
/// Decorators implement this trait too, wrapping an inner transport.
///
/// [`Error::Http`]: crate::Error::Http
/// [`Error::AuthExpired`]: crate::Error::AuthExpired
/// [`Error::Transport`]: crate::Error::Transport
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}
