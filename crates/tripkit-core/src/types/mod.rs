//! Core tripkit types.
//!
//! URL validation happens at construction time; request and response
//! descriptors are plain data shared by every transport.

mod api_url;
mod request;

pub use api_url::ApiUrl;
pub use request::{
    AUTHORIZATION, ApiRequest, ApiResponse, Method, REFRESH_TOKEN_HEADER, ResponseBody,
    ResponseKind,
};
