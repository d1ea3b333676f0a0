//! tripkit-core - Core types and traits for the tripkit travel-planning client.
//!
//! This crate does no network I/O. It defines the credential types, the
//! shared [`AuthState`], the request/response descriptors, the error
//! taxonomy, and the traits the HTTP client is assembled from:
//! [`Transport`], [`CredentialStore`] and [`SignInNavigator`].

pub mod auth_state;
pub mod error;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use auth_state::AuthState;
pub use error::{Error, HttpError, TOKEN_EXPIRED_MESSAGE};
pub use session::UserSession;
pub use tokens::{AccessToken, CredentialPair, RefreshToken};
pub use traits::{CredentialStore, MemoryCredentialStore, NoopNavigator, SignInNavigator, Transport};
pub use types::{ApiRequest, ApiResponse, ApiUrl, Method, ResponseBody, ResponseKind};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
