//! tripkit-http - Authenticated HTTP client for the travel-planning backend.
//!
//! [`ApiClient`] sends every call through [`AuthRefresh`], a decorator over
//! the raw [`ReqwestTransport`] that attaches the current credentials and
//! refreshes them once when the backend reports an expired access token.

mod api;
mod client;
mod config;
pub mod endpoints;
mod refresh;
mod transport;

pub use api::LocationOutcome;
pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use endpoints::{NewBudget, NewSchedule, NewTripSession, Provider, ScheduleUpdate};
pub use refresh::AuthRefresh;
pub use transport::ReqwestTransport;
