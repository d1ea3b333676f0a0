//! Seams between the client and its collaborators.

mod navigator;
mod store;
mod transport;

pub use navigator::{NoopNavigator, SignInNavigator};
pub use store::{CredentialStore, MemoryCredentialStore};
pub use transport::Transport;
