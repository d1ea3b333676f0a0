//! Terminal sign-in prompt.

use colored::Colorize;

use tripkit_core::SignInNavigator;

/// Tells the user to sign in again once the session cannot be refreshed.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl SignInNavigator for TerminalNavigator {
    fn present_sign_in(&self) {
        eprintln!(
            "{} Your session has ended. Run '{}' to sign in again.",
            "!".yellow(),
            "tripkit auth sign-in".bold()
        );
    }
}
