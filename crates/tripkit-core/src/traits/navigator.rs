//! Sign-in navigation trait.

/// Presents the sign-in view after credentials become unusable.
pub trait SignInNavigator: Send + Sync {
    /// Called once per irrecoverable refresh failure, after credentials
    /// have been cleared.
    fn present_sign_in(&self);
}

/// A navigator that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl SignInNavigator for NoopNavigator {
    fn present_sign_in(&self) {}
}
