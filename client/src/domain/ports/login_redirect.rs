//! Driven port for sending the user back to the login entry point.

/// Navigation hook invoked after the backend rejects the session.
#[cfg_attr(test, mockall::automock)]
pub trait LoginRedirect: Send + Sync {
    /// Navigate to the login entry point.
    fn redirect_to_login(&self);
}

/// Redirect that does nothing, for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLoginRedirect;

impl LoginRedirect for NoOpLoginRedirect {
    fn redirect_to_login(&self) {}
}
