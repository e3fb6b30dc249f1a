//! Login redirect that publishes navigation requests on a watch channel.
//!
//! The embedding shell subscribes and performs the actual navigation; the
//! client only announces where the user must go.

use tokio::sync::watch;
use tracing::info;

use crate::domain::ports::LoginRedirect;

/// Publishes the login path whenever the session is rejected.
pub struct NavigatorLoginRedirect {
    login_path: String,
    target: watch::Sender<Option<String>>,
}

impl NavigatorLoginRedirect {
    /// Redirect to `login_path`.
    pub fn new(login_path: impl Into<String>) -> Self {
        let (target, _) = watch::channel(None);
        Self {
            login_path: login_path.into(),
            target,
        }
    }

    /// Path published on redirect.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Receive navigation requests. The value is `None` until the first
    /// redirect.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.target.subscribe()
    }
}

impl LoginRedirect for NavigatorLoginRedirect {
    fn redirect_to_login(&self) {
        info!(login_path = %self.login_path, "navigating to login");
        self.target.send_replace(Some(self.login_path.clone()));
    }
}
