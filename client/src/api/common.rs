//! Authentication and operations shared by every dashboard.

use std::sync::Arc;

use demo_data::NOTIFICATION_COUNT;
use demo_data::records::{
    Acknowledgement, AuthSession, Department, Notification, Role, TokenPair, UserRecord,
};
use serde_json::json;
use tracing::{debug, info};

use super::{ClientCore, get, with_body, without_body};
use crate::domain::ports::HttpMethod;
use crate::domain::{ClientError, FetchResult, LoginCredentials, Session};

/// Session lifecycle and role-independent lookups.
#[derive(Clone)]
pub struct CommonApi {
    core: Arc<ClientCore>,
}

impl CommonApi {
    pub(super) fn new(core: Arc<ClientCore>) -> Self {
        Self { core }
    }

    /// Sign in and persist the resulting session.
    ///
    /// Demo logins accept any credentials and take their role from the
    /// credentials' hint, defaulting to patient.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode and
    /// [`ClientError::Session`] when the session cannot be stored.
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<FetchResult<AuthSession>, ClientError> {
        let demo = self.core.demo;
        let request = with_body(
            "common.login",
            HttpMethod::Post,
            "/auth/login",
            &credentials.payload(),
        )?;
        let result = self
            .core
            .dispatch(request, || {
                demo.auth_session(
                    credentials.email(),
                    credentials.role().unwrap_or(Role::Patient),
                )
            })
            .await?;
        self.core
            .session
            .save(&Session::from(result.data.clone()))?;
        info!(
            role = %result.data.user.role,
            real = result.is_real_data,
            "signed in"
        );
        Ok(result)
    }

    /// Sign out.
    ///
    /// The backend is told first, under the usual mode policy, so the call
    /// still carries the bearer token. The local session is cleared whatever
    /// the backend answered.
    ///
    /// # Errors
    ///
    /// - Transport failures in real mode, after the session is cleared.
    /// - [`ClientError::Session`] when the stored session cannot be removed.
    pub async fn logout(&self) -> Result<FetchResult<Acknowledgement>, ClientError> {
        let request = without_body("common.logout", HttpMethod::Post, "/auth/logout");
        let outcome = self.core.acknowledge(request, "Signed out").await;
        self.core.session.clear()?;
        match &outcome {
            Ok(result) => info!(real = result.is_real_data, "signed out"),
            Err(err) => debug!(error = %err, "backend logout failed; local session cleared"),
        }
        outcome
    }

    /// Exchange the stored refresh token for new tokens and store them.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] when no refresh token is stored.
    /// - [`ClientError::Session`] when the store cannot be read or written.
    /// - Transport failures in real mode.
    pub async fn refresh_session(&self) -> Result<FetchResult<TokenPair>, ClientError> {
        let refresh_token = self
            .core
            .session
            .refresh_token()?
            .ok_or(ClientError::NotAuthenticated)?;
        let demo = self.core.demo;
        let request = with_body(
            "common.refresh_session",
            HttpMethod::Post,
            "/auth/refresh",
            &json!({ "refreshToken": refresh_token }),
        )?;
        let result = self
            .core
            .dispatch(request, || demo.token_pair(&refresh_token))
            .await?;
        self.core
            .session
            .set_tokens(&result.data.token, &result.data.refresh_token)?;
        Ok(result)
    }

    /// Profile of the signed-in user.
    ///
    /// Demo data prefers the stored profile, then a generated one for the
    /// stored role.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_profile(&self) -> Result<FetchResult<UserRecord>, ClientError> {
        let session = &self.core.session;
        let demo = self.core.demo;
        self.core
            .dispatch(get("common.get_profile", "/auth/me"), || {
                session.user().ok().flatten().unwrap_or_else(|| {
                    let role = session.role().ok().flatten().unwrap_or(Role::Patient);
                    demo.profile(role)
                })
            })
            .await
    }

    /// Hospital departments.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_departments(&self) -> Result<FetchResult<Vec<Department>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("common.get_departments", "/departments"), || {
                demo.departments()
            })
            .await
    }

    /// Notifications for the signed-in user, newest first.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn get_notifications(
        &self,
    ) -> Result<FetchResult<Vec<Notification>>, ClientError> {
        let demo = self.core.demo;
        self.core
            .dispatch(get("common.get_notifications", "/notifications"), || {
                demo.notifications(NOTIFICATION_COUNT)
            })
            .await
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Propagates transport failures in real mode.
    pub async fn mark_notification_read(
        &self,
        notification_id: &str,
    ) -> Result<FetchResult<Acknowledgement>, ClientError> {
        let request = without_body(
            "common.mark_notification_read",
            HttpMethod::Patch,
            format!("/notifications/{notification_id}/read"),
        );
        self.core
            .acknowledge(request, "Notification marked as read")
            .await
    }
}
