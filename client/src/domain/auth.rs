//! Login credentials.
//!
//! Inputs are validated before they reach the transport so an empty form
//! never produces a network call.

use demo_data::records::Role;
use serde::Serialize;
use zeroize::Zeroizing;

/// Error returned when login values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// The optional role is sent with the login request and selects the demo
/// profile when the session is generated locally.
///
/// # Examples
/// ```
/// use demo_data::records::Role;
/// use hospital_client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@example.org ", "secret")
///     .unwrap()
///     .with_role(Role::Admin);
/// assert_eq!(creds.email(), "admin@example.org");
/// assert_eq!(creds.role(), Some(Role::Admin));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
    role: Option<Role>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            role: None,
        })
    }

    /// Attach the role chosen on the login form.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Normalised email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password exactly as entered.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role chosen on the login form, if any.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Request body for the login endpoint.
    pub(crate) fn payload(&self) -> LoginPayload<'_> {
        LoginPayload {
            email: self.email(),
            password: self.password(),
            role: self.role,
        }
    }
}

/// Wire shape of a login request.
#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("nurse@example.org", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin@example.org  ", "secret")]
    #[case("ada@example.org", " spaced password ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[test]
    fn payload_omits_missing_role() {
        let creds = LoginCredentials::try_from_parts("ada@example.org", "pw").expect("valid");
        let json = serde_json::to_value(creds.payload()).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "email": "ada@example.org", "password": "pw" })
        );

        let json = serde_json::to_value(creds.with_role(Role::Patient).payload())
            .expect("serialize");
        assert_eq!(json["role"], "patient");
    }
}
