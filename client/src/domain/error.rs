//! Error type returned by the transport and the domain API modules.

use super::ports::{HttpExchangeError, SessionStorageError};

/// Failures surfaced to callers running in `real` mode.
///
/// Hybrid mode absorbs every variant into demo data and fake mode never
/// produces one, except for session storage failures on login/logout which
/// concern local state rather than the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The backend answered 401; the session was cleared and the user sent to
    /// the login entry point. Retrying cannot succeed.
    #[error("authentication expired; sign in again")]
    AuthenticationExpired,
    /// The backend answered with a non-2xx status other than 401.
    #[error("request failed with status {status}: {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Status line plus a preview of the response body.
        message: String,
    },
    /// No response was received.
    #[error("transport failure: {message}")]
    Transport {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The request payload could not be serialised.
    #[error("request encoding failed: {message}")]
    Encode {
        /// Serialiser message.
        message: String,
    },
    /// The response body was not the expected JSON shape.
    #[error("response decoding failed: {message}")]
    Decode {
        /// Deserialiser message.
        message: String,
    },
    /// Session storage could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionStorageError),
    /// The operation needs a stored session and none exists.
    #[error("no stored session; sign in first")]
    NotAuthenticated,
}

impl ClientError {
    /// Build a [`ClientError::RequestFailed`].
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Build a [`ClientError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a [`ClientError::Encode`].
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Build a [`ClientError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, when the backend produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationExpired => Some(401),
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpExchangeError> for ClientError {
    fn from(error: HttpExchangeError) -> Self {
        match error {
            HttpExchangeError::Transport { message } => Self::Transport { message },
            other => Self::transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(
        HttpExchangeError::timeout("30s elapsed"),
        "transport failure: request timed out: 30s elapsed"
    )]
    #[case(
        HttpExchangeError::transport("connection refused"),
        "transport failure: connection refused"
    )]
    fn exchange_errors_become_transport_errors(
        #[case] source: HttpExchangeError,
        #[case] expected: &str,
    ) {
        let err = ClientError::from(source);
        assert!(matches!(err, ClientError::Transport { .. }));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn status_is_exposed_for_backend_failures() {
        assert_eq!(ClientError::AuthenticationExpired.status(), Some(401));
        assert_eq!(ClientError::request_failed(503, "status 503").status(), Some(503));
        assert_eq!(ClientError::decode("eof").status(), None);
    }

    #[test]
    fn session_errors_are_transparent() {
        let err = ClientError::from(SessionStorageError::io("disk full"));
        assert_eq!(err.to_string(), "session storage I/O failed: disk full");
    }
}
