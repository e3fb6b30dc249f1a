//! Driven port for raw HTTP exchanges with the hospital backend.
//!
//! The port only moves bytes. Header policy, bearer tokens and status
//! interpretation belong to [`crate::domain::ApiTransport`], which keeps the
//! adapter free of session concerns and lets tests script responses.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;

/// HTTP verbs used by the hospital API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// Read a resource.
    #[default]
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Upper-case verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb to issue.
    pub method: HttpMethod,
    /// Path appended to the base URL, starting with `/`.
    pub path: String,
    /// Final header set, already merged.
    pub headers: Vec<(String, String)>,
    /// Serialised request body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric HTTP status.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Failures raised before a response status is available.
    pub enum HttpExchangeError {
        /// The request path could not be joined to the base URL.
        InvalidUrl { message: String } => "invalid request url: {message}",
        /// The request did not complete within the configured timeout.
        Timeout { message: String } => "request timed out: {message}",
        /// Connection, TLS or body transfer failed.
        Transport { message: String } => "transport failure: {message}",
    }
}

/// Port performing a single HTTP round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpExchange: Send + Sync {
    /// Send `request` and return whatever status the backend produced.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpExchangeError>;
}

/// Exchange that never reaches a backend, used when running fully offline.
///
/// Every request fails with a transport error, which hybrid mode turns into
/// demo data and fake mode never observes.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineHttpExchange;

#[async_trait]
impl HttpExchange for OfflineHttpExchange {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpExchangeError> {
        Err(HttpExchangeError::transport(format!(
            "offline: {} {} was not sent",
            request.method, request.path
        )))
    }
}
