//! Authenticated JSON transport over the [`HttpExchange`] port.
//!
//! The transport owns request policy: default headers, bearer token
//! selection and status interpretation. A 401 tears the session down and
//! sends the user to the login entry point before failing.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::ClientError;
use super::ports::{HttpExchange, HttpMethod, HttpRequest, LoginRedirect};
use super::session::SessionStore;

const CONTENT_TYPE: &str = "Content-Type";
const AUTHORIZATION: &str = "Authorization";
const JSON_MEDIA_TYPE: &str = "application/json";
const UNAUTHORIZED: u16 = 401;
const PREVIEW_CHAR_LIMIT: usize = 160;

/// Method, extra headers and body of one API call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Verb to issue; `GET` by default.
    pub method: HttpMethod,
    /// Caller headers. They override defaults with the same name.
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
}

impl RequestOptions {
    /// Options for a request with `method` and no body.
    #[must_use]
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a caller header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// JSON transport bound to a session store and a login redirect.
#[derive(Clone)]
pub struct ApiTransport {
    exchange: Arc<dyn HttpExchange>,
    session: SessionStore,
    redirect: Arc<dyn LoginRedirect>,
}

impl ApiTransport {
    /// Wire the transport to its ports.
    pub fn new(
        exchange: Arc<dyn HttpExchange>,
        session: SessionStore,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Self {
        Self {
            exchange,
            session,
            redirect,
        }
    }

    /// Session store consulted for bearer tokens.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Perform one request and return the parsed JSON body.
    ///
    /// `token` takes precedence over the stored bearer token. An empty
    /// success body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthenticationExpired`] on 401, after clearing the
    ///   session and redirecting to login.
    /// - [`ClientError::RequestFailed`] on any other non-2xx status.
    /// - [`ClientError::Transport`] when no response arrives.
    /// - [`ClientError::Decode`] when a success body is not JSON.
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let RequestOptions {
            method,
            headers,
            body,
        } = options;
        let mut headers = merge_headers(headers);
        if let Some(bearer) = self.bearer_token(token) {
            set_header(&mut headers, AUTHORIZATION, format!("Bearer {bearer}"));
        }

        debug!(method = %method, path, "sending api request");
        let response = self
            .exchange
            .send(HttpRequest {
                method,
                path: path.to_owned(),
                headers,
                body: body.map(|value| value.to_string()),
            })
            .await?;

        if response.status == UNAUTHORIZED {
            self.expire_session(path);
            return Err(ClientError::AuthenticationExpired);
        }
        if !response.is_success() {
            debug!(status = response.status, path, "api request rejected");
            return Err(map_status_error(response.status, &response.body));
        }
        parse_body(&response.body)
    }

    /// Perform one request and decode the body into `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiTransport::request`], plus [`ClientError::Decode`] when the
    /// JSON does not match `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let value = self.request(path, options, token).await?;
        serde_json::from_value(value)
            .map_err(|err| ClientError::decode(format!("unexpected payload from {path}: {err}")))
    }

    fn bearer_token(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(token) = explicit {
            return Some(token.to_owned());
        }
        self.session.access_token().unwrap_or_else(|err| {
            warn!(error = %err, "stored token unreadable; sending request without it");
            None
        })
    }

    fn expire_session(&self, path: &str) {
        if let Err(err) = self.session.clear() {
            warn!(error = %err, "session teardown incomplete");
        }
        info!(path, "backend rejected session; redirecting to login");
        self.redirect.redirect_to_login();
    }
}

fn merge_headers(caller: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = vec![(CONTENT_TYPE.to_owned(), JSON_MEDIA_TYPE.to_owned())];
    for (name, value) in caller {
        set_header(&mut headers, &name, value);
    }
    headers
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
    headers.push((name.to_owned(), value));
}

fn parse_body(body: &[u8]) -> Result<Value, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|err| ClientError::decode(format!("invalid JSON payload: {err}")))
}

fn map_status_error(status: u16, body: &[u8]) -> ClientError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {preview}")
    };
    ClientError::request_failed(status, message)
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Transport policy coverage against a mocked exchange.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::domain::ports::{
        HttpExchangeError, HttpResponse, InMemorySessionStorage, MockHttpExchange,
        MockLoginRedirect, NoOpLoginRedirect, SessionStorage,
    };

    /// Exchange that records requests and replays one canned response.
    struct CannedExchange {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedExchange {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: HttpResponse::new(status, body.as_bytes().to_vec()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> HttpRequest {
            self.seen
                .lock()
                .expect("requests lock")
                .last()
                .cloned()
                .expect("a request was sent")
        }
    }

    #[async_trait]
    impl HttpExchange for CannedExchange {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpExchangeError> {
            self.seen.lock().expect("requests lock").push(request);
            Ok(self.response.clone())
        }
    }

    #[fixture]
    fn storage() -> Arc<InMemorySessionStorage> {
        Arc::new(InMemorySessionStorage::new())
    }

    fn transport(
        exchange: Arc<dyn HttpExchange>,
        storage: Arc<InMemorySessionStorage>,
    ) -> ApiTransport {
        ApiTransport::new(
            exchange,
            SessionStore::new(storage),
            Arc::new(NoOpLoginRedirect),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn adds_json_content_type_and_stored_bearer(storage: Arc<InMemorySessionStorage>) {
        storage.set("token", "stored").expect("seed token");
        let exchange = CannedExchange::new(200, r#"{"ok":true}"#);
        let value = transport(exchange.clone(), storage)
            .request("/departments", RequestOptions::default(), None)
            .await
            .expect("request succeeds");

        assert_eq!(value, json!({ "ok": true }));
        let sent = exchange.last_request();
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.header("authorization"), Some("Bearer stored"));
    }

    #[rstest]
    #[tokio::test]
    async fn explicit_token_wins_over_stored_token(storage: Arc<InMemorySessionStorage>) {
        storage.set("token", "stored").expect("seed token");
        let exchange = CannedExchange::new(200, "{}");
        transport(exchange.clone(), storage)
            .request("/auth/me", RequestOptions::default(), Some("explicit"))
            .await
            .expect("request succeeds");

        assert_eq!(
            exchange.last_request().header("Authorization"),
            Some("Bearer explicit")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn omits_authorization_without_any_token(storage: Arc<InMemorySessionStorage>) {
        let exchange = CannedExchange::new(200, "[]");
        transport(exchange.clone(), storage)
            .request("/departments", RequestOptions::default(), None)
            .await
            .expect("request succeeds");

        assert_eq!(exchange.last_request().header("authorization"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn caller_headers_override_defaults(storage: Arc<InMemorySessionStorage>) {
        let exchange = CannedExchange::new(200, "{}");
        let options = RequestOptions::new(HttpMethod::Post)
            .with_header("content-type", "application/merge-patch+json")
            .with_header("X-Trace", "t-1")
            .with_body(json!({ "status": "completed" }));
        transport(exchange.clone(), storage)
            .request("/appointments/a1/status", options, None)
            .await
            .expect("request succeeds");

        let sent = exchange.last_request();
        let content_types = sent
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .count();
        assert_eq!(content_types, 1);
        assert_eq!(sent.header("Content-Type"), Some("application/merge-patch+json"));
        assert_eq!(sent.header("x-trace"), Some("t-1"));
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.body.as_deref(), Some(r#"{"status":"completed"}"#));
    }

    #[rstest]
    #[tokio::test]
    async fn unauthorized_clears_session_and_redirects(storage: Arc<InMemorySessionStorage>) {
        for (key, value) in [
            ("token", "t"),
            ("refreshToken", "r"),
            ("role", "admin"),
            ("user", "{}"),
        ] {
            storage.set(key, value).expect("seed");
        }
        let mut redirect = MockLoginRedirect::new();
        redirect.expect_redirect_to_login().times(1).return_const(());
        let transport = ApiTransport::new(
            CannedExchange::new(401, r#"{"error":"expired"}"#),
            SessionStore::new(storage.clone()),
            Arc::new(redirect),
        );

        let err = transport
            .request("/admin/stats", RequestOptions::default(), None)
            .await
            .expect_err("401 must fail");

        assert_eq!(err, ClientError::AuthenticationExpired);
        assert!(storage.is_empty(), "all session keys should be removed");
    }

    #[rstest]
    #[tokio::test]
    async fn next_request_after_401_carries_no_token(storage: Arc<InMemorySessionStorage>) {
        storage.set("token", "stale").expect("seed token");
        let rejecting = transport(CannedExchange::new(401, ""), storage.clone());
        rejecting
            .request("/admin/stats", RequestOptions::default(), None)
            .await
            .expect_err("401 must fail");

        let exchange = CannedExchange::new(200, "{}");
        transport(exchange.clone(), storage)
            .request("/admin/stats", RequestOptions::default(), None)
            .await
            .expect("request succeeds");
        assert_eq!(exchange.last_request().header("authorization"), None);
    }

    #[rstest]
    #[case(404, "", "status 404")]
    #[case(500, "  internal \n  error  ", "status 500: internal error")]
    #[tokio::test]
    async fn other_statuses_become_request_failures(
        storage: Arc<InMemorySessionStorage>,
        #[case] status: u16,
        #[case] body: &str,
        #[case] message: &str,
    ) {
        let err = transport(CannedExchange::new(status, body), storage)
            .request("/admin/stats", RequestOptions::default(), None)
            .await
            .expect_err("non-2xx must fail");
        assert_eq!(err, ClientError::request_failed(status, message));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_success_body_is_null(storage: Arc<InMemorySessionStorage>) {
        let value = transport(CannedExchange::new(204, ""), storage)
            .request(
                "/admin/doctors/d1",
                RequestOptions::new(HttpMethod::Delete),
                None,
            )
            .await
            .expect("request succeeds");
        assert_eq!(value, Value::Null);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error(storage: Arc<InMemorySessionStorage>) {
        let err = transport(CannedExchange::new(200, "<html>"), storage)
            .request("/admin/stats", RequestOptions::default(), None)
            .await
            .expect_err("html is not JSON");
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn typed_decode_reports_shape_mismatch(storage: Arc<InMemorySessionStorage>) {
        let err = transport(CannedExchange::new(200, r#"{"unexpected":1}"#), storage)
            .request_json::<Vec<String>>("/departments", RequestOptions::default(), None)
            .await
            .expect_err("object is not a list");
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn exchange_failures_become_transport_errors(storage: Arc<InMemorySessionStorage>) {
        let mut exchange = MockHttpExchange::new();
        exchange
            .expect_send()
            .times(1)
            .returning(|_| Err(HttpExchangeError::transport("connection refused")));
        let err = transport(Arc::new(exchange), storage)
            .request("/admin/stats", RequestOptions::default(), None)
            .await
            .expect_err("transport failure");
        assert_eq!(err, ClientError::transport("connection refused"));
    }

    #[test]
    fn body_preview_truncates_long_bodies() {
        let long = "x".repeat(PREVIEW_CHAR_LIMIT + 10);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
    }
}
