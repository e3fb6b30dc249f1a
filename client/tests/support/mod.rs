//! Scripted adapters shared by the client integration tests.
//!
//! Integration tests compile as separate crates, so the doubles live here
//! rather than behind the library's `cfg(test)` mocks.

#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use hospital_client::domain::ports::{
    FallbackMetrics, FallbackMetricsError, HttpExchange, HttpExchangeError, HttpRequest,
    HttpResponse, LoginRedirect,
};

/// Exchange replaying queued outcomes in order.
///
/// Once the script runs out every request fails as a refused connection.
#[derive(Default)]
pub struct ScriptedExchange {
    script: Mutex<VecDeque<Result<HttpResponse, HttpExchangeError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedExchange {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response with `status` and `body`.
    pub fn respond(&self, status: u16, body: &str) {
        self.lock_script()
            .push_back(Ok(HttpResponse::new(status, body.as_bytes().to_vec())));
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: &str) {
        self.lock_script()
            .push_back(Err(HttpExchangeError::transport(message)));
    }

    /// Number of requests sent so far.
    pub fn calls(&self) -> usize {
        self.lock_requests().len()
    }

    /// Requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.lock_requests().clone()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<HttpResponse, HttpExchangeError>>> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<HttpRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpExchange for ScriptedExchange {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpExchangeError> {
        self.lock_requests().push(request);
        self.lock_script()
            .pop_front()
            .unwrap_or_else(|| Err(HttpExchangeError::transport("connection refused")))
    }
}

/// Redirect counting how often login was requested.
#[derive(Default)]
pub struct RecordingRedirect {
    redirects: Mutex<usize>,
}

impl RecordingRedirect {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        *self.redirects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect_to_login(&self) {
        *self.redirects.lock().unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

/// Metrics sink remembering every fallback endpoint.
#[derive(Default)]
pub struct RecordingMetrics {
    endpoints: Mutex<Vec<String>>,
}

impl RecordingMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.endpoints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl FallbackMetrics for RecordingMetrics {
    async fn record_fallback(&self, endpoint: &str) -> Result<(), FallbackMetricsError> {
        self.endpoints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(endpoint.to_owned());
        Ok(())
    }
}
