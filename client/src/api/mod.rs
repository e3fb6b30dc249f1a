//! Domain API modules grouped by dashboard role.
//!
//! [`ApiClient::new`] resolves the configured mode into a [`Dispatcher`]
//! once. Each operation then describes its request and pairs it with a
//! demo-data generator; the dispatcher decides which of the two answers.
//!
//! ```
//! use std::sync::Arc;
//!
//! use hospital_client::api::{ApiClient, ClientPorts};
//! use hospital_client::config::ClientConfig;
//! use hospital_client::domain::DataMode;
//! use hospital_client::domain::ports::OfflineHttpExchange;
//!
//! # async fn demo() {
//! let config = ClientConfig::default().with_mode(DataMode::Fake);
//! let client = ApiClient::new(&config, ClientPorts::new(Arc::new(OfflineHttpExchange)));
//!
//! let appointments = client.doctor().get_my_appointments("doc1").await.unwrap();
//! assert_eq!(appointments.data.len(), 5);
//! assert!(!appointments.is_real_data);
//! # }
//! ```

mod admin;
mod common;
mod doctor;
mod patient;


use std::sync::Arc;

use demo_data::DemoData;
use demo_data::records::Acknowledgement;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use admin::AdminApi;
pub use common::CommonApi;
pub use doctor::DoctorApi;
pub use patient::PatientApi;

use crate::config::ClientConfig;
use crate::domain::ports::{
    FallbackMetrics, HttpExchange, HttpMethod, InMemorySessionStorage, LoginRedirect,
    NoOpFallbackMetrics, NoOpLoginRedirect, SessionStorage,
};
use crate::domain::{
    ApiRequest, ApiTransport, ClientError, DataMode, Dispatcher, FetchResult, RequestOptions,
    SessionStore,
};

/// Adapters a client is built from.
#[derive(Clone)]
pub struct ClientPorts {
    /// Raw HTTP exchange.
    pub exchange: Arc<dyn HttpExchange>,
    /// Session persistence.
    pub storage: Arc<dyn SessionStorage>,
    /// Navigation after a rejected session.
    pub redirect: Arc<dyn LoginRedirect>,
    /// Sink for fallback activations.
    pub metrics: Arc<dyn FallbackMetrics>,
}

impl ClientPorts {
    /// Ports around `exchange` with in-memory session storage and no-op
    /// redirect and metrics.
    pub fn new(exchange: Arc<dyn HttpExchange>) -> Self {
        Self {
            exchange,
            storage: Arc::new(InMemorySessionStorage::new()),
            redirect: Arc::new(NoOpLoginRedirect),
            metrics: Arc::new(NoOpFallbackMetrics),
        }
    }

    /// Replace the session storage.
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.storage = storage;
        self
    }

    /// Replace the login redirect.
    #[must_use]
    pub fn with_redirect(mut self, redirect: Arc<dyn LoginRedirect>) -> Self {
        self.redirect = redirect;
        self
    }

    /// Replace the fallback metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn FallbackMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

struct ClientCore {
    dispatcher: Dispatcher,
    transport: ApiTransport,
    session: SessionStore,
    demo: DemoData,
}

impl ClientCore {
    async fn dispatch<T, F>(
        &self,
        request: ApiRequest,
        fallback: F,
    ) -> Result<FetchResult<T>, ClientError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.dispatcher.dispatch(request, fallback).await
    }

    /// Dispatch a mutation whose live response may have an empty body.
    async fn acknowledge(
        &self,
        request: ApiRequest,
        message: &str,
    ) -> Result<FetchResult<Acknowledgement>, ClientError> {
        let demo = self.demo;
        let result = self
            .dispatch(request, || Some(demo.acknowledgement(message)))
            .await?;
        Ok(result.map(|ack| ack.unwrap_or_else(|| demo.acknowledgement(message))))
    }
}

/// Mode-aware entry point to the hospital API.
///
/// Cheap to clone; clones share the transport and session store.
#[derive(Clone)]
pub struct ApiClient {
    core: Arc<ClientCore>,
}

impl ApiClient {
    /// Build a client for `config` on top of `ports`.
    pub fn new(config: &ClientConfig, ports: ClientPorts) -> Self {
        let session = SessionStore::new(ports.storage);
        let transport = ApiTransport::new(ports.exchange, session.clone(), ports.redirect);
        let dispatcher = Dispatcher::for_mode(config.mode, transport.clone(), ports.metrics);
        Self {
            core: Arc::new(ClientCore {
                dispatcher,
                transport,
                session,
                demo: config.demo_data(),
            }),
        }
    }

    /// Configured mode.
    pub fn mode(&self) -> DataMode {
        self.core.dispatcher.mode()
    }

    /// Persisted session.
    pub fn session(&self) -> &SessionStore {
        &self.core.session
    }

    /// Underlying transport, for calls outside the domain modules.
    pub fn transport(&self) -> &ApiTransport {
        &self.core.transport
    }

    /// Generator backing demo data.
    pub fn demo_data(&self) -> DemoData {
        self.core.demo
    }

    /// Admin dashboard operations.
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(Arc::clone(&self.core))
    }

    /// Doctor dashboard operations.
    pub fn doctor(&self) -> DoctorApi {
        DoctorApi::new(Arc::clone(&self.core))
    }

    /// Patient dashboard operations.
    pub fn patient(&self) -> PatientApi {
        PatientApi::new(Arc::clone(&self.core))
    }

    /// Operations shared by every role.
    pub fn common(&self) -> CommonApi {
        CommonApi::new(Arc::clone(&self.core))
    }
}

fn get(endpoint: &'static str, path: impl Into<String>) -> ApiRequest {
    ApiRequest::new(endpoint, path, RequestOptions::new(HttpMethod::Get))
}

fn without_body(
    endpoint: &'static str,
    method: HttpMethod,
    path: impl Into<String>,
) -> ApiRequest {
    ApiRequest::new(endpoint, path, RequestOptions::new(method))
}

fn with_body<B: Serialize + ?Sized>(
    endpoint: &'static str,
    method: HttpMethod,
    path: impl Into<String>,
    body: &B,
) -> Result<ApiRequest, ClientError> {
    let body: Value = serde_json::to_value(body)
        .map_err(|err| ClientError::encode(format!("{endpoint}: {err}")))?;
    Ok(ApiRequest::new(
        endpoint,
        path,
        RequestOptions::new(method).with_body(body),
    ))
}
