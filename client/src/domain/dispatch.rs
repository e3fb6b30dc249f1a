//! Mode policy applied to every domain API call.
//!
//! The mode is resolved once, when the client is built, into one of three
//! strategies. API functions describe a request and its demo-data generator
//! and never branch on the mode themselves.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ClientError;
use super::fetch_result::FetchResult;
use super::mode::DataMode;
use super::ports::FallbackMetrics;
use super::resilience::fetch_with_fallback_observed;
use super::transport::{ApiTransport, RequestOptions};

/// A described backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Stable operation label used in logs and metrics, e.g.
    /// `admin.get_dashboard_stats`.
    pub endpoint: &'static str,
    /// Path relative to the API base URL.
    pub path: String,
    /// Method, headers and body.
    pub options: RequestOptions,
}

impl ApiRequest {
    /// Describe a call to `path` labelled `endpoint`.
    pub fn new(endpoint: &'static str, path: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            endpoint,
            path: path.into(),
            options,
        }
    }
}

/// Strategy chosen from the configured [`DataMode`].
#[derive(Clone)]
pub enum Dispatcher {
    /// Serve demo data without touching the transport.
    Fake,
    /// Issue one request and propagate its failure.
    Real {
        /// Transport used for the request.
        transport: ApiTransport,
    },
    /// Issue one request and fall back to demo data on failure.
    Hybrid {
        /// Transport used for the request.
        transport: ApiTransport,
        /// Sink for fallback activations.
        metrics: Arc<dyn FallbackMetrics>,
    },
}

impl Dispatcher {
    /// Select the strategy for `mode`.
    pub fn for_mode(
        mode: DataMode,
        transport: ApiTransport,
        metrics: Arc<dyn FallbackMetrics>,
    ) -> Self {
        match mode {
            DataMode::Fake => Self::Fake,
            DataMode::Real => Self::Real { transport },
            DataMode::Hybrid => Self::Hybrid { transport, metrics },
        }
    }

    /// Mode this strategy implements.
    #[must_use]
    pub const fn mode(&self) -> DataMode {
        match self {
            Self::Fake => DataMode::Fake,
            Self::Real { .. } => DataMode::Real,
            Self::Hybrid { .. } => DataMode::Hybrid,
        }
    }

    /// Transport used by live strategies; `None` in fake mode.
    pub fn transport(&self) -> Option<&ApiTransport> {
        match self {
            Self::Fake => None,
            Self::Real { transport } | Self::Hybrid { transport, .. } => Some(transport),
        }
    }

    /// Apply the mode policy to `request`.
    ///
    /// `fallback` runs only when demo data is served.
    ///
    /// # Errors
    ///
    /// Only the real strategy fails, with the transport's error unchanged.
    pub async fn dispatch<T, F>(
        &self,
        request: ApiRequest,
        fallback: F,
    ) -> Result<FetchResult<T>, ClientError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let ApiRequest {
            endpoint,
            path,
            options,
        } = request;
        match self {
            Self::Fake => {
                debug!(endpoint, mode = "fake", "serving demo data");
                Ok(FetchResult::fallback(fallback()))
            }
            Self::Real { transport } => {
                debug!(endpoint, mode = "real", "dispatching request");
                transport
                    .request_json(&path, options, None)
                    .await
                    .map(FetchResult::live)
            }
            Self::Hybrid { transport, metrics } => {
                debug!(endpoint, mode = "hybrid", "dispatching request");
                Ok(fetch_with_fallback_observed(
                    endpoint,
                    || transport.request_json(&path, options, None),
                    fallback,
                    metrics.as_ref(),
                )
                .await)
            }
        }
    }
}
