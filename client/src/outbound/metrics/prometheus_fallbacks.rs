//! Prometheus adapter for fallback activation counters.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{FallbackMetrics, FallbackMetricsError};

/// Prometheus-backed recorder for demo-data fallbacks.
pub struct PrometheusFallbackMetrics {
    fallbacks_total: IntCounterVec,
}

impl PrometheusFallbackMetrics {
    /// Create and register `data_fallbacks_total{endpoint}` with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error when Prometheus rejects metric registration.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let fallbacks_total = IntCounterVec::new(
            Opts::new(
                "data_fallbacks_total",
                "Responses served from demo data after a live request failed",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(fallbacks_total.clone()))?;
        Ok(Self { fallbacks_total })
    }
}

#[async_trait]
impl FallbackMetrics for PrometheusFallbackMetrics {
    async fn record_fallback(&self, endpoint: &str) -> Result<(), FallbackMetricsError> {
        self.fallbacks_total
            .get_metric_with_label_values(&[endpoint])
            .map_err(|err| FallbackMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}
