//! Domain port surface for fallback activation counters.
//!
//! Hybrid mode hides backend failures from the dashboards, so each time demo
//! data replaces a live response the activation is reported here. Adapters
//! decide how to export it.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording fallback metrics.
    pub enum FallbackMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } =>
            "fallback metrics exporter failed: {message}",
    }
}

/// Metrics recording port for fallback activations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FallbackMetrics: Send + Sync {
    /// Record that `endpoint` was served from demo data.
    ///
    /// ```rust
    /// use hospital_client::domain::ports::{FallbackMetrics, NoOpFallbackMetrics};
    ///
    /// # async fn demo() {
    /// let metrics = NoOpFallbackMetrics;
    /// assert!(metrics.record_fallback("admin.get_dashboard_stats").await.is_ok());
    /// # }
    /// ```
    async fn record_fallback(&self, endpoint: &str) -> Result<(), FallbackMetricsError>;
}

/// No-op implementation used when metrics are disabled or in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpFallbackMetrics;

#[async_trait]
impl FallbackMetrics for NoOpFallbackMetrics {
    async fn record_fallback(&self, _endpoint: &str) -> Result<(), FallbackMetricsError> {
        Ok(())
    }
}
