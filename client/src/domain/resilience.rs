//! Live-first fetching with a demo-data safety net.

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

use super::fetch_result::FetchResult;
use super::ports::FallbackMetrics;

/// Run `live`; on any error return `fallback()` instead.
///
/// The result has no error channel: whatever `live` fails with, the caller
/// receives data. The failure is logged at `warn`.
///
/// # Examples
///
/// ```
/// use hospital_client::domain::fetch_with_fallback;
///
/// # async fn demo() {
/// let result = fetch_with_fallback(
///     || async { Err::<Vec<u32>, _>("backend offline") },
///     Vec::new,
/// )
/// .await;
/// assert!(!result.is_real_data);
/// assert!(result.data.is_empty());
/// # }
/// ```
pub async fn fetch_with_fallback<T, E, L, Fut, F>(live: L, fallback: F) -> FetchResult<T>
where
    L: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    F: FnOnce() -> T,
{
    match live().await {
        Ok(data) => FetchResult::live(data),
        Err(error) => {
            warn!(error = %error, "live request failed; serving demo data");
            FetchResult::fallback(fallback())
        }
    }
}

/// [`fetch_with_fallback`] that also reports activations to `metrics`.
///
/// `endpoint` labels both the log event and the metric. Export failures are
/// logged and otherwise ignored.
pub async fn fetch_with_fallback_observed<T, E, L, Fut, F>(
    endpoint: &str,
    live: L,
    fallback: F,
    metrics: &dyn FallbackMetrics,
) -> FetchResult<T>
where
    L: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    F: FnOnce() -> T,
{
    match live().await {
        Ok(data) => FetchResult::live(data),
        Err(error) => {
            warn!(endpoint, error = %error, "live request failed; serving demo data");
            if let Err(export) = metrics.record_fallback(endpoint).await {
                warn!(endpoint, error = %export, "failed to record fallback activation");
            }
            FetchResult::fallback(fallback())
        }
    }
}
