//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod fallback_metrics;
mod http_exchange;
mod login_redirect;
mod session_storage;

#[cfg(test)]
pub use fallback_metrics::MockFallbackMetrics;
pub use fallback_metrics::{FallbackMetrics, FallbackMetricsError, NoOpFallbackMetrics};
#[cfg(test)]
pub use http_exchange::MockHttpExchange;
pub use http_exchange::{
    HttpExchange, HttpExchangeError, HttpMethod, HttpRequest, HttpResponse, OfflineHttpExchange,
};
#[cfg(test)]
pub use login_redirect::MockLoginRedirect;
pub use login_redirect::{LoginRedirect, NoOpLoginRedirect};
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{InMemorySessionStorage, SessionStorage, SessionStorageError};
