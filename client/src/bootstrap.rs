//! Client construction from configuration.
//!
//! [`connect`] wires the production adapters into an [`ApiClient`]: reqwest
//! for HTTP, a session file when a directory is configured (memory
//! otherwise) and a navigator that publishes login redirects on a watch
//! channel.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

use crate::api::{ApiClient, ClientPorts};
use crate::config::ClientConfig;
use crate::domain::ports::{InMemorySessionStorage, SessionStorage, SessionStorageError};
#[cfg(feature = "metrics")]
use crate::outbound::metrics::PrometheusFallbackMetrics;
use crate::outbound::{FileSessionStorage, NavigatorLoginRedirect, ReqwestExchange};

/// Errors raised while wiring adapters.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
    /// The session directory could not be opened.
    #[error("failed to open session storage: {0}")]
    Session(#[from] SessionStorageError),
    /// Fallback metrics could not be registered.
    #[cfg(feature = "metrics")]
    #[error("fallback metrics registration failed: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// A wired client together with its navigation feed.
pub struct ConnectedClient {
    /// Mode-aware API entry point.
    pub client: ApiClient,
    /// Receives the login path whenever a rejected session redirects.
    pub navigation: watch::Receiver<Option<String>>,
}

/// Build a client from `config` using production adapters.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the HTTP client cannot be built or the
/// session directory cannot be opened.
pub fn connect(config: &ClientConfig) -> Result<ConnectedClient, BootstrapError> {
    let (ports, navigation) = production_ports(config)?;
    Ok(finish(config, ports, navigation))
}

/// Build a client that also counts fallbacks in `registry`.
///
/// # Errors
///
/// As [`connect`], plus [`BootstrapError::Metrics`] when the counter cannot
/// be registered.
#[cfg(feature = "metrics")]
pub fn connect_with_registry(
    config: &ClientConfig,
    registry: &prometheus::Registry,
) -> Result<ConnectedClient, BootstrapError> {
    let (ports, navigation) = production_ports(config)?;
    let metrics = PrometheusFallbackMetrics::new(registry)?;
    Ok(finish(config, ports.with_metrics(Arc::new(metrics)), navigation))
}

fn production_ports(
    config: &ClientConfig,
) -> Result<(ClientPorts, watch::Receiver<Option<String>>), BootstrapError> {
    let exchange = ReqwestExchange::new(config.base_url.clone(), config.timeout)?;
    let storage: Arc<dyn SessionStorage> = match &config.session_dir {
        Some(dir) => Arc::new(FileSessionStorage::open(dir)?),
        None => Arc::new(InMemorySessionStorage::new()),
    };
    let redirect = NavigatorLoginRedirect::new(config.login_path.clone());
    let navigation = redirect.subscribe();
    let ports = ClientPorts::new(Arc::new(exchange))
        .with_storage(storage)
        .with_redirect(Arc::new(redirect));
    Ok((ports, navigation))
}

fn finish(
    config: &ClientConfig,
    ports: ClientPorts,
    navigation: watch::Receiver<Option<String>>,
) -> ConnectedClient {
    let client = ApiClient::new(config, ports);
    info!(
        mode = %config.mode,
        base_url = %config.base_url,
        persistent_session = config.session_dir.is_some(),
        "hospital client ready"
    );
    ConnectedClient { client, navigation }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    use super::*;
    use crate::domain::DataMode;

    #[tokio::test]
    async fn fake_client_connects_without_a_backend() {
        let config = ClientConfig::default().with_mode(DataMode::Fake);
        let connected = connect(&config).expect("connect");

        assert_eq!(connected.client.mode(), DataMode::Fake);
        assert!(connected.navigation.borrow().is_none());
        let stats = connected
            .client
            .admin()
            .get_dashboard_stats()
            .await
            .expect("demo stats");
        assert!(!stats.is_real_data);
    }

    #[test]
    fn session_directory_backs_the_store() {
        let temp = TempDir::new().expect("tempdir");
        let dir = Utf8PathBuf::from_path_buf(temp.path().join("session")).expect("utf8 path");
        let config = ClientConfig {
            session_dir: Some(dir.clone()),
            ..ClientConfig::default()
        };

        let connected = connect(&config).expect("connect");
        connected
            .client
            .session()
            .set_tokens("access", "refresh")
            .expect("persist");

        assert!(dir.join(crate::outbound::SESSION_FILE_NAME).exists());
    }
}
