//! Client configuration parsing and validation.
//!
//! Settings are read once from the environment into an explicit
//! [`ClientConfig`] value that is handed to the client factory. Nothing reads
//! the environment afterwards, so differently configured clients can coexist.

use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::{Local, NaiveDate};
use demo_data::{DEFAULT_SEED, DemoData};
use mockable::Env;
use url::Url;

use crate::domain::DataMode;

const DATA_MODE_ENV: &str = "DATA_MODE";
const BASE_URL_ENV: &str = "API_BASE_URL";
const TIMEOUT_ENV: &str = "API_TIMEOUT_SECS";
const LOGIN_PATH_ENV: &str = "LOGIN_PATH";
const SESSION_DIR_ENV: &str = "SESSION_DIR";
const SEED_ENV: &str = "DEMO_DATA_SEED";
const REFERENCE_DATE_ENV: &str = "DEMO_REFERENCE_DATE";

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_LOGIN_PATH: &str = "/login";
const MODE_EXPECTED: &str = "fake|real|hybrid";
const SECONDS_EXPECTED: &str = "a positive whole number of seconds";
const SEED_EXPECTED: &str = "an unsigned 64-bit integer";
const DATE_EXPECTED: &str = "a date formatted YYYY-MM-DD";

/// Errors raised while reading client configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Accepted form.
        expected: &'static str,
    },
    /// The API base URL does not parse.
    #[error("invalid API base url '{value}': {message}")]
    InvalidUrl {
        /// Rejected value.
        value: String,
        /// Parser message.
        message: String,
    },
}

/// Immutable settings for one client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Data-source mode.
    pub mode: DataMode,
    /// Base URL that request paths are appended to.
    pub base_url: Url,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Login entry point the user is sent to after a 401.
    pub login_path: String,
    /// Directory for the persistent session file; memory when `None`.
    pub session_dir: Option<Utf8PathBuf>,
    /// Seed for demo data.
    pub demo_seed: u64,
    /// Date demo data treats as today; the local date when `None`.
    pub demo_reference_date: Option<NaiveDate>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mode: DataMode::default(),
            base_url: default_base_url(),
            timeout: None,
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            session_dir: None,
            demo_seed: DEFAULT_SEED,
            demo_reference_date: None,
        }
    }
}

impl ClientConfig {
    /// Read configuration from environment variables.
    ///
    /// | Variable | Default |
    /// | --- | --- |
    /// | `DATA_MODE` | `real` |
    /// | `API_BASE_URL` | `http://localhost:5000/api` |
    /// | `API_TIMEOUT_SECS` | none |
    /// | `LOGIN_PATH` | `/login` |
    /// | `SESSION_DIR` | none (in-memory session) |
    /// | `DEMO_DATA_SEED` | `2024` |
    /// | `DEMO_REFERENCE_DATE` | local date |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is present but invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hospital_client::config::ClientConfig;
    /// use hospital_client::domain::DataMode;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DATA_MODE" => Some("hybrid".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = ClientConfig::from_env(&env).unwrap();
    /// assert_eq!(config.mode, DataMode::Hybrid);
    /// assert_eq!(config.base_url.as_str(), "http://localhost:5000/api");
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        Ok(Self {
            mode: mode_from_env(env)?,
            base_url: base_url_from_env(env)?,
            timeout: timeout_from_env(env)?,
            login_path: non_blank(env, LOGIN_PATH_ENV)
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned()),
            session_dir: non_blank(env, SESSION_DIR_ENV).map(Utf8PathBuf::from),
            demo_seed: seed_from_env(env)?,
            demo_reference_date: reference_date_from_env(env)?,
        })
    }

    /// Copy of this configuration with another mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = mode;
        self
    }

    /// Demo-data generator pinned to the configured seed and date.
    #[must_use]
    pub fn demo_data(&self) -> DemoData {
        let reference_date = self
            .demo_reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        DemoData::new(self.demo_seed, reference_date)
    }
}

#[expect(clippy::expect_used, reason = "the default base url literal is valid")]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default API base url must parse")
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn mode_from_env<E: Env>(env: &E) -> Result<DataMode, ConfigError> {
    match non_blank(env, DATA_MODE_ENV) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: DATA_MODE_ENV,
            value,
            expected: MODE_EXPECTED,
        }),
        None => Ok(DataMode::default()),
    }
}

fn base_url_from_env<E: Env>(env: &E) -> Result<Url, ConfigError> {
    let Some(value) = non_blank(env, BASE_URL_ENV) else {
        return Ok(default_base_url());
    };
    match Url::parse(&value) {
        Ok(url) if url.cannot_be_a_base() => Err(ConfigError::InvalidUrl {
            value,
            message: "url cannot carry a path".to_owned(),
        }),
        Ok(url) => Ok(url),
        Err(err) => Err(ConfigError::InvalidUrl {
            value,
            message: err.to_string(),
        }),
    }
}

fn timeout_from_env<E: Env>(env: &E) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = non_blank(env, TIMEOUT_ENV) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds))),
        _ => Err(ConfigError::InvalidEnv {
            name: TIMEOUT_ENV,
            value,
            expected: SECONDS_EXPECTED,
        }),
    }
}

fn seed_from_env<E: Env>(env: &E) -> Result<u64, ConfigError> {
    match non_blank(env, SEED_ENV) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnv {
            name: SEED_ENV,
            value,
            expected: SEED_EXPECTED,
        }),
        None => Ok(DEFAULT_SEED),
    }
}

fn reference_date_from_env<E: Env>(env: &E) -> Result<Option<NaiveDate>, ConfigError> {
    non_blank(env, REFERENCE_DATE_ENV)
        .map(|value| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| ConfigError::InvalidEnv {
                name: REFERENCE_DATE_ENV,
                value,
                expected: DATE_EXPECTED,
            })
        })
        .transpose()
}
