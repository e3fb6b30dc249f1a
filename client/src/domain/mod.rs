//! Domain layer: modes, sessions, the transport policy and the resilience
//! primitives shared by every API module.
//!
//! Nothing here depends on a concrete HTTP client, filesystem or metrics
//! exporter; those arrive through [`ports`].

mod auth;
mod dispatch;
mod error;
mod fetch_result;
mod mode;
pub mod ports;
mod resilience;
mod session;
mod transport;

pub use auth::{LoginCredentials, LoginValidationError};
pub use dispatch::{ApiRequest, Dispatcher};
pub use error::ClientError;
pub use fetch_result::FetchResult;
pub use mode::{DataMode, DataModeParseError};
pub use resilience::{fetch_with_fallback, fetch_with_fallback_observed};
pub use session::{
    REFRESH_TOKEN_KEY, ROLE_KEY, SESSION_KEYS, Session, SessionStore, TOKEN_KEY, USER_KEY,
};
pub use transport::{ApiTransport, RequestOptions};
