//! Mode-switchable data access for the hospital dashboards.
//!
//! Every dashboard reads through one [`ApiClient`]. Its [`DataMode`] decides
//! whether an operation answers from deterministic demo data (`fake`), from
//! the REST backend (`real`), or from the backend with demo data as a silent
//! safety net (`hybrid`). Results carry an `is_real_data` flag either way so
//! presentation code can mark demo content.
//!
//! - [`domain`] holds the mode policy, session store and transport.
//! - [`api`] groups the operations by dashboard role.
//! - [`inbound::hooks`] binds operations to observable loading state.
//! - [`outbound`] provides reqwest, filesystem and metrics adapters.
//! - [`bootstrap::connect`] wires them from a [`ClientConfig`].

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use api::{ApiClient, ClientPorts};
pub use config::{ClientConfig, ConfigError};
pub use domain::{ClientError, DataMode, FetchResult};
