//! Outbound adapters implementing the domain ports.

mod atomic_io;
mod file_session_storage;
mod login_redirect;
#[cfg(feature = "metrics")]
pub mod metrics;
mod reqwest_exchange;

pub use file_session_storage::{FileSessionStorage, SESSION_FILE_NAME};
pub use login_redirect::NavigatorLoginRedirect;
pub use reqwest_exchange::ReqwestExchange;
