//! Data paired with its provenance.

use serde::{Deserialize, Serialize};

/// Payload returned by every data operation.
///
/// `is_real_data` is `true` only when `data` came from a successful backend
/// response. Dashboards use it to show a "demo data" notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult<T> {
    /// Live or generated payload.
    pub data: T,
    /// Whether `data` came from the backend.
    pub is_real_data: bool,
}

impl<T> FetchResult<T> {
    /// Wrap a backend payload.
    pub const fn live(data: T) -> Self {
        Self {
            data,
            is_real_data: true,
        }
    }

    /// Wrap generated demo data.
    pub const fn fallback(data: T) -> Self {
        Self {
            data,
            is_real_data: false,
        }
    }

    /// Transform the payload while keeping its provenance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        FetchResult {
            data: f(self.data),
            is_real_data: self.is_real_data,
        }
    }

    /// Drop the provenance flag.
    pub fn into_data(self) -> T {
        self.data
    }
}
