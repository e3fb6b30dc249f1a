//! Data-source mode selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where dashboard data comes from.
///
/// # Examples
///
/// ```
/// use hospital_client::domain::DataMode;
///
/// let mode: DataMode = "Hybrid".parse().unwrap();
/// assert!(mode.is_hybrid());
/// assert_eq!(DataMode::default(), DataMode::Real);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Demo data only; no network I/O.
    Fake,
    /// Live API only; failures reach the caller.
    #[default]
    Real,
    /// Live API first, demo data on any failure.
    Hybrid,
}

impl DataMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 3] = [Self::Fake, Self::Real, Self::Hybrid];

    /// Whether the mode never touches the network.
    #[must_use]
    pub const fn is_fake(self) -> bool {
        matches!(self, Self::Fake)
    }

    /// Whether failures propagate to callers.
    #[must_use]
    pub const fn is_real(self) -> bool {
        matches!(self, Self::Real)
    }

    /// Whether failures are replaced by demo data.
    #[must_use]
    pub const fn is_hybrid(self) -> bool {
        matches!(self, Self::Hybrid)
    }

    /// Lowercase configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fake => "fake",
            Self::Real => "real",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for DataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown data mode '{value}'; expected fake|real|hybrid")]
pub struct DataModeParseError {
    value: String,
}

impl DataModeParseError {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for DataMode {
    type Err = DataModeParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DataModeParseError {
                value: trimmed.to_owned(),
            })
    }
}
