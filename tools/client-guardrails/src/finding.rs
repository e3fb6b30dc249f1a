//! Findings and failures reported by the guardrails.

use std::fmt;
use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Rule broken by a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// A module names a layer it may not depend on.
    LayerDependency,
    /// A module uses a crate reserved for adapters or entry points.
    InfrastructureCrate,
    /// An API operation inspects the data mode itself.
    ModeBranch,
    /// An API operation drives the transport instead of the dispatcher.
    DirectTransport,
}

impl Rule {
    /// Short identifier printed with each finding.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LayerDependency => "layer-dependency",
            Self::InfrastructureCrate => "infrastructure-crate",
            Self::ModeBranch => "mode-branch",
            Self::DirectTransport => "direct-transport",
        }
    }
}

/// One broken rule in one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finding {
    /// File path relative to `client/src`.
    pub file: Utf8PathBuf,
    /// Rule that was broken.
    pub rule: Rule,
    /// What the file does that breaks it.
    pub detail: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.file, self.rule.code(), self.detail)
    }
}

/// Reasons a guardrail run does not pass.
#[derive(Debug, Error)]
pub enum GuardrailError {
    /// The source tree could not be read.
    #[error("failed to read client sources under {path}: {source}")]
    Io {
        /// Directory being read.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A source file is not valid Rust.
    #[error("failed to parse {file}: {message}")]
    Parse {
        /// Offending file.
        file: Utf8PathBuf,
        /// Parser diagnostic.
        message: String,
    },
    /// The sources break one or more rules.
    #[error("{} guardrail finding(s):\n{}", .0.len(), render(.0))]
    Findings(Vec<Finding>),
}

impl GuardrailError {
    /// Findings carried by this error, empty for read and parse failures.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::Findings(findings) => findings,
            Self::Io { .. } | Self::Parse { .. } => &[],
        }
    }
}

fn render(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|finding| format!("  {finding}"))
        .collect::<Vec<_>>()
        .join("\n")
}
