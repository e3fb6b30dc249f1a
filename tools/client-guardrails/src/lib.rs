//! Repo-local guardrails for the hospital client's layering and mode policy.
//!
//! The client keeps its mode policy, session store and transport in
//! `domain`, groups operations by role in `api`, exposes data hooks from
//! `inbound` and plugs adapters in from `outbound`. The checks here keep it
//! that way:
//!
//! - each layer names only the layers below it: hooks reach `api` and
//!   `domain`, `api` reaches `domain` and `config`, adapters reach `domain`
//! - HTTP, filesystem and metrics crates stay in `outbound`, and CLI and
//!   subscriber crates stay in binaries and bootstrap wiring
//! - `api` operations never branch on the data mode and never call the
//!   transport directly; every call goes through the dispatcher
//!
//! `#[cfg(test)]` items and test-only modules are exempt. Run the checks with
//! `cargo run -p client-guardrails`.

mod finding;
mod layer;
mod mode_policy;
mod references;
mod source_tree;

use std::collections::{BTreeSet, HashSet};

use camino::{Utf8Path, Utf8PathBuf};

pub use finding::{Finding, GuardrailError, Rule};
pub use layer::Layer;
use layer::ModulePath;

/// Name the client uses for itself in absolute paths.
const CLIENT_CRATE: &str = "hospital_client";

/// A Rust source file of the client crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to `client/src`.
    pub path: Utf8PathBuf,
    /// Rust source text.
    pub contents: String,
}

impl SourceFile {
    /// Source at `path` with `contents`.
    pub fn new(path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Check the client crate rooted at `client_dir`.
///
/// # Errors
///
/// Returns [`GuardrailError`] when the sources cannot be read or parsed, or
/// break a rule.
pub fn check_client(client_dir: &Utf8Path) -> Result<(), GuardrailError> {
    let sources = source_tree::read(&client_dir.join("src"))?;
    check_sources(&sources)
}

/// Check in-memory sources laid out as under `client/src`.
///
/// # Errors
///
/// Returns [`GuardrailError::Parse`] for invalid Rust and
/// [`GuardrailError::Findings`] when any rule is broken.
pub fn check_sources(sources: &[SourceFile]) -> Result<(), GuardrailError> {
    let parsed = sources
        .iter()
        .map(|source| {
            syn::parse_file(&source.contents)
                .map(|file| (source, ModulePath::of_file(&source.path), file))
                .map_err(|err| GuardrailError::Parse {
                    file: source.path.clone(),
                    message: err.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let test_only: HashSet<ModulePath> = parsed
        .iter()
        .flat_map(|(_, module, file)| {
            references::test_only_children(file)
                .into_iter()
                .map(move |name| module.child(&name))
        })
        .collect();

    let mut findings = BTreeSet::new();
    for (source, module, file) in &parsed {
        let layer = module.layer();
        if !layer.is_checked() || test_only.iter().any(|gated| module.is_within(gated)) {
            continue;
        }
        findings.extend(check_file(&source.path, module, layer, file));
    }

    if findings.is_empty() {
        Ok(())
    } else {
        Err(GuardrailError::Findings(findings.into_iter().collect()))
    }
}

fn check_file(
    path: &Utf8Path,
    module: &ModulePath,
    layer: Layer,
    file: &syn::File,
) -> Vec<Finding> {
    let finding = |rule, detail| Finding {
        file: path.to_path_buf(),
        rule,
        detail,
    };
    let mut found = Vec::new();

    for segments in references::collect(file) {
        match module.resolve(&segments, CLIENT_CRATE) {
            Some(resolved) => {
                let Some(root) = resolved.first() else {
                    continue;
                };
                let target = Layer::of_module(root);
                if !layer.may_depend_on(target) {
                    found.push(finding(
                        Rule::LayerDependency,
                        format!("{layer} module depends on `crate::{root}` ({target} layer)"),
                    ));
                }
            }
            None => {
                let Some(name) = segments.first() else {
                    continue;
                };
                if layer.forbids_crate(name) {
                    found.push(finding(
                        Rule::InfrastructureCrate,
                        format!("{layer} module uses the `{name}` crate"),
                    ));
                }
            }
        }
    }

    if layer == Layer::Api {
        found.extend(
            mode_policy::check(file)
                .into_iter()
                .map(|(rule, detail)| finding(rule, detail)),
        );
    }
    found
}
