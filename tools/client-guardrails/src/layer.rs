//! Layers of the client crate and the dependencies each may take.

use std::fmt;

use camino::Utf8Path;

/// Crates that only outbound adapters and composition code may use.
const ADAPTER_CRATES: [&str; 4] = ["cap_std", "camino", "prometheus", "reqwest"];

/// Crates that only entry points may use.
const ENTRY_POINT_CRATES: [&str; 2] = ["clap", "tracing_subscriber"];

/// Architectural layer a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Mode policy, session store, transport and ports.
    Domain,
    /// Role-grouped operations built on the dispatcher.
    Api,
    /// Environment-driven client configuration.
    Config,
    /// Data hooks consumed by presentation code.
    Inbound,
    /// reqwest, filesystem and metrics adapters.
    Outbound,
    /// Crate root, bootstrap wiring and binaries. Unchecked.
    Composition,
}

impl Layer {
    /// Layer owning the top-level module `root`.
    #[must_use]
    pub fn of_module(root: &str) -> Self {
        match root {
            "domain" => Self::Domain,
            "api" => Self::Api,
            "config" => Self::Config,
            "inbound" => Self::Inbound,
            "outbound" => Self::Outbound,
            _ => Self::Composition,
        }
    }

    /// Whether modules of this layer are checked at all.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        !matches!(self, Self::Composition)
    }

    /// Whether code in this layer may name items of `target`.
    #[must_use]
    pub const fn may_depend_on(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Composition, _)
                | (Self::Domain, Self::Domain)
                | (Self::Api, Self::Api | Self::Domain | Self::Config)
                | (Self::Config, Self::Config | Self::Domain)
                | (Self::Inbound, Self::Inbound | Self::Api | Self::Domain)
                | (Self::Outbound, Self::Outbound | Self::Domain)
        )
    }

    /// Whether this layer must not use the external crate `name`.
    #[must_use]
    pub fn forbids_crate(self, name: &str) -> bool {
        let adapter = ADAPTER_CRATES.contains(&name);
        let entry_point = ENTRY_POINT_CRATES.contains(&name);
        match self {
            Self::Composition => false,
            Self::Outbound => entry_point,
            Self::Config => entry_point || (adapter && name != "camino"),
            Self::Domain => adapter || entry_point || name == "tokio",
            Self::Api | Self::Inbound => adapter || entry_point,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Api => "api",
            Self::Config => "config",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Composition => "composition",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute module path of a source file, without the crate name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    /// Module defined by `file`, a path relative to `src/`.
    #[must_use]
    pub fn of_file(file: &Utf8Path) -> Self {
        let mut segments: Vec<String> = file
            .with_extension("")
            .components()
            .map(|component| component.as_str().to_owned())
            .collect();
        if matches!(
            segments.last().map(String::as_str),
            Some("mod" | "lib" | "main")
        ) {
            segments.pop();
        }
        Self(segments)
    }

    /// Child module `name` of this module.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        Self(segments)
    }

    /// Whether this module is `ancestor` or nested inside it.
    #[must_use]
    pub fn is_within(&self, ancestor: &Self) -> bool {
        self.0.starts_with(&ancestor.0)
    }

    /// Layer the module belongs to.
    #[must_use]
    pub fn layer(&self) -> Layer {
        self.0
            .first()
            .map_or(Layer::Composition, |root| Layer::of_module(root))
    }

    /// Resolve `path`, as written inside this module, against the crate root.
    ///
    /// Returns `None` for paths that start with an external crate, a prelude
    /// item or a local name, and for `super` chains that climb past the root.
    #[must_use]
    pub fn resolve(&self, path: &[String], crate_name: &str) -> Option<Vec<String>> {
        let (first, rest) = path.split_first()?;
        match first.as_str() {
            "crate" => Some(rest.to_vec()),
            name if name == crate_name => Some(rest.to_vec()),
            "self" | "super" => {
                let mut base = self.0.clone();
                let mut remaining = path;
                while let Some((head, tail)) = remaining.split_first() {
                    match head.as_str() {
                        "self" => {}
                        "super" => {
                            base.pop()?;
                        }
                        _ => break,
                    }
                    remaining = tail;
                }
                base.extend(remaining.iter().cloned());
                Some(base)
            }
            _ => None,
        }
    }
}
