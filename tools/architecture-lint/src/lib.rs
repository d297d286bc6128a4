//! Layer boundary checks for the merch-store backend.
//!
//! The ledger rules live in `domain`; HTTP, Postgres and the identity
//! service are reached through adapters under `inbound` and `outbound`.
//! [`lint_backend_sources`] walks the module tree from `backend/src/lib.rs`
//! and holds every module under those three roots to its [`LayerRules`]:
//!
//! - `domain` reaches neither adapter layer, nor the web, Diesel, OpenAPI or
//!   HTTP client crates;
//! - `inbound` does not reach `outbound`, Diesel or the HTTP client;
//! - `outbound` does not reach `inbound`, the web framework or OpenAPI.
//!
//! Test-only code is out of scope, so adapters may host loopback servers in
//! their unit tests.

mod paths;
mod rules;
mod walk;

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub use rules::{Layer, LayerRules, RULES};
use rules::{Target, classify};

/// A forbidden dependency found in one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Module path, such as `domain::ports::goods_repository`.
    pub module: String,
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.module, self.file.display(), self.message)
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .fold(String::from("architecture boundary violations:"), |mut out, violation| {
            out.push_str("\n- ");
            out.push_str(&violation.to_string());
            out
        })
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, thiserror::Error)]
pub enum ArchitectureLintError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
    #[error("module `{module}` declared in {} has no source file", .declared_in.display())]
    MissingModule { module: String, declared_in: PathBuf },
    #[error("{}", render_violations(.0))]
    Violations(Vec<Violation>),
}

/// One module's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Module path segments; empty for the crate root.
    pub module: Vec<String>,
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

impl LintSource {
    /// Source for the `::`-separated `module`, filed where rustc would look
    /// for a leaf module.
    pub fn in_memory(module: &str, contents: &str) -> Self {
        let module: Vec<String> = module.split("::").map(str::to_owned).collect();
        let file = PathBuf::from(format!("{}.rs", module.join("/")));
        Self {
            module,
            file,
            contents: contents.to_owned(),
        }
    }

    fn layer(&self) -> Option<Layer> {
        self.module.first().and_then(|root| Layer::from_name(root))
    }
}

/// Modules held to layer rules by a passing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub checked: Vec<String>,
}

/// Lint the library whose sources live in `backend_dir/src`.
pub fn lint_backend_sources(backend_dir: &Path) -> Result<LintReport, ArchitectureLintError> {
    let sources = walk::discover(&backend_dir.join("src"))?;
    lint_sources(&sources)
}

/// Lint already loaded sources. Modules outside the layer roots are skipped.
pub fn lint_sources(sources: &[LintSource]) -> Result<LintReport, ArchitectureLintError> {
    let mut report = LintReport::default();
    let mut violations = Vec::new();

    for source in sources {
        let Some(layer) = source.layer() else {
            continue;
        };
        violations.extend(check_source(source, layer)?);
        report.checked.push(source.module.join("::"));
    }

    if violations.is_empty() {
        Ok(report)
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

fn check_source(
    source: &LintSource,
    layer: Layer,
) -> Result<Vec<Violation>, ArchitectureLintError> {
    let parsed = syn::parse_file(&source.contents).map_err(|error| ArchitectureLintError::Parse {
        file: source.file.clone(),
        message: error.to_string(),
    })?;
    let rules = layer.rules();

    let mut messages = BTreeSet::new();
    for segments in &paths::collect_paths(&parsed) {
        match classify(segments, &source.module) {
            Target::Layer(target) if rules.forbidden_layers.contains(&target) => {
                messages.insert(format!("{layer} must not depend on crate::{target}"));
            }
            Target::Crate(name)
                if rules.forbidden_crates.iter().any(|&denied| denied == name) =>
            {
                messages.insert(format!("{layer} must not depend on external crate `{name}`"));
            }
            _ => {}
        }
    }

    let module = source.module.join("::");
    Ok(messages
        .into_iter()
        .map(|message| Violation {
            module: module.clone(),
            file: source.file.clone(),
            message,
        })
        .collect())
}
