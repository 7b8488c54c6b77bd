//! Typed errors raised while loading the specs table or compiling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors the compiler can raise at compile time.
///
/// Everything else (failing installs, failing tests, mutation timeouts) is
/// deferred to the sandbox runtime and surfaces only as exit statuses inside
/// the compiled script, never as a value of this type.
#[derive(Debug, Error)]
pub enum SpecError {
    /// `(repo, version)` has no entry in the specs table. Hard error, no
    /// fallback; no partial specification is returned.
    #[error("no test specification configured for {repo} {version}")]
    ConfigurationNotFound { repo: String, version: String },

    #[error("read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {}", .path.display(), .source)]
    ParseTable {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid specs table: {0}")]
    InvalidTable(String),
}
