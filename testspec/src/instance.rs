//! Benchmark instance: one repository/version/code-file/test-file case.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A single benchmark case, produced by the dataset loader and consumed
/// once by the compiler.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Instance {
    /// Dataset-wide identifier, e.g. `acme__lib-1337`.
    pub instance_id: String,
    /// Internal id within the dataset split.
    pub id: String,
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Version the repository is pinned to, e.g. `2.0`.
    pub version: String,
    /// Path of the code file under test, relative to the repo root.
    pub code_file: String,
    /// Path of the held-out test file, relative to the repo root.
    pub test_file: String,
    /// Baseline coverage keyed by test name. Carried through unmodified for
    /// downstream comparison; the compiler never reads the values.
    #[serde(default)]
    pub baseline_covs: BTreeMap<String, f64>,
}
