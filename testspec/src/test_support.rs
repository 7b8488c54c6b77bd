//! Shared fixtures for compiler tests.

use std::collections::BTreeMap;

use crate::config::{RepoVersionSpec, SpecsTable};
use crate::instance::Instance;

/// Instance fixture matching the `acme/lib 2.0` entry of [`sample_table`].
pub fn sample_instance() -> Instance {
    Instance {
        instance_id: "acme__lib-1337".to_string(),
        id: "1337".to_string(),
        repo: "acme/lib".to_string(),
        version: "2.0".to_string(),
        code_file: "src/core.py".to_string(),
        test_file: "tests/test_core.py".to_string(),
        baseline_covs: BTreeMap::from([("tests/test_core.py".to_string(), 81.5)]),
    }
}

/// Spec with both optional fields populated and a plain pytest runner.
pub fn sample_spec() -> RepoVersionSpec {
    RepoVersionSpec {
        repo: "acme/lib".to_string(),
        version: "2.0".to_string(),
        test_cmd: "pytest".to_string(),
        eval_commands: Some(vec!["export X=1".to_string()]),
        install: Some("pip install -e .".to_string()),
        arch: "x86_64".to_string(),
    }
}

/// Single-entry table for [`sample_instance`].
pub fn sample_table() -> SpecsTable {
    SpecsTable::from_specs(vec![sample_spec()]).expect("sample table is valid")
}

/// Same entry with a tox-driven runner template.
pub fn tox_table() -> SpecsTable {
    let mut spec = sample_spec();
    spec.test_cmd = "tox -e py311 --".to_string();
    SpecsTable::from_specs(vec![spec]).expect("tox table is valid")
}
