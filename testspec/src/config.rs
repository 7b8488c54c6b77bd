//! Per-repo-version test specifications, loaded from a TOML table.
//!
//! The table is a human-edited `[[specs]]` array and is validated eagerly
//! at load time. A lookup miss at compile time is a hard configuration
//! error with no fallback.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SpecError;

fn default_arch() -> String {
    "x86_64".to_string()
}

/// Test specification for one `(repository, version)` pair.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RepoVersionSpec {
    /// Repository in `owner/name` form.
    pub repo: String,
    /// Version string the spec applies to.
    pub version: String,
    /// Test-runner invocation template; test directives are appended to it.
    pub test_cmd: String,
    /// Extra environment-setup commands, emitted in declared order.
    #[serde(default)]
    pub eval_commands: Option<Vec<String>>,
    /// Project-specific install step.
    #[serde(default)]
    pub install: Option<String>,
    /// Architecture tag recorded on the compiled specification.
    #[serde(default = "default_arch")]
    pub arch: String,
}

impl RepoVersionSpec {
    fn validate(&self) -> Result<(), SpecError> {
        if self.repo.trim().is_empty() {
            return Err(SpecError::InvalidTable("repo must be non-empty".into()));
        }
        if self.version.trim().is_empty() {
            return Err(SpecError::InvalidTable(format!(
                "{}: version must be non-empty",
                self.repo
            )));
        }
        if self.test_cmd.trim().is_empty() {
            return Err(SpecError::InvalidTable(format!(
                "{} {}: test_cmd must be non-empty",
                self.repo, self.version
            )));
        }
        if let Some(commands) = &self.eval_commands
            && commands.iter().any(|cmd| cmd.trim().is_empty())
        {
            return Err(SpecError::InvalidTable(format!(
                "{} {}: eval_commands entries must be non-empty",
                self.repo, self.version
            )));
        }
        if let Some(install) = &self.install
            && install.trim().is_empty()
        {
            return Err(SpecError::InvalidTable(format!(
                "{} {}: install must be non-empty when present",
                self.repo, self.version
            )));
        }
        if self.arch.trim().is_empty() {
            return Err(SpecError::InvalidTable(format!(
                "{} {}: arch must be non-empty",
                self.repo, self.version
            )));
        }
        Ok(())
    }
}

/// TOML document shape: an array of `[[specs]]` records.
#[derive(Debug, Deserialize)]
struct SpecsDocument {
    #[serde(default)]
    specs: Vec<RepoVersionSpec>,
}

/// Mapping from repository to version to its test specification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecsTable {
    entries: BTreeMap<String, BTreeMap<String, RepoVersionSpec>>,
}

impl SpecsTable {
    /// Load and validate a specs table from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SpecError> {
        let contents = fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, SpecError> {
        let document: SpecsDocument =
            toml::from_str(contents).map_err(|source| SpecError::ParseTable {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_specs(document.specs)
    }

    /// Build a table from already-parsed records, validating each.
    pub fn from_specs(specs: Vec<RepoVersionSpec>) -> Result<Self, SpecError> {
        let mut entries: BTreeMap<String, BTreeMap<String, RepoVersionSpec>> = BTreeMap::new();
        for spec in specs {
            spec.validate()?;
            let versions = entries.entry(spec.repo.clone()).or_default();
            if versions.contains_key(&spec.version) {
                return Err(SpecError::InvalidTable(format!(
                    "duplicate entry for {} {}",
                    spec.repo, spec.version
                )));
            }
            versions.insert(spec.version.clone(), spec);
        }
        Ok(Self { entries })
    }

    /// Look up the specification for `(repo, version)`.
    pub fn lookup(&self, repo: &str, version: &str) -> Result<&RepoVersionSpec, SpecError> {
        self.entries
            .get(repo)
            .and_then(|versions| versions.get(version))
            .ok_or_else(|| SpecError::ConfigurationNotFound {
                repo: repo.to_string(),
                version: version.to_string(),
            })
    }

    /// Number of `(repo, version)` entries in the table.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
[[specs]]
repo = "acme/lib"
version = "2.0"
test_cmd = "pytest"
install = "pip install -e ."
eval_commands = ["export X=1"]

[[specs]]
repo = "acme/lib"
version = "3.0"
test_cmd = "tox -e py311"
arch = "aarch64"
"#;

    #[test]
    fn parses_and_looks_up_specs() {
        let table = SpecsTable::parse(TABLE, Path::new("specs.toml")).expect("table parses");
        assert_eq!(table.len(), 2);

        let spec = table.lookup("acme/lib", "2.0").expect("spec present");
        assert_eq!(spec.test_cmd, "pytest");
        assert_eq!(spec.install.as_deref(), Some("pip install -e ."));
        assert_eq!(spec.arch, "x86_64");

        let spec = table.lookup("acme/lib", "3.0").expect("spec present");
        assert_eq!(spec.eval_commands, None);
        assert_eq!(spec.arch, "aarch64");
    }

    #[test]
    fn lookup_miss_is_configuration_not_found() {
        let table = SpecsTable::parse(TABLE, Path::new("specs.toml")).expect("table parses");
        let err = table.lookup("acme/lib", "9.9").expect_err("missing version");
        assert!(matches!(
            err,
            SpecError::ConfigurationNotFound { ref repo, ref version }
                if repo == "acme/lib" && version == "9.9"
        ));
        let err = table.lookup("other/repo", "2.0").expect_err("missing repo");
        assert!(matches!(err, SpecError::ConfigurationNotFound { .. }));
    }

    #[test]
    fn rejects_duplicate_repo_version() {
        let duplicated = format!(
            "{TABLE}\n[[specs]]\nrepo = \"acme/lib\"\nversion = \"2.0\"\ntest_cmd = \"pytest\"\n"
        );
        let err =
            SpecsTable::parse(&duplicated, Path::new("specs.toml")).expect_err("duplicate key");
        assert!(err.to_string().contains("duplicate entry"));
    }

    #[test]
    fn rejects_empty_fields() {
        let bad = "[[specs]]\nrepo = \"acme/lib\"\nversion = \"2.0\"\ntest_cmd = \"  \"\n";
        let err = SpecsTable::parse(bad, Path::new("specs.toml")).expect_err("blank test_cmd");
        assert!(err.to_string().contains("test_cmd"));

        let bad =
            "[[specs]]\nrepo = \"acme/lib\"\nversion = \"2.0\"\ntest_cmd = \"pytest\"\neval_commands = [\"\"]\n";
        let err = SpecsTable::parse(bad, Path::new("specs.toml")).expect_err("blank eval command");
        assert!(err.to_string().contains("eval_commands"));
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("specs.toml");
        fs::write(&path, TABLE).expect("write table");
        let table = SpecsTable::load(&path).expect("load");
        assert_eq!(table.len(), 2);

        let err = SpecsTable::load(&temp.path().join("missing.toml")).expect_err("missing file");
        assert!(matches!(err, SpecError::Read { .. }));
    }
}
