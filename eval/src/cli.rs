//! CLI command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

use testspec::config::SpecsTable;
use testspec::spec::{TestSpec, make_test_spec};

use crate::dataset::{find_instance, load_instances};
use crate::manifest::{CompileManifest, InstanceEntry, file_sha256, write_manifest};

/// Print the instance ids in a dataset.
pub fn list_instances(dataset: &Path) -> Result<()> {
    let instances = load_instances(dataset)?;
    for instance in instances {
        println!("{}", instance.instance_id);
    }
    Ok(())
}

/// Compile every instance into `<out>/<instance_id>/{test.sh,mutation.sh,
/// spec.json}` plus a top-level `manifest.json`.
///
/// An instance whose `(repo, version)` is missing from the table fails the
/// whole run; no partial specification is written for it.
pub fn compile_dataset(
    dataset: &Path,
    specs_path: &Path,
    out: &Path,
    mutation_timeout: u64,
) -> Result<()> {
    let instances = load_instances(dataset).context("load dataset")?;
    let table = SpecsTable::load(specs_path).context("load specs table")?;
    debug!(
        instances = instances.len(),
        specs = table.len(),
        "inputs loaded"
    );

    fs::create_dir_all(out).with_context(|| format!("create out dir {}", out.display()))?;

    let mut entries = Vec::with_capacity(instances.len());
    for instance in &instances {
        let spec = make_test_spec(instance.clone(), &table, mutation_timeout)
            .with_context(|| format!("compile {}", instance.instance_id))?;
        write_spec_artifacts(out, &spec)?;
        debug!(instance_id = %spec.instance_id, "instance compiled");
        entries.push(InstanceEntry {
            instance_id: spec.instance_id.clone(),
            repo: spec.repo.clone(),
            version: spec.version.clone(),
            arch: spec.arch.clone(),
        });
    }

    let manifest = CompileManifest {
        dataset: dataset.display().to_string(),
        specs_table: specs_path.display().to_string(),
        specs_table_hash: file_sha256(specs_path).context("hash specs table")?,
        mutation_timeout_secs: mutation_timeout,
        compiled_at: Utc::now().to_rfc3339(),
        instances: entries,
    };
    write_manifest(&out.join("manifest.json"), &manifest)?;

    info!(count = instances.len(), out = %out.display(), "dataset compiled");
    println!("compile: instances={} out={}", instances.len(), out.display());
    Ok(())
}

/// Print one instance's compiled script to stdout.
pub fn show_script(
    dataset: &Path,
    instance_id: &str,
    specs_path: &Path,
    mutation: bool,
    mutation_timeout: u64,
) -> Result<()> {
    let instances = load_instances(dataset).context("load dataset")?;
    let instance = find_instance(&instances, instance_id)?;
    let table = SpecsTable::load(specs_path).context("load specs table")?;

    let spec = make_test_spec(instance.clone(), &table, mutation_timeout)
        .with_context(|| format!("compile {instance_id}"))?;
    if mutation {
        print!("{}", spec.mutation_script());
    } else {
        print!("{}", spec.test_script());
    }
    Ok(())
}

fn write_spec_artifacts(out: &Path, spec: &TestSpec) -> Result<()> {
    let dir = out.join(&spec.instance_id);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

    fs::write(dir.join("test.sh"), spec.test_script())
        .with_context(|| format!("write test script for {}", spec.instance_id))?;
    fs::write(dir.join("mutation.sh"), spec.mutation_script())
        .with_context(|| format!("write mutation script for {}", spec.instance_id))?;

    // Identifiers and baseline coverage for the downstream comparison step;
    // the scripts themselves are the execution surface.
    let payload = serde_json::json!({
        "instance_id": spec.instance_id,
        "id": spec.id,
        "repo": spec.repo,
        "version": spec.version,
        "code_file": spec.code_file,
        "test_file": spec.test_file,
        "arch": spec.arch,
        "baseline_covs": spec.baseline_covs,
    });
    let contents = serde_json::to_string_pretty(&payload).context("serialize spec")?;
    fs::write(dir.join("spec.json"), format!("{contents}\n"))
        .with_context(|| format!("write spec.json for {}", spec.instance_id))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TABLE: &str = r#"
[[specs]]
repo = "acme/lib"
version = "2.0"
test_cmd = "pytest"
install = "pip install -e ."
eval_commands = ["export X=1"]
"#;

    const DATASET: &str = r#"[{
        "instance_id": "acme__lib-1337",
        "id": "1337",
        "repo": "acme/lib",
        "version": "2.0",
        "code_file": "src/core.py",
        "test_file": "tests/test_core.py",
        "baseline_covs": {"tests/test_core.py": 81.5}
    }]"#;

    #[test]
    fn compile_writes_scripts_and_manifest() {
        let temp = tempdir().expect("tempdir");
        let dataset = temp.path().join("dataset.json");
        let specs = temp.path().join("specs.toml");
        let out = temp.path().join("out");
        fs::write(&dataset, DATASET).expect("write dataset");
        fs::write(&specs, TABLE).expect("write specs");

        compile_dataset(&dataset, &specs, &out, 900).expect("compile");

        let instance_dir = out.join("acme__lib-1337");
        let test_script = fs::read_to_string(instance_dir.join("test.sh")).expect("test.sh");
        assert!(test_script.starts_with("#!/bin/bash\nset -uxo pipefail\n"));
        assert!(test_script.contains("pytest tests/test_core.py"));

        let mutation_script =
            fs::read_to_string(instance_dir.join("mutation.sh")).expect("mutation.sh");
        assert!(mutation_script.contains("timeout 900s cosmic-ray exec"));

        let spec_json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(instance_dir.join("spec.json")).expect("read"))
                .expect("parse spec.json");
        assert_eq!(spec_json["repo"], "acme/lib");
        assert_eq!(spec_json["baseline_covs"]["tests/test_core.py"], 81.5);

        let manifest: CompileManifest = serde_json::from_str(
            &fs::read_to_string(out.join("manifest.json")).expect("read manifest"),
        )
        .expect("parse manifest");
        assert_eq!(manifest.instances.len(), 1);
        assert_eq!(manifest.mutation_timeout_secs, 900);
        assert_eq!(
            manifest.specs_table_hash,
            file_sha256(&specs).expect("hash")
        );
    }

    #[test]
    fn compile_fails_on_missing_configuration() {
        let temp = tempdir().expect("tempdir");
        let dataset = temp.path().join("dataset.json");
        let specs = temp.path().join("specs.toml");
        let out = temp.path().join("out");
        fs::write(&dataset, DATASET.replace("\"2.0\"", "\"9.9\"")).expect("write dataset");
        fs::write(&specs, TABLE).expect("write specs");

        let err = compile_dataset(&dataset, &specs, &out, 900).expect_err("unconfigured version");
        assert!(
            format!("{err:#}").contains("no test specification configured for acme/lib 9.9"),
            "unexpected error chain: {err:#}"
        );
        assert!(!out.join("acme__lib-1337").join("test.sh").exists());
    }
}
