//! Dataset loading: benchmark instances from JSON or JSONL files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use testspec::instance::Instance;

/// Load and validate instances from a dataset file.
///
/// `.jsonl` files hold one instance per line; anything else is parsed as a
/// JSON array.
pub fn load_instances(path: &Path) -> Result<Vec<Instance>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read dataset {}", path.display()))?;

    let instances = if path.extension().and_then(|ext| ext.to_str()) == Some("jsonl") {
        let mut instances = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let instance: Instance = serde_json::from_str(line)
                .with_context(|| format!("parse {} line {}", path.display(), number + 1))?;
            instances.push(instance);
        }
        instances
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("parse dataset {}", path.display()))?
    };

    validate_instances(&instances)
        .with_context(|| format!("validate dataset {}", path.display()))?;
    Ok(instances)
}

/// Find an instance by id.
pub fn find_instance<'a>(instances: &'a [Instance], instance_id: &str) -> Result<&'a Instance> {
    instances
        .iter()
        .find(|instance| instance.instance_id == instance_id)
        .ok_or_else(|| anyhow!("instance {} not found in dataset", instance_id))
}

fn validate_instances(instances: &[Instance]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for instance in instances {
        if instance.instance_id.trim().is_empty() {
            bail!("instance_id must be non-empty");
        }
        for (field, value) in [
            ("repo", &instance.repo),
            ("version", &instance.version),
            ("code_file", &instance.code_file),
            ("test_file", &instance.test_file),
        ] {
            if value.trim().is_empty() {
                bail!("{}: {} must be non-empty", instance.instance_id, field);
            }
        }
        if !seen.insert(instance.instance_id.as_str()) {
            bail!("duplicate instance_id {}", instance.instance_id);
        }
    }
    Ok(())
}
