//! Compile-run manifest: what was compiled, from which inputs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Per-instance record in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceEntry {
    pub instance_id: String,
    pub repo: String,
    pub version: String,
    pub arch: String,
}

/// Metadata for a compile run, persisted to `manifest.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileManifest {
    pub dataset: String,
    pub specs_table: String,
    /// SHA-256 of the specs table for reproducibility tracking.
    pub specs_table_hash: String,
    pub mutation_timeout_secs: u64,
    pub compiled_at: String,
    pub instances: Vec<InstanceEntry>,
}

pub fn write_manifest(path: &Path, manifest: &CompileManifest) -> Result<()> {
    let contents = serde_json::to_string_pretty(manifest).context("serialize manifest")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write manifest {}", path.display()))?;
    Ok(())
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let contents = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(contents);
    Ok(hex::encode(hasher.finalize()))
}
