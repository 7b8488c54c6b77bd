//! The compiled test specification: identifiers plus both pipelines.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::SpecsTable;
use crate::constants::{ENV_NAME, REPO_DIRECTORY, SHEBANG, STRICT_MODE};
use crate::error::SpecError;
use crate::instance::Instance;
use crate::script::{build_mutation_script_list, build_test_script_list};

/// Immutable result of compiling one instance.
///
/// Both command lists are computed once at construction and never mutated;
/// the script renderings are pure derivations over them.
#[derive(Debug, Clone, PartialEq)]
pub struct TestSpec {
    pub instance_id: String,
    pub id: String,
    pub repo: String,
    pub version: String,
    pub code_file: String,
    pub test_file: String,
    pub arch: String,
    /// Baseline coverage per test name, untouched by the compiler.
    pub baseline_covs: BTreeMap<String, f64>,
    /// Functional test + coverage pipeline, in execution order.
    pub test_script_list: Vec<String>,
    /// Mutation-testing pipeline, in execution order.
    pub mutation_script_list: Vec<String>,
}

impl TestSpec {
    /// Compile an instance against the specs table.
    pub fn compile(
        instance: &Instance,
        table: &SpecsTable,
        mutation_timeout: u64,
    ) -> Result<Self, SpecError> {
        let spec = table.lookup(&instance.repo, &instance.version)?;
        let test_script_list =
            build_test_script_list(instance, table, ENV_NAME, REPO_DIRECTORY)?;
        let mutation_script_list =
            build_mutation_script_list(spec, ENV_NAME, REPO_DIRECTORY, mutation_timeout);
        debug!(
            instance_id = %instance.instance_id,
            test_commands = test_script_list.len(),
            mutation_commands = mutation_script_list.len(),
            "test specification compiled"
        );
        Ok(Self {
            instance_id: instance.instance_id.clone(),
            id: instance.id.clone(),
            repo: instance.repo.clone(),
            version: instance.version.clone(),
            code_file: instance.code_file.clone(),
            test_file: instance.test_file.clone(),
            arch: spec.arch.clone(),
            baseline_covs: instance.baseline_covs.clone(),
            test_script_list,
            mutation_script_list,
        })
    }

    /// Render the functional pipeline as an executable script body.
    pub fn test_script(&self) -> String {
        render_script(&self.test_script_list)
    }

    /// Render the mutation pipeline as an executable script body.
    pub fn mutation_script(&self) -> String {
        render_script(&self.mutation_script_list)
    }
}

/// Input accepted by [`make_test_spec`]: a raw instance, or a specification
/// that was already compiled and only needs passing through.
#[derive(Debug, Clone)]
pub enum SpecInput {
    Instance(Box<Instance>),
    Spec(Box<TestSpec>),
}

impl From<Instance> for SpecInput {
    fn from(instance: Instance) -> Self {
        Self::Instance(Box::new(instance))
    }
}

impl From<TestSpec> for SpecInput {
    fn from(spec: TestSpec) -> Self {
        Self::Spec(Box::new(spec))
    }
}

/// Compile an instance, or return an already-compiled spec unchanged.
pub fn make_test_spec(
    input: impl Into<SpecInput>,
    table: &SpecsTable,
    mutation_timeout: u64,
) -> Result<TestSpec, SpecError> {
    match input.into() {
        SpecInput::Spec(spec) => Ok(*spec),
        SpecInput::Instance(instance) => TestSpec::compile(&instance, table, mutation_timeout),
    }
}

fn render_script(commands: &[String]) -> String {
    let mut lines = Vec::with_capacity(commands.len() + 2);
    lines.push(SHEBANG);
    lines.push(STRICT_MODE);
    lines.extend(commands.iter().map(String::as_str));
    let mut script = lines.join("\n");
    script.push('\n');
    script
}
