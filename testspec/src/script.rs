//! Command-sequence builders for the test and mutation pipelines.
//!
//! Builders are pure: they assemble ordered shell command lists and perform
//! no I/O themselves. Failures inside the emitted commands (a failing
//! install, a failing test step, a mutation timeout) surface only as exit
//! statuses in the sandbox; nothing here observes them.

use crate::config::{RepoVersionSpec, SpecsTable};
use crate::constants::{
    ADD_COVERAGE_TOX, CLEAN_COVERAGERC, COVERAGE_PREFIX, TESTS_SUFFIX, UPDATE_TOX,
};
use crate::directives::get_test_directives;
use crate::error::SpecError;
use crate::instance::Instance;

/// Marker substring identifying a tox-driven test invocation.
const TOX_MARKER: &str = "tox";

/// Build the common preamble shared by both pipelines.
///
/// `test_command` is only inspected for the tox marker. The mutation
/// pipeline passes `None`, so the tox patches never fire there. Install and
/// eval-command strings from the specs table are embedded unescaped.
pub fn build_setup(
    spec: &RepoVersionSpec,
    env_name: &str,
    repo_directory: &str,
    test_command: Option<&str>,
) -> Vec<String> {
    let uses_tox = test_command.is_some_and(|cmd| cmd.contains(TOX_MARKER));

    let mut commands = Vec::new();
    if uses_tox {
        commands.push(UPDATE_TOX.to_string());
    }
    commands.push("source /opt/miniconda3/bin/activate".to_string());
    commands.push(format!("conda activate {env_name}"));
    commands.push(format!("cd {repo_directory}"));
    if let Some(eval_commands) = &spec.eval_commands {
        commands.extend(eval_commands.iter().cloned());
    }
    // The sandbox may run as a different filesystem owner than whoever
    // created the checkout.
    commands.push(format!(
        "git config --global --add safe.directory {repo_directory}"
    ));
    // An eval command may have changed directory or deactivated the env;
    // restore both before anything that depends on them.
    commands.push(format!("cd {repo_directory}"));
    // Informational only: recorded in the captured output, never parsed.
    commands.push("git status".to_string());
    commands.push("git show".to_string());
    commands.push("source /opt/miniconda3/bin/activate".to_string());
    commands.push(format!("conda activate {env_name}"));
    if let Some(install) = &spec.install {
        commands.push(install.clone());
    }
    if uses_tox {
        commands.push(ADD_COVERAGE_TOX.to_string());
    }
    commands.push(CLEAN_COVERAGERC.to_string());
    commands
}

/// Build the functional test + coverage pipeline for an instance.
///
/// Resolves the runner template for `(instance.repo, instance.version)`,
/// joins it with the instance's test directives, then appends the
/// sentinel-delimited coverage extraction so the captured stdout carries
/// both markers and the embedded JSON payload.
pub fn build_test_script_list(
    instance: &Instance,
    table: &SpecsTable,
    env_name: &str,
    repo_directory: &str,
) -> Result<Vec<String>, SpecError> {
    let spec = table.lookup(&instance.repo, &instance.version)?;

    let mut parts = vec![spec.test_cmd.clone()];
    parts.extend(get_test_directives(instance));
    let test_command = parts.join(" ");

    let mut commands = build_setup(spec, env_name, repo_directory, Some(&test_command));
    commands.push(test_command);
    commands.push(format!("echo {TESTS_SUFFIX}"));
    commands.push("coverage json -o coverage.json".to_string());
    commands.push(format!("echo {COVERAGE_PREFIX}"));
    commands.push("cat coverage.json".to_string());
    Ok(commands)
}

/// Build the time-boxed mutation-testing pipeline.
///
/// The `timeout` wrapper around the exec step is the only cancellation
/// point in the compiled script; the kill-rate step estimates with a 95%
/// confidence interval rather than sweeping every mutant.
pub fn build_mutation_script_list(
    spec: &RepoVersionSpec,
    env_name: &str,
    repo_directory: &str,
    mutation_timeout: u64,
) -> Vec<String> {
    let mut commands = build_setup(spec, env_name, repo_directory, None);
    commands.push("cosmic-ray init mutation.toml mutation.sqlite".to_string());
    commands.push(format!(
        "timeout {mutation_timeout}s cosmic-ray exec mutation.toml mutation.sqlite"
    ));
    commands.push("cr-rate mutation.sqlite --estimate --confidence 95.0".to_string());
    commands.push("cr-report mutation.sqlite".to_string());
    commands
}
