//! Constants shared with the sandbox image and downstream output parsers.

use std::sync::LazyLock;

use regex::Regex;

/// Conda environment the sandbox provisions for every instance.
pub const ENV_NAME: &str = "testbed";

/// Absolute path of the repository checkout inside the sandbox.
pub const REPO_DIRECTORY: &str = "/testbed";

/// First line of every generated script.
pub const SHEBANG: &str = "#!/bin/bash";

/// Shell strictness directive, second line of every generated script.
///
/// No `-e`: the test step may fail, and the commands after it (coverage
/// serialization, test-artifact reversion, reporting) must still run. The
/// caller inspects the test step's exit status out-of-band.
pub const STRICT_MODE: &str = "set -uxo pipefail";

/// Echoed between test-runner output and coverage output.
///
/// The output parser splits the captured stdout on this token verbatim, so
/// it must never appear in ordinary test output.
pub const TESTS_SUFFIX: &str = "TESTGEN_TESTS_COMPLETE";

/// Echoed immediately before the coverage JSON payload.
pub const COVERAGE_PREFIX: &str = "TESTGEN_COVERAGE_BEGIN";

/// Rewrites `tox.ini` so pytest invocations inside tox run under coverage.
pub const UPDATE_TOX: &str =
    "sed -i 's/python -m pytest/python -m coverage run -m pytest/g' tox.ini";

/// Injects a coverage section into `tox.ini` (helper shipped in the sandbox
/// image).
pub const ADD_COVERAGE_TOX: &str = "add_coverage_tox \"tox.ini\"";

/// Removes a stale per-project coverage config. A leftover `.coveragerc`
/// can restrict source paths and suppress coverage of the file under test.
pub const CLEAN_COVERAGERC: &str = "[ -f \".coveragerc\" ] && rm \".coveragerc\"";

/// Matches the modified-file path in a unified diff header line.
pub static DIFF_MODIFIED_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--- a/(.*)").unwrap());

/// Extract modified-file paths from a unified diff, in order of appearance.
pub fn modified_files(diff: &str) -> Vec<String> {
    DIFF_MODIFIED_FILE_RE
        .captures_iter(diff)
        .map(|caps| caps[1].to_string())
        .collect()
}
