//! Test-specification compiler for held-out test-suite evaluation.
//!
//! Given a benchmark [`instance::Instance`] and a per-repo-version
//! [`config::SpecsTable`], the compiler deterministically assembles two
//! ordered shell command sequences: a functional test + coverage pipeline
//! and a time-boxed mutation-testing pipeline. The result is an immutable
//! [`spec::TestSpec`] whose rendered scripts run later inside an isolated
//! sandbox. The compiler itself performs no I/O and never executes the
//! commands it emits:
//!
//! - **[`config`]**: typed `(repo, version)` specification table, validated
//!   eagerly at load time.
//! - **[`script`]**: pure command-sequence builders (setup, test, mutation).
//! - **[`spec`]**: the `TestSpec` value object and its idempotent factory.
//!
//! The sentinel tokens and diff-header pattern in [`constants`] are shared
//! with the downstream output parser. They are a contract, not enforced
//! here: test output containing a sentinel, or directive strings containing
//! shell metacharacters, leave the compiled script's behavior undefined.

pub mod config;
pub mod constants;
pub mod directives;
pub mod error;
pub mod instance;
pub mod script;
pub mod spec;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
