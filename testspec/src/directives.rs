//! Test-directive resolution: which selectors to hand the test runner.

use crate::instance::Instance;

/// Repos whose bespoke test harness takes dotted module selectors instead
/// of file paths.
const MODULE_SELECTOR_REPOS: &[&str] = &["django/django"];

/// Resolve the ordered test directives for an instance.
///
/// Deterministic and side-effect-free. Directive strings are embedded in
/// the compiled script as-is: no shell-metacharacter escaping and no
/// sentinel-collision check. Callers own that guarantee.
pub fn get_test_directives(instance: &Instance) -> Vec<String> {
    if MODULE_SELECTOR_REPOS.contains(&instance.repo.as_str()) {
        return vec![module_selector(&instance.test_file)];
    }
    vec![instance.test_file.clone()]
}

/// Convert `tests/foo/test_bar.py` into the `foo.test_bar` selector that
/// django's `runtests.py` expects.
fn module_selector(test_file: &str) -> String {
    let path = test_file.strip_suffix(".py").unwrap_or(test_file);
    let path = path.strip_prefix("tests/").unwrap_or(path);
    path.replace('/', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_instance;

    #[test]
    fn plain_repo_uses_test_file_path() {
        let instance = sample_instance();
        assert_eq!(
            get_test_directives(&instance),
            vec!["tests/test_core.py".to_string()]
        );
    }

    #[test]
    fn django_uses_dotted_module_selector() {
        let mut instance = sample_instance();
        instance.repo = "django/django".to_string();
        instance.test_file = "tests/queries/test_qs_combinators.py".to_string();
        assert_eq!(
            get_test_directives(&instance),
            vec!["queries.test_qs_combinators".to_string()]
        );
    }

    #[test]
    fn selector_conversion_tolerates_unusual_paths() {
        assert_eq!(module_selector("tests/test_basic.py"), "test_basic");
        assert_eq!(module_selector("test_basic.py"), "test_basic");
        assert_eq!(module_selector("tests/sub/test_deep.py"), "sub.test_deep");
    }
}
