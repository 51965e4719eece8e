use serde::{Deserialize, Serialize};

use super::test_tree::TestFile;

/// The final product of a scan: every recognized test file under `root_path`.
///
/// `files` reflects the order extraction completed in, which is non-deterministic
/// under concurrency — callers that need a stable order should sort by `path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub root_path: String,
    pub files: Vec<TestFile>,
}

impl Inventory {
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            files: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_tests(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.tests.len() + count_suite_tests(&f.suites))
            .sum()
    }
}

fn count_suite_tests(suites: &[super::test_tree::TestSuite]) -> usize {
    suites
        .iter()
        .map(|s| s.tests.len() + count_suite_tests(&s.suites))
        .sum()
}
