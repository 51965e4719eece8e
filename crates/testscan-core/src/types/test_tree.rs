use serde::{Deserialize, Serialize};

use super::language::Language;
use super::location::Location;

/// The three statuses a `Test` or `TestSuite` can carry.
///
/// `xfail` is used only by frameworks whose "pending" semantic means *runs but is
/// expected to fail* (RSpec's `pending`); everything else that is skipped before
/// running uses `skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Active,
    Skipped,
    Xfail,
}

impl TestStatus {
    pub fn is_active(self) -> bool {
        matches!(self, TestStatus::Active)
    }
}

impl Default for TestStatus {
    fn default() -> Self {
        TestStatus::Active
    }
}

/// A leaf test case.
///
/// Invariant: `status != Active` implies `modifier` is non-empty; `status == Active`
/// implies `modifier` is empty. Construct through [`Test::new`] / [`Test::active`] to
/// keep that invariant, rather than building the struct literal directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub name: String,
    pub status: TestStatus,
    pub modifier: String,
    pub location: Location,
}

impl Test {
    pub fn active(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Active,
            modifier: String::new(),
            location,
        }
    }

    pub fn non_active(
        name: impl Into<String>,
        status: TestStatus,
        modifier: impl Into<String>,
        location: Location,
    ) -> Self {
        let modifier = modifier.into();
        debug_assert!(
            status.is_active() || !modifier.is_empty(),
            "non-active test must carry a modifier"
        );
        Self {
            name: name.into(),
            status,
            modifier,
            location,
        }
    }
}

/// A named group of tests and nested suites.
///
/// Suites may nest arbitrarily but the extractor enforces a configurable depth bound
/// (default 20). A suite whose `tests` and `suites` are both empty must be dropped by
/// the extractor before it reaches a `TestFile` — see [`TestSuite::is_empty`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub status: TestStatus,
    pub modifier: String,
    pub location: Location,
    pub tests: Vec<Test>,
    pub suites: Vec<TestSuite>,
}

impl TestSuite {
    pub fn active(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Active,
            modifier: String::new(),
            location,
            tests: Vec::new(),
            suites: Vec::new(),
        }
    }

    pub fn non_active(
        name: impl Into<String>,
        status: TestStatus,
        modifier: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            modifier: modifier.into(),
            location,
            tests: Vec::new(),
            suites: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.suites.is_empty()
    }

    /// Forces `skipped` onto every descendant test and suite, in place. Individual
    /// modifiers are left untouched so the original marker survives for display.
    pub fn propagate_skip(&mut self) {
        if self.status == TestStatus::Skipped {
            for test in &mut self.tests {
                if test.status != TestStatus::Skipped {
                    test.status = TestStatus::Skipped;
                    if test.modifier.is_empty() {
                        test.modifier = self.modifier.clone();
                    }
                }
            }
            for suite in &mut self.suites {
                suite.status = TestStatus::Skipped;
                if suite.modifier.is_empty() {
                    suite.modifier = self.modifier.clone();
                }
            }
        }
        for suite in &mut self.suites {
            suite.propagate_skip();
        }
    }

    /// Drops empty descendant suites bottom-up, then reports whether this suite
    /// itself became empty as a result.
    pub fn prune_empty_descendants(&mut self) {
        for suite in &mut self.suites {
            suite.prune_empty_descendants();
        }
        self.suites.retain(|s| !s.is_empty());
    }
}

/// Tie-break priority used only when the Detection Arbitrator must choose between
/// frameworks that matched the same file. Ordered `E2e > Specific > Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkPriority {
    Generic,
    Specific,
    E2e,
}

/// One source file recognized as belonging to a test framework.
///
/// `path` is relative to the inventory root. A file whose `tests` and `suites` are
/// both empty is omitted from the inventory by the Scanner, unless a framework's
/// extractor explicitly opts into a "discovered but empty" record (see PHPUnit's
/// documented exception in the extractor module).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestFile {
    pub path: String,
    pub language: Language,
    pub framework: String,
    pub tests: Vec<Test>,
    pub suites: Vec<TestSuite>,
    pub config_scope: Option<String>,
}

impl TestFile {
    pub fn new(path: impl Into<String>, language: Language, framework: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            language,
            framework: framework.into(),
            tests: Vec::new(),
            suites: Vec::new(),
            config_scope: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty() && self.suites.is_empty()
    }

    pub fn prune_empty_suites(&mut self) {
        for suite in &mut self.suites {
            suite.prune_empty_descendants();
        }
        self.suites.retain(|s| !s.is_empty());
    }
}
