//! Google Test / Google Mock: `TEST`, `TEST_F`, `TEST_P`, `TYPED_TEST`,
//! `TYPED_TEST_P` macros. The first macro argument is the suite name, the second
//! the test name. A `DISABLED_` prefix on the suite name skips every test in that
//! suite; on just the test name it skips only that test. Suites are emitted in
//! alphabetical order so that the same file always produces the same tree
//! regardless of the macros' order of appearance.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::cpp;
use crate::ast::location_of;
use crate::registry::FrameworkDefinition;
use crate::signals::ContentMatcher;

use super::{parse, ExtractionContext, ExtractionError, Extractor};

const DISABLED_PREFIX: &str = "DISABLED_";

fn strip_disabled_prefix(name: &str) -> String {
    name.strip_prefix(DISABLED_PREFIX).unwrap_or(name).to_string()
}

pub struct GTestExtractor;

impl Extractor for GTestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Cpp)?;
        let root = tree.root_node();

        let invocations = cpp::find_gtest_invocations(&root, ctx.bytes);
        let mut file = TestFile::new(ctx.path, Language::Cpp, "gtest");

        // Suites are keyed by the raw (possibly `DISABLED_`-prefixed) macro argument so
        // that all `TEST(DISABLED_Suite, ...)` invocations group together, but the name
        // handed to `TestSuite`/`Test` has the prefix stripped — the prefix is recorded
        // as the `modifier` instead, not duplicated into the display name.
        let mut suites: Vec<TestSuite> = Vec::new();
        let mut suite_keys: Vec<String> = Vec::new();
        for inv in invocations {
            if inv.args.len() < 2 {
                continue;
            }
            let suite_key = inv.args[0].clone();
            let test_name_raw = inv.args[1].clone();
            let loc = location_of(&inv.node, ctx.path);

            let suite = match suite_keys.iter().position(|k| k == &suite_key) {
                Some(i) => &mut suites[i],
                None => {
                    let disabled = suite_key.starts_with(DISABLED_PREFIX);
                    let suite_name = strip_disabled_prefix(&suite_key);
                    let new_suite = if disabled {
                        TestSuite::non_active(suite_name, TestStatus::Skipped, DISABLED_PREFIX, loc.clone())
                    } else {
                        TestSuite::active(suite_name, loc.clone())
                    };
                    suites.push(new_suite);
                    suite_keys.push(suite_key.clone());
                    suites.last_mut().unwrap()
                }
            };

            let test_name = strip_disabled_prefix(&test_name_raw);
            let test = if test_name_raw.starts_with(DISABLED_PREFIX) {
                Test::non_active(test_name, TestStatus::Skipped, DISABLED_PREFIX, loc)
            } else {
                Test::active(test_name, loc)
            };
            suite.tests.push(test);
        }

        suites.sort_by(|a, b| a.name.cmp(&b.name));
        for suite in &mut suites {
            suite.propagate_skip();
        }
        file.suites = suites;
        file.prune_empty_suites();
        Ok(file)
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "gtest",
        languages: &[Language::Cpp],
        matchers: vec![Box::new(ContentMatcher::new(
            &[r"\bTEST\s*\(", r"\bTEST_F\s*\(", r#"#include\s*[<"]gtest/gtest\.h[>"]"#],
            40,
            "Google Test macros",
        ))],
        config_parser: None,
        extractor: Box::new(GTestExtractor),
        priority: FrameworkPriority::Generic,
    }
}
