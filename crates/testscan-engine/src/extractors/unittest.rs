//! `unittest`: classes whose base list includes `TestCase` (bare or
//! `unittest.TestCase`), `test*` methods. `@unittest.skip`/`skipIf`/`skipUnless`
//! mark a method skipped.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::python;
use crate::ast::{find_child_node, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct UnittestExtractor;

impl Extractor for UnittestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Python)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Python, "unittest");
        for i in 0..root.child_count() {
            let Some(child) = root.child(i) else { continue };
            let inner = python::inner_definition(&child);
            if inner.kind() != "class_definition" {
                continue;
            }
            if let Some(suite) = build_suite(&child, &inner, ctx) {
                file.suites.push(suite);
            }
        }
        file.prune_empty_suites();
        Ok(file)
    }
}

fn is_test_case(outer: &tree_sitter::Node, source: &[u8]) -> bool {
    python::base_class_names(outer, source)
        .iter()
        .any(|base| base == "TestCase" || base.ends_with(".TestCase"))
}

fn build_suite(outer: &tree_sitter::Node, class_def: &tree_sitter::Node, ctx: &ExtractionContext) -> Option<TestSuite> {
    if !is_test_case(outer, ctx.bytes) {
        return None;
    }
    let name = python::definition_name(outer, ctx.bytes)?;
    let loc = location_of(outer, ctx.path);
    let mut suite = TestSuite::active(name, loc);

    let Some(body) = find_child_node(class_def, "body") else {
        return Some(suite);
    };
    for i in 0..body.child_count() {
        let Some(member) = body.child(i) else { continue };
        let inner = python::inner_definition(&member);
        if inner.kind() != "function_definition" {
            continue;
        }
        if let Some(test) = build_test(&member, &inner, ctx) {
            suite.tests.push(test);
        }
    }
    suite.propagate_skip();
    Some(suite)
}

fn build_test(outer: &tree_sitter::Node, func_def: &tree_sitter::Node, ctx: &ExtractionContext) -> Option<Test> {
    let name = python::definition_name(outer, ctx.bytes)?;
    if !name.starts_with("test") {
        return None;
    }
    let loc = location_of(func_def, ctx.path);
    let decorators = if outer.kind() == "decorated_definition" {
        python::decorators_on(outer)
    } else {
        Vec::new()
    };
    for decorator in &decorators {
        let full = python::decorator_full_name(decorator, ctx.bytes);
        if full.ends_with(".skip") || full.ends_with(".skipIf") || full.ends_with(".skipUnless") || full == "skip" {
            return Some(Test::non_active(name, TestStatus::Skipped, full, loc));
        }
    }
    Some(Test::active(name, loc))
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "unittest",
        languages: &[Language::Python],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["import unittest", "from unittest"])),
            Box::new(ContentMatcher::new(&[r"unittest\.TestCase", r"\bdef test"], 35, "unittest TestCase")),
        ],
        config_parser: None,
        extractor: Box::new(UnittestExtractor),
        priority: FrameworkPriority::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::ScanCancellation;
    use crate::parser_pool::ParserPool;

    fn run(src: &[u8]) -> TestFile {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let ctx = ExtractionContext {
            path: "test_user.py",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        UnittestExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn bare_test_case_base_is_recognized() {
        let file = run(
            b"import unittest\n\
              class UserTest(TestCase):\n\
                  def test_creates_user(self):\n\
                      assert True\n",
        );
        assert_eq!(file.suites[0].name, "UserTest");
        assert_eq!(file.suites[0].tests[0].name, "test_creates_user");
    }

    #[test]
    fn qualified_unittest_test_case_base_is_recognized() {
        let file = run(
            b"import unittest\n\
              class UserTest(unittest.TestCase):\n\
                  def test_creates_user(self):\n\
                      assert True\n",
        );
        assert_eq!(file.suites[0].name, "UserTest");
    }

    #[test]
    fn class_without_test_case_base_is_ignored() {
        let file = run(b"class UserHelpers:\n    def test_creates_user(self):\n        assert True\n");
        assert!(file.is_empty());
    }

    #[test]
    fn skip_decorator_marks_the_method_skipped() {
        let file = run(
            b"import unittest\n\
              class UserTest(unittest.TestCase):\n\
                  @unittest.skip('not ready')\n\
                  def test_not_ready(self):\n\
                      assert True\n\
                  def test_works(self):\n\
                      assert True\n",
        );
        let not_ready = file.suites[0].tests.iter().find(|t| t.name == "test_not_ready").unwrap();
        assert_eq!(not_ready.status, TestStatus::Skipped);
        assert_eq!(not_ready.modifier, "unittest.skip");
        let works = file.suites[0].tests.iter().find(|t| t.name == "test_works").unwrap();
        assert!(works.status.is_active());
    }

    #[test]
    fn skip_if_decorator_marks_the_method_skipped() {
        let file = run(
            b"import unittest\n\
              class UserTest(unittest.TestCase):\n\
                  @unittest.skipIf(True, 'flag off')\n\
                  def test_conditionally_skipped(self):\n\
                      assert True\n",
        );
        assert_eq!(file.suites[0].tests[0].status, TestStatus::Skipped);
        assert_eq!(file.suites[0].tests[0].modifier, "unittest.skipIf");
    }
}
