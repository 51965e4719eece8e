//! Pytest: top-level `test_*` functions and `Test*`-prefixed classes (no base
//! class required) whose methods are `test_*`. `@pytest.mark.skip`/`skipif` mark
//! a test skipped; `@pytest.mark.xfail` marks it expected-to-fail.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::python;
use crate::ast::{children_of_kind, find_child_node, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct PytestExtractor;

impl Extractor for PytestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Python)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Python, "pytest");
        for i in 0..root.child_count() {
            let Some(child) = root.child(i) else { continue };
            let inner = python::inner_definition(&child);
            match inner.kind() {
                "function_definition" => {
                    if let Some(test) = build_test(&child, &inner, ctx) {
                        file.tests.push(test);
                    }
                }
                "class_definition" => {
                    if let Some(suite) = build_suite(&child, &inner, ctx) {
                        file.suites.push(suite);
                    }
                }
                _ => {}
            }
        }
        file.prune_empty_suites();
        Ok(file)
    }
}

fn build_suite(outer: &tree_sitter::Node, class_def: &tree_sitter::Node, ctx: &ExtractionContext) -> Option<TestSuite> {
    let name = python::definition_name(outer, ctx.bytes)?;
    if !name.starts_with("Test") {
        return None;
    }
    let loc = location_of(outer, ctx.path);
    let mut suite = TestSuite::active(name, loc);

    let Some(body) = find_child_node(class_def, "body") else {
        return Some(suite);
    };
    for i in 0..body.child_count() {
        let Some(member) = body.child(i) else { continue };
        let inner = python::inner_definition(&member);
        if inner.kind() == "function_definition" {
            if let Some(test) = build_test(&member, &inner, ctx) {
                suite.tests.push(test);
            }
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
        if full == "pytest.mark.skip" || full == "pytest.mark.skipif" {
            return Some(Test::non_active(name, TestStatus::Skipped, full, loc));
        }
        if full == "pytest.mark.xfail" {
            return Some(Test::non_active(name, TestStatus::Xfail, full, loc));
        }
    }
    Some(Test::active(name, loc))
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "pytest",
        languages: &[Language::Python],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["test_*.py", "*_test.py"], 20)),
            Box::new(ImportMatcher::new(vec!["import pytest", "from pytest"])),
            Box::new(ContentMatcher::new(
                &[r"@pytest\.fixture", r"@pytest\.mark\.", r"\bdef test_"],
                35,
                "Pytest markers or bare test functions",
            )),
        ],
        config_parser: None,
        extractor: Box::new(PytestExtractor),
        priority: FrameworkPriority::Generic,
    }
}
