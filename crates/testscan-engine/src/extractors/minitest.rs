//! Minitest: classes extending `Minitest::Test`/`Minitest::Spec`, or whose name
//! ends with `Test`, become suites; `test_*` methods become tests. Spec-style
//! `describe`/`it` blocks mirror RSpec's DSL. A bare `skip` call anywhere inside a
//! test body (bounded recursion) marks that test skipped.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::ruby::{self, RubyModifier};
use crate::ast::{find_child_node, find_child_text, location_of, node_text};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

const SUITE_NAMES: &[&str] = &["describe", "context"];
const TEST_NAMES: &[&str] = &["it", "specify"];

pub struct MinitestExtractor;

impl Extractor for MinitestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Ruby)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Ruby, "minitest");
        walk(&root, ctx, 0, &mut file.suites, &mut file.tests);
        file.prune_empty_suites();
        Ok(file)
    }
}

fn walk(
    node: &tree_sitter::Node,
    ctx: &ExtractionContext,
    depth: u32,
    suites_out: &mut Vec<TestSuite>,
    tests_out: &mut Vec<Test>,
) {
    if ctx.cancellation.is_cancelled() {
        return;
    }
    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };

        if child.kind() == "class" && is_test_class(&child, ctx.bytes) {
            if depth >= ctx.max_nesting_depth {
                ctx.note_depth_exceeded();
                continue;
            }
            let name = find_child_text(&child, "name", ctx.bytes).unwrap_or_else(|| "<anonymous>".to_string());
            let mut suite = TestSuite::active(name, location_of(&child, ctx.path));
            if let Some(body) = find_child_node(&child, "body") {
                walk(&body, ctx, depth + 1, &mut suite.suites, &mut suite.tests);
            }
            suite.prune_empty_descendants();
            suite.propagate_skip();
            suites_out.push(suite);
            continue;
        }

        if let Some(call) = ruby::recognize_call(&child, ctx.bytes, SUITE_NAMES) {
            if depth >= ctx.max_nesting_depth {
                ctx.note_depth_exceeded();
                continue;
            }
            let name = ruby::first_string_argument(&child, ctx.bytes).unwrap_or_else(|| "<anonymous>".to_string());
            let mut suite = match call.modifier {
                RubyModifier::Skipped => {
                    TestSuite::non_active(name, TestStatus::Skipped, "xdescribe", location_of(&child, ctx.path))
                }
                _ => TestSuite::active(name, location_of(&child, ctx.path)),
            };
            if let Some(block) = call.block {
                walk(&block, ctx, depth + 1, &mut suite.suites, &mut suite.tests);
            }
            suite.prune_empty_descendants();
            suite.propagate_skip();
            suites_out.push(suite);
            continue;
        }

        if child.kind() == "method" {
            if let Some(name) = find_child_text(&child, "name", ctx.bytes) {
                if name.starts_with("test_") {
                    let loc = location_of(&child, ctx.path);
                    let body = find_child_node(&child, "body");
                    let test = match body {
                        Some(body) if body_contains_skip(&body, ctx.bytes, ctx.max_nesting_depth) => {
                            Test::non_active(name, TestStatus::Skipped, "skip", loc)
                        }
                        _ => Test::active(name, loc),
                    };
                    tests_out.push(test);
                    continue;
                }
            }
        }

        if let Some(call) = ruby::recognize_call(&child, ctx.bytes, TEST_NAMES) {
            let loc = location_of(&child, ctx.path);
            let name = ruby::first_string_argument(&child, ctx.bytes).unwrap_or_else(|| "<anonymous>".to_string());
            let test = if call.modifier == RubyModifier::Skipped {
                Test::non_active(name, TestStatus::Skipped, "xit", loc)
            } else if let Some(block) = &call.block {
                if body_contains_skip(block, ctx.bytes, ctx.max_nesting_depth) {
                    Test::non_active(name, TestStatus::Skipped, "skip", loc)
                } else {
                    Test::active(name, loc)
                }
            } else {
                Test::active(name, loc)
            };
            tests_out.push(test);
            continue;
        }

        walk(&child, ctx, depth, suites_out, tests_out);
    }
}

fn body_contains_skip(body: &tree_sitter::Node, source: &[u8], max_depth: u32) -> bool {
    ruby::body_calls_bare_method(body, source, "skip", max_depth)
}

fn is_test_class(class_node: &tree_sitter::Node, source: &[u8]) -> bool {
    if let Some(superclass) = find_child_node(class_node, "superclass") {
        let text = node_text(&superclass, source);
        if text.contains("Minitest::Test") || text.contains("Minitest::Spec") || text.contains("MiniTest::Test") {
            return true;
        }
    }
    find_child_text(class_node, "name", source)
        .map(|n| n.ends_with("Test"))
        .unwrap_or(false)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "minitest",
        languages: &[Language::Ruby],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*_test.rb", "test_*.rb"], 20)),
            Box::new(ImportMatcher::new(vec!["require 'minitest", "require \"minitest"])),
            Box::new(ContentMatcher::new(
                &[r"Minitest::Test", r"MiniTest::Test", r"Minitest::Spec"],
                40,
                "Minitest base class",
            )),
        ],
        config_parser: None,
        extractor: Box::new(MinitestExtractor),
        priority: FrameworkPriority::Generic,
    }
}
