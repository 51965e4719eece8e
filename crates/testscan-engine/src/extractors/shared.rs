//! Traversal logic shared across sibling frameworks whose test-definition
//! constructs are structurally identical (the Jest/Vitest/Mocha/Playwright/Cypress
//! `describe`/`it` DSL family). Framework-specific modules call into here rather
//! than duplicating the walk five times over.

use testscan_core::{Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::js_ts::{self, CallModifier};
use crate::ast::location_of;

use super::{parse, ExtractionContext, ExtractionError};

/// Walks a Jest-family AST (`describe`/`context` suites, `it`/`test`/`specify`
/// leaves) and emits a `TestFile`. Shared by jest, vitest, mocha, playwright, and
/// cypress — they differ only in detection signals and config scoping, never in
/// how the DSL itself is traversed.
pub fn extract_js_dsl(
    ctx: &ExtractionContext,
    language: Language,
    framework: &'static str,
) -> Result<TestFile, ExtractionError> {
    let (_handle, tree) = parse(ctx, language)?;
    let root = tree.root_node();

    let mut file = TestFile::new(ctx.path, language, framework);
    walk_statements(&root, ctx, 0, &mut file.suites, &mut file.tests);
    file.prune_empty_suites();
    Ok(file)
}

const SUITE_NAMES: &[&str] = &["describe", "context"];
const TEST_NAMES: &[&str] = &["it", "test", "specify"];

fn walk_statements(
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
        if let Some(call) = js_ts::recognize_call(&child, ctx.bytes, SUITE_NAMES) {
            if depth >= ctx.max_nesting_depth {
                ctx.note_depth_exceeded();
                continue;
            }
            let name = js_ts::first_string_argument(&call.arguments, ctx.bytes)
                .unwrap_or_else(|| "<anonymous>".to_string());
            let (status, modifier) = status_for(&call.modifier);
            let mut suite = if status.is_active() {
                TestSuite::active(name, location_of(&child, ctx.path))
            } else {
                TestSuite::non_active(name, status, modifier, location_of(&child, ctx.path))
            };
            if let Some(body) = js_ts::body_argument(&call.arguments) {
                walk_statements(&body, ctx, depth + 1, &mut suite.suites, &mut suite.tests);
            }
            suite.prune_empty_descendants();
            suite.propagate_skip();
            suites_out.push(suite);
            continue;
        }
        if let Some(call) = js_ts::recognize_call(&child, ctx.bytes, TEST_NAMES) {
            let name = js_ts::first_string_argument(&call.arguments, ctx.bytes)
                .unwrap_or_else(|| "<anonymous>".to_string());
            let (status, modifier) = status_for(&call.modifier);
            let test = if status.is_active() {
                Test::active(name, location_of(&child, ctx.path))
            } else {
                Test::non_active(name, status, modifier, location_of(&child, ctx.path))
            };
            tests_out.push(test);
            continue;
        }
        // Recurse into statement blocks that aren't themselves DSL calls, so
        // `describe`/`it` calls wrapped in an extra block or an `if` still surface.
        if matches!(
            child.kind(),
            "expression_statement" | "statement_block" | "program"
        ) {
            walk_statements(&child, ctx, depth, suites_out, tests_out);
        }
    }
}

fn status_for(modifier: &CallModifier) -> (TestStatus, String) {
    match modifier {
        CallModifier::None => (TestStatus::Active, String::new()),
        CallModifier::Skip => (TestStatus::Skipped, "skip".to_string()),
        CallModifier::Todo => (TestStatus::Skipped, "todo".to_string()),
        // `.only` doesn't change a test's own status — it changes what the
        // *runner* executes, which is out of scope for inventory extraction.
        CallModifier::Only => (TestStatus::Active, String::new()),
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
            path: "user.test.ts",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        extract_js_dsl(&ctx, Language::TypeScript, "jest").unwrap()
    }

    #[test]
    fn describe_with_two_tests_in_source_order() {
        let file = run(
            b"import { describe, it } from '@jest/globals';\n\
              describe('UserService', () => {\n\
                it('should create user', () => {});\n\
                it('should delete user', () => {});\n\
              });",
        );
        assert_eq!(file.suites.len(), 1);
        let suite = &file.suites[0];
        assert_eq!(suite.name, "UserService");
        assert_eq!(suite.tests.len(), 2);
        assert_eq!(suite.tests[0].name, "should create user");
        assert_eq!(suite.tests[1].name, "should delete user");
        assert!(suite.tests.iter().all(|t| t.status.is_active()));
    }

    #[test]
    fn skipped_describe_propagates_to_children() {
        let file = run(
            b"describe.skip('Flaky', () => {\n\
                it('a', () => {});\n\
              });",
        );
        let suite = &file.suites[0];
        assert_eq!(suite.status, TestStatus::Skipped);
        assert_eq!(suite.tests[0].status, TestStatus::Skipped);
    }

    #[test]
    fn xit_is_skipped_with_modifier() {
        let file = run(b"describe('s', () => { xit('b', () => {}); });");
        assert_eq!(file.suites[0].tests[0].status, TestStatus::Skipped);
        assert_eq!(file.suites[0].tests[0].modifier, "skip");
    }
}
