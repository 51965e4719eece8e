//! XCTest: classes extending `XCTestCase`, methods whose name starts with
//! `test`. No skip marker — every discovered test is active.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestSuite};

use crate::ast::swift;
use crate::ast::{children_of_kind, find_child_node, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::ContentMatcher;

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct XcTestExtractor;

impl Extractor for XcTestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Swift)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Swift, "xctest");
        for class in children_of_kind(&root, "class_declaration") {
            if let Some(suite) = build_suite(&class, ctx) {
                file.suites.push(suite);
            }
        }
        file.prune_empty_suites();
        Ok(file)
    }
}

fn build_suite(class: &tree_sitter::Node, ctx: &ExtractionContext) -> Option<TestSuite> {
    if !swift::inherits_xctestcase(class, ctx.bytes) {
        return None;
    }
    let name = swift::class_name(class, ctx.bytes)?;
    let loc = location_of(class, ctx.path);
    let mut suite = TestSuite::active(name, loc);

    if let Some(body) = find_child_node(class, "body") {
        for method in children_of_kind(&body, "function_declaration") {
            if let Some(method_name) = swift::function_name(&method, ctx.bytes) {
                if method_name.starts_with("test") {
                    suite.tests.push(Test::active(method_name, location_of(&method, ctx.path)));
                }
            }
        }
    }
    Some(suite)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "xctest",
        languages: &[Language::Swift],
        matchers: vec![Box::new(ContentMatcher::new(
            &[r"\bXCTestCase\b", r"import XCTest"],
            40,
            "XCTest base class",
        ))],
        config_parser: None,
        extractor: Box::new(XcTestExtractor),
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
            path: "UserTests.swift",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        XcTestExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn class_extending_xctestcase_groups_its_test_prefixed_methods() {
        let file = run(
            b"import XCTest\n\
              class UserTests: XCTestCase {\n\
                  func testCreatesUser() {}\n\
                  func helper() {}\n\
              }\n",
        );
        assert_eq!(file.suites[0].name, "UserTests");
        assert_eq!(file.suites[0].tests.len(), 1);
        assert_eq!(file.suites[0].tests[0].name, "testCreatesUser");
        assert!(file.suites[0].tests[0].status.is_active());
    }

    #[test]
    fn class_not_extending_xctestcase_is_ignored() {
        let file = run(
            b"class UserHelpers {\n\
                  func testCreatesUser() {}\n\
              }\n",
        );
        assert!(file.is_empty());
    }
}
