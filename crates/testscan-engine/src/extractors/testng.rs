//! TestNG: `@Test` from the `org.testng` namespace, one suite per class, skipped
//! via an `enabled = false` annotation attribute rather than a separate marker
//! annotation.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::java_kotlin;
use crate::ast::{children_of_kind, find_child_node, find_child_text, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct TestNgExtractor;

impl Extractor for TestNgExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Java)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Java, "testng");
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
    let class_name = find_child_text(class, "name", ctx.bytes)?;
    let loc = location_of(class, ctx.path);
    let mut suite = TestSuite::active(class_name, loc);

    let Some(body) = find_child_node(class, "class_body") else {
        return Some(suite);
    };
    for method in children_of_kind(&body, "method_declaration") {
        let annotations = java_kotlin::annotations_on(&method, ctx.bytes);
        let Some(test_ann) = annotations.iter().find(|a| a.name == "Test") else { continue };
        let Some(name) = find_child_text(&method, "name", ctx.bytes) else { continue };
        let method_loc = location_of(&method, ctx.path);
        let disabled = java_kotlin::annotation_argument_text(test_ann, ctx.bytes)
            .map(|args| args.contains("enabled") && args.contains("false"))
            .unwrap_or(false);
        let test = if disabled {
            Test::non_active(name, TestStatus::Skipped, "enabled = false", method_loc)
        } else {
            Test::active(name, method_loc)
        };
        suite.tests.push(test);
    }
    Some(suite)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "testng",
        languages: &[Language::Java],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["org.testng.annotations.Test", "org.testng"])),
            Box::new(ContentMatcher::new(&[r"org\.testng", r"@Test\b"], 40, "TestNG annotations")),
        ],
        config_parser: None,
        extractor: Box::new(TestNgExtractor),
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
            path: "UserTest.java",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        TestNgExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn testng_test_annotation_is_discovered() {
        let file = run(
            b"import org.testng.annotations.Test;\n\
              public class UserTest {\n\
                @Test public void createsUser() {}\n\
              }\n",
        );
        assert_eq!(file.suites[0].tests[0].name, "createsUser");
        assert!(file.suites[0].tests[0].status.is_active());
    }

    #[test]
    fn enabled_false_attribute_marks_skipped() {
        let file = run(
            b"import org.testng.annotations.Test;\n\
              public class UserTest {\n\
                @Test(enabled = false) public void flakyTest() {}\n\
              }\n",
        );
        let test = &file.suites[0].tests[0];
        assert_eq!(test.status, TestStatus::Skipped);
        assert_eq!(test.modifier, "enabled = false");
    }
}
