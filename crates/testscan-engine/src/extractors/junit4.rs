//! JUnit 4: `@Test` methods (the pre-Jupiter `org.junit.Test` import), one suite
//! per class, `@Ignore` skips.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::java_kotlin;
use crate::ast::{children_of_kind, find_child_node, find_child_text, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct Junit4Extractor;

impl Extractor for Junit4Extractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Java)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Java, "junit4");
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
        if !annotations.iter().any(|a| a.name == "Test") {
            continue;
        }
        let Some(name) = find_child_text(&method, "name", ctx.bytes) else { continue };
        let method_loc = location_of(&method, ctx.path);
        let test = if annotations.iter().any(|a| a.name == "Ignore") {
            Test::non_active(name, TestStatus::Skipped, "@Ignore", method_loc)
        } else {
            Test::active(name, method_loc)
        };
        suite.tests.push(test);
    }
    Some(suite)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "junit4",
        languages: &[Language::Java],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["org.junit.Test", "org.junit.Ignore"])),
            Box::new(
                ContentMatcher::new(&[r"@Test\b"], 40, "JUnit 4 @Test annotation")
                    .with_exclusions(&[r"org\.junit\.jupiter"], 40),
            ),
        ],
        config_parser: None,
        extractor: Box::new(Junit4Extractor),
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
            path: "CalculatorTest.java",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        Junit4Extractor.extract(&ctx).unwrap()
    }

    #[test]
    fn test_annotated_method_is_discovered() {
        let file = run(
            b"import org.junit.Test;\n\
              public class CalculatorTest {\n\
                @Test public void addsTwoNumbers() {}\n\
              }\n",
        );
        assert_eq!(file.suites.len(), 1);
        assert_eq!(file.suites[0].name, "CalculatorTest");
        assert_eq!(file.suites[0].tests[0].name, "addsTwoNumbers");
        assert!(file.suites[0].tests[0].status.is_active());
    }

    #[test]
    fn ignore_annotation_marks_skipped() {
        let file = run(
            b"import org.junit.Test;\n\
              import org.junit.Ignore;\n\
              public class CalculatorTest {\n\
                @Test @Ignore public void notReadyYet() {}\n\
              }\n",
        );
        let test = &file.suites[0].tests[0];
        assert_eq!(test.status, TestStatus::Skipped);
        assert_eq!(test.modifier, "@Ignore");
    }

    #[test]
    fn method_without_test_annotation_is_not_collected() {
        let file = run(
            b"public class CalculatorTest {\n\
                public void helper() {}\n\
              }\n",
        );
        assert!(file.is_empty());
    }
}
