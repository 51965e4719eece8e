//! JUnit 5 (Jupiter): `@Test`/`@ParameterizedTest`/`@RepeatedTest`/`@TestFactory`/
//! `@TestTemplate` methods, plus any custom (often meta-)annotation whose name
//! ends in `Test` (e.g. a project-defined `@SmokeTest`); `@Nested` classes add
//! suite nesting; `@Disabled` skips a class or method; `@DisplayName` overrides
//! the emitted name.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::java_kotlin::{self, AnnotationRef};
use crate::ast::{children_of_kind, find_child_node, find_child_text, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

const TEST_ANNOTATIONS: &[&str] = &[
    "Test",
    "ParameterizedTest",
    "RepeatedTest",
    "TestFactory",
    "TestTemplate",
];

pub struct Junit5Extractor;

impl Extractor for Junit5Extractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let language = if ctx.path.ends_with(".kt") { Language::Kotlin } else { Language::Java };
        let (_handle, tree) = parse(ctx, language)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, language, "junit5");
        for class in children_of_kind(&root, "class_declaration") {
            if let Some(suite) = build_suite(&class, ctx, 0) {
                file.suites.push(suite);
            }
        }
        file.prune_empty_suites();
        Ok(file)
    }
}

fn build_suite(class: &tree_sitter::Node, ctx: &ExtractionContext, depth: u32) -> Option<TestSuite> {
    if ctx.cancellation.is_cancelled() {
        return None;
    }
    if depth >= ctx.max_nesting_depth {
        ctx.note_depth_exceeded();
        return None;
    }
    let annotations = java_kotlin::annotations_on(class, ctx.bytes);
    let class_name = find_child_text(class, "name", ctx.bytes)?;
    let name = display_name(&annotations, ctx.bytes).unwrap_or(class_name);
    let disabled = annotations.iter().any(|a| a.name == "Disabled");

    let loc = location_of(class, ctx.path);
    let mut suite = if disabled {
        TestSuite::non_active(name, TestStatus::Skipped, "@Disabled", loc)
    } else {
        TestSuite::active(name, loc)
    };

    let Some(body) = find_child_node(class, "class_body") else {
        return Some(suite);
    };

    for member in children_of_kind(&body, "method_declaration") {
        if let Some(test) = build_test(&member, ctx.bytes, ctx.path) {
            suite.tests.push(test);
        }
    }
    for nested in children_of_kind(&body, "class_declaration") {
        let nested_annotations = java_kotlin::annotations_on(&nested, ctx.bytes);
        if nested_annotations.iter().any(|a| a.name == "Nested") {
            if let Some(child_suite) = build_suite(&nested, ctx, depth + 1) {
                suite.suites.push(child_suite);
            }
        }
    }

    suite.prune_empty_descendants();
    suite.propagate_skip();
    Some(suite)
}

fn build_test(method: &tree_sitter::Node, source: &[u8], path: &str) -> Option<Test> {
    let annotations = java_kotlin::annotations_on(method, source);
    let is_test = annotations
        .iter()
        .any(|a| TEST_ANNOTATIONS.contains(&a.name.as_str()) || a.name.ends_with("Test"));
    if !is_test {
        return None;
    }
    let method_name = find_child_text(method, "name", source)?;
    let name = display_name(&annotations, source).unwrap_or(method_name);
    let loc = location_of(method, path);
    if annotations.iter().any(|a| a.name == "Disabled") {
        Some(Test::non_active(name, TestStatus::Skipped, "@Disabled", loc))
    } else {
        Some(Test::active(name, loc))
    }
}

fn display_name(annotations: &[AnnotationRef], source: &[u8]) -> Option<String> {
    let ann = annotations.iter().find(|a| a.name == "DisplayName")?;
    let args = java_kotlin::annotation_argument_text(ann, source)?;
    let decoded = crate::ast::strings::decode_string_literal(args.trim_matches(|c| c == '(' || c == ')'));
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "junit5",
        languages: &[Language::Java, Language::Kotlin],
        matchers: vec![
            Box::new(ImportMatcher::new(vec![
                "org.junit.jupiter.api.Test",
                "org.junit.jupiter.api",
            ])),
            Box::new(
                ContentMatcher::new(&[r"@Test\b", r"@ParameterizedTest\b", r"@Nested\b"], 40, "JUnit 5 annotations")
                    .with_exclusions(&[r"org\.junit\.Test\b"], 15),
            ),
        ],
        config_parser: None,
        extractor: Box::new(Junit5Extractor),
        priority: FrameworkPriority::Specific,
    }
}
