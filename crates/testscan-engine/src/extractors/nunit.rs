//! NUnit: `[Test]`/`[TestCase]` methods, `[TestFixture]` is optional on the class
//! (same leniency as xUnit/MSTest). Nested classes are included as nested suites.
//! `[Ignore]` skips a class or method.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::dotnet;
use crate::ast::{children_of_kind, find_child_node, find_child_text, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct NunitExtractor;

impl Extractor for NunitExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::CSharp)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::CSharp, "nunit");
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
    let class_name = find_child_text(class, "name", ctx.bytes)?;
    let class_attrs = dotnet::attributes_on(class, ctx.bytes);
    let class_ignored = class_attrs.iter().any(|a| a.name == "Ignore");
    let loc = location_of(class, ctx.path);
    let mut suite = if class_ignored {
        TestSuite::non_active(class_name, TestStatus::Skipped, "[Ignore]", loc)
    } else {
        TestSuite::active(class_name, loc)
    };

    let Some(body) = find_child_node(class, "declaration_list") else {
        return Some(suite);
    };
    for method in children_of_kind(&body, "method_declaration") {
        let attrs = dotnet::attributes_on(&method, ctx.bytes);
        if !attrs.iter().any(|a| a.name == "Test" || a.name == "TestCase") {
            continue;
        }
        let Some(name) = find_child_text(&method, "name", ctx.bytes) else { continue };
        let method_loc = location_of(&method, ctx.path);
        let test = if attrs.iter().any(|a| a.name == "Ignore") {
            Test::non_active(name, TestStatus::Skipped, "[Ignore]", method_loc)
        } else {
            Test::active(name, method_loc)
        };
        suite.tests.push(test);
    }
    if depth < ctx.max_nesting_depth {
        for nested in children_of_kind(&body, "class_declaration") {
            if let Some(nested_suite) = build_suite(&nested, ctx, depth + 1) {
                suite.suites.push(nested_suite);
            }
        }
    } else if !children_of_kind(&body, "class_declaration").is_empty() {
        ctx.note_depth_exceeded();
    }
    suite.propagate_skip();
    Some(suite)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "nunit",
        languages: &[Language::CSharp],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["NUnit.Framework"])),
            Box::new(ContentMatcher::new(&[r"\[Test\]", r"\[TestFixture\]"], 40, "NUnit attributes")),
        ],
        config_parser: None,
        extractor: Box::new(NunitExtractor),
        priority: FrameworkPriority::Generic,
    }
}
