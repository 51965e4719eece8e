//! xUnit.net: `[Fact]`/`[Theory]` methods, one suite per class (including classes
//! with no attribute of their own — xUnit needs no `[TestClass]`/`[TestFixture]`
//! marker). Nested classes are auto-included by the xUnit runner, so a class
//! declared inside another becomes a nested suite rather than being dropped.
//! `Skip = "..."` on the attribute skips a single test.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestStatus, TestSuite};

use crate::ast::dotnet;
use crate::ast::{children_of_kind, find_child_node, find_child_text, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct XunitExtractor;

impl Extractor for XunitExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::CSharp)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::CSharp, "xunit");
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
    let loc = location_of(class, ctx.path);
    let mut suite = TestSuite::active(class_name, loc);

    let Some(body) = find_child_node(class, "declaration_list") else {
        return Some(suite);
    };
    for method in children_of_kind(&body, "method_declaration") {
        let attrs = dotnet::attributes_on(&method, ctx.bytes);
        let Some(marker) = attrs.iter().find(|a| a.name == "Fact" || a.name == "Theory") else { continue };
        let Some(name) = find_child_text(&method, "name", ctx.bytes) else { continue };
        let method_loc = location_of(&method, ctx.path);
        let skip_reason = dotnet::attribute_argument_text(marker, ctx.bytes).filter(|args| args.contains("Skip"));
        let test = if let Some(reason) = skip_reason {
            Test::non_active(name, TestStatus::Skipped, reason, method_loc)
        } else if attrs.iter().any(|a| a.name == "Skip") {
            Test::non_active(name, TestStatus::Skipped, "[Skip]", method_loc)
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
    Some(suite)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "xunit",
        languages: &[Language::CSharp],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["using Xunit", "Xunit.Abstractions"])),
            Box::new(ContentMatcher::new(&[r"\[Fact\]", r"\[Theory\]"], 40, "xUnit.net attributes")),
        ],
        config_parser: None,
        extractor: Box::new(XunitExtractor),
        priority: FrameworkPriority::Generic,
    }
}
