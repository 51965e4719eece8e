//! PHPUnit: classes extending `TestCase` only. A method is a test when its name
//! starts with `test`, or it carries an `@test` docblock tag, or a PHP 8
//! `#[Test]` attribute. Classes that don't extend `TestCase` are ignored
//! entirely — not even an empty suite is emitted for them.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestSuite};

use crate::ast::php;
use crate::ast::{children_of_kind, find_child_node, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

pub struct PhpUnitExtractor;

impl Extractor for PhpUnitExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Php)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Php, "phpunit");
        for class in all_classes(&root) {
            if let Some(suite) = build_suite(&class, ctx) {
                file.suites.push(suite);
            }
        }
        file.prune_empty_suites();
        Ok(file)
    }
}

fn all_classes<'a>(root: &tree_sitter::Node<'a>) -> Vec<tree_sitter::Node<'a>> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

fn collect<'a>(node: &tree_sitter::Node<'a>, out: &mut Vec<tree_sitter::Node<'a>>) {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "class_declaration" {
                out.push(child);
            }
            collect(&child, out);
        }
    }
}

fn build_suite(class: &tree_sitter::Node, ctx: &ExtractionContext) -> Option<TestSuite> {
    let base = php::base_class_name(class, ctx.bytes)?;
    if base != "TestCase" {
        return None;
    }
    let name = php::class_name(class, ctx.bytes)?;
    let loc = location_of(class, ctx.path);
    let mut suite = TestSuite::active(name, loc);

    let Some(body) = find_child_node(class, "declaration_list") else {
        return Some(suite);
    };
    for method in children_of_kind(&body, "method_declaration") {
        let Some(method_name) = php::method_name(&method, ctx.bytes) else { continue };
        let attrs = php::attributes_preceding(&method, ctx.bytes);
        let is_test = method_name.starts_with("test")
            || php::doc_comment_has_test_tag(&method, ctx.bytes)
            || attrs.iter().any(|a| a == "Test");
        if is_test {
            suite.tests.push(Test::active(method_name, location_of(&method, ctx.path)));
        }
    }
    Some(suite)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "phpunit",
        languages: &[Language::Php],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["PHPUnit\\Framework\\TestCase", "use PHPUnit"])),
            Box::new(ContentMatcher::new(
                &[r"extends TestCase\b", r"#\[Test\]", r"@test\b"],
                40,
                "PHPUnit TestCase",
            )),
        ],
        config_parser: None,
        extractor: Box::new(PhpUnitExtractor),
        priority: FrameworkPriority::Generic,
    }
}
