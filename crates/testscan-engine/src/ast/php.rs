//! `TestCase` subclass, docblock, and PHP 8 attribute recognition for PHPUnit.

use tree_sitter::Node;

use super::{children_of_kind, find_child_node, node_text};

pub fn class_name(class_decl: &Node, source: &[u8]) -> Option<String> {
    super::find_child_text(class_decl, "name", source)
}

/// The simple name of the class this declaration extends, if any.
pub fn base_class_name(class_decl: &Node, source: &[u8]) -> Option<String> {
    let clause = find_child_node(class_decl, "base_clause")?;
    for i in 0..clause.child_count() {
        if let Some(child) = clause.child(i) {
            if child.kind() == "name" || child.kind() == "qualified_name" {
                let text = node_text(&child, source);
                return Some(text.rsplit('\\').next().unwrap_or(text).to_string());
            }
        }
    }
    None
}

pub fn method_name(method_decl: &Node, source: &[u8]) -> Option<String> {
    super::find_child_text(method_decl, "name", source)
}

/// Attribute names (PHP 8's `#[Test]`) attached as preceding `attribute_list`
/// siblings, analogous to Rust's outer attributes.
pub fn attributes_preceding(method_decl: &Node, source: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = method_decl.prev_sibling();
    while let Some(node) = cursor {
        if node.kind() != "attribute_list" {
            break;
        }
        for group in children_of_kind(&node, "attribute_group") {
            for attr in children_of_kind(&group, "attribute") {
                if let Some(name) = find_child_node(&attr, "name") {
                    out.push(node_text(&name, source).to_string());
                }
            }
        }
        cursor = node.prev_sibling();
    }
    out
}

/// True when the doc comment immediately preceding `method_decl` contains an
/// `@test` tag.
pub fn doc_comment_has_test_tag(method_decl: &Node, source: &[u8]) -> bool {
    let mut cursor = method_decl.prev_sibling();
    while let Some(node) = cursor {
        if node.kind() == "comment" {
            let text = node_text(&node, source);
            if text.starts_with("/**") {
                return text.contains("@test");
            }
            cursor = node.prev_sibling();
            continue;
        }
        break;
    }
    false
}
