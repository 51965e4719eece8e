//! Attribute navigation for `#[test]`/`#[ignore]`/`#[should_panic]`.
//!
//! Rust's grammar attaches attributes as preceding siblings of the item they
//! decorate, not as children of it — so finding a function's attributes means
//! walking backward over `attribute_item` siblings until a non-attribute node.

use tree_sitter::Node;

use super::node_text;

/// Attribute bodies (text inside `#[...]`, without the brackets) immediately
/// preceding `item`, in source order.
pub fn attributes_preceding<'a>(item: &Node<'a>, source: &'a [u8]) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = item.prev_sibling();
    while let Some(node) = cursor {
        if node.kind() != "attribute_item" {
            break;
        }
        out.push(attribute_body(&node, source));
        cursor = node.prev_sibling();
    }
    out.reverse();
    out
}

fn attribute_body(attribute_item: &Node, source: &[u8]) -> String {
    let text = node_text(attribute_item, source).trim();
    text.trim_start_matches('#')
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .to_string()
}

pub fn has_attribute_named(attributes: &[String], name: &str) -> bool {
    attributes.iter().any(|a| a == name || a.starts_with(&format!("{name}(")))
}

pub fn function_name(function_item: &Node, source: &[u8]) -> Option<String> {
    super::find_child_text(function_item, "name", source)
}
