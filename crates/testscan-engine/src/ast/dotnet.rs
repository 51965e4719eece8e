//! Attribute navigation for C# (xUnit, MSTest, NUnit).

use tree_sitter::Node;

use super::{children_of_kind, find_child_node, node_text};

#[derive(Debug, Clone)]
pub struct AttributeRef<'a> {
    pub name: String,
    pub node: Node<'a>,
}

/// Every attribute attached to a method or class declaration. C# groups attributes
/// under an `attribute_list` containing one or more `attribute` nodes, and a single
/// declaration can carry several `attribute_list`s (`[Fact] [Trait(...)]`).
pub fn attributes_on<'a>(node: &Node<'a>, source: &'a [u8]) -> Vec<AttributeRef<'a>> {
    let mut out = Vec::new();
    for list in children_of_kind(node, "attribute_list") {
        for attr in children_of_kind(&list, "attribute") {
            let name = find_child_node(&attr, "name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_else(|| node_text(&attr, source).to_string());
            out.push(AttributeRef { name, node: attr });
        }
    }
    out
}

pub fn find_attribute<'a>(node: &Node<'a>, source: &'a [u8], name: &str) -> Option<AttributeRef<'a>> {
    attributes_on(node, source).into_iter().find(|a| a.name == name)
}

/// Text of an attribute's argument list, e.g. `Skip = "flaky"` inside `[Fact(Skip = "flaky")]`.
pub fn attribute_argument_text<'a>(attr: &AttributeRef<'a>, source: &'a [u8]) -> Option<String> {
    find_child_node(&attr.node, "attribute_argument_list").map(|n| node_text(&n, source).to_string())
}
