//! Decorator and class-base navigation for Pytest/unittest.

use tree_sitter::Node;

use super::{children_of_kind, find_child_node, node_text};

/// Decorator nodes attached to a `decorated_definition`, in source order.
pub fn decorators_on<'a>(decorated: &Node<'a>) -> Vec<Node<'a>> {
    children_of_kind(decorated, "decorator")
}

/// The dotted call/attribute name of a decorator: `@pytest.mark.skip(...)` →
/// `"pytest.mark.skip"`, `@unittest.skip("reason")` → `"unittest.skip"`.
pub fn decorator_full_name(decorator: &Node, source: &[u8]) -> String {
    // decorator's single child after '@' is either identifier, attribute, or call
    for i in 0..decorator.child_count() {
        if let Some(child) = decorator.child(i) {
            match child.kind() {
                "call" => {
                    if let Some(func) = find_child_node(&child, "function") {
                        return node_text(&func, source).to_string();
                    }
                }
                "attribute" | "identifier" => return node_text(&child, source).to_string(),
                _ => continue,
            }
        }
    }
    String::new()
}

/// The function/class name of a `function_definition`/`class_definition`, which may
/// be wrapped in a `decorated_definition`.
pub fn definition_name(node: &Node, source: &[u8]) -> Option<String> {
    let def = if node.kind() == "decorated_definition" {
        find_child_node(node, "definition")?
    } else {
        *node
    };
    find_child_node(&def, "name").map(|n| node_text(&n, source).to_string())
}

/// Base-class names of a `class_definition` (including through a wrapping
/// `decorated_definition`), as written in the `superclasses` argument list.
pub fn base_class_names(node: &Node, source: &[u8]) -> Vec<String> {
    let def = if node.kind() == "decorated_definition" {
        match find_child_node(node, "definition") {
            Some(d) => d,
            None => return Vec::new(),
        }
    } else {
        *node
    };
    let Some(bases) = find_child_node(&def, "superclasses") else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for i in 0..bases.child_count() {
        if let Some(child) = bases.child(i) {
            if matches!(child.kind(), "identifier" | "attribute") {
                out.push(node_text(&child, source).to_string());
            }
        }
    }
    out
}

/// Unwraps a `decorated_definition` to its inner definition node, or returns the
/// node itself if it isn't decorated.
pub fn inner_definition<'a>(node: &Node<'a>) -> Node<'a> {
    if node.kind() == "decorated_definition" {
        find_child_node(node, "definition").unwrap_or(*node)
    } else {
        *node
    }
}
