//! Top-level test function recognition and `t.Run(...)` subtest discovery for Go.

use tree_sitter::Node;

use super::{find_child_node, node_text};

pub fn function_name(function_decl: &Node, source: &[u8]) -> Option<String> {
    super::find_child_text(function_decl, "name", source)
}

/// The name of the function's first parameter (conventionally `t *testing.T`),
/// used to recognize `t.Run(...)` subtest calls against whatever identifier the
/// author actually chose.
pub fn first_parameter_name(function_decl: &Node, source: &[u8]) -> Option<String> {
    let params = find_child_node(function_decl, "parameters")?;
    for i in 0..params.child_count() {
        let child = params.child(i)?;
        if child.kind() == "parameter_declaration" {
            return super::find_child_text(&child, "name", source);
        }
    }
    None
}

#[derive(Debug, Clone)]
pub struct Subtest<'a> {
    pub name: String,
    pub node: Node<'a>,
}

/// Finds every `receiver.Run("name", func(...) {...})` call within `body`, bounded
/// to `max_depth`, in source order.
pub fn find_subtest_calls<'a>(
    body: &Node<'a>,
    source: &'a [u8],
    receiver: &str,
    max_depth: u32,
) -> Vec<Subtest<'a>> {
    let mut out = Vec::new();
    collect(body, source, receiver, max_depth, &mut out);
    out
}

fn collect<'a>(
    node: &Node<'a>,
    source: &'a [u8],
    receiver: &str,
    max_depth: u32,
    out: &mut Vec<Subtest<'a>>,
) {
    if max_depth == 0 {
        return;
    }
    if node.kind() == "call_expression" {
        if let Some(call) = parse_run_call(node, source, receiver) {
            out.push(call);
        }
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect(&child, source, receiver, max_depth - 1, out);
        }
    }
}

fn parse_run_call<'a>(node: &Node<'a>, source: &'a [u8], receiver: &str) -> Option<Subtest<'a>> {
    let func = find_child_node(node, "function")?;
    if func.kind() != "selector_expression" {
        return None;
    }
    let operand = find_child_node(&func, "operand")?;
    let field = find_child_node(&func, "field")?;
    if node_text(&operand, source) != receiver || node_text(&field, source) != "Run" {
        return None;
    }
    let args = find_child_node(node, "arguments")?;
    let first = args.named_child(0)?;
    if !matches!(first.kind(), "interpreted_string_literal" | "raw_string_literal") {
        return None;
    }
    let name = crate::ast::strings::decode_string_literal(node_text(&first, source));
    Some(Subtest { name, node: *node })
}
