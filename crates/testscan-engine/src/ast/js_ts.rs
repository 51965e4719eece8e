//! Call-expression recognition shared by the Jest/Vitest/Mocha/Playwright/Cypress
//! family: `describe(...)`, `it.skip(...)`, `xit(...)`, `test.each([...])(...)`.

use tree_sitter::Node;

use super::{find_child_node, node_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallModifier {
    None,
    Skip,
    Only,
    Todo,
}

#[derive(Debug, Clone)]
pub struct DslCall<'a> {
    /// The base function name with any `x`/`f` skip-prefix stripped: `describe`,
    /// `it`, `test`, `context`, `specify`.
    pub base_name: String,
    pub modifier: CallModifier,
    pub arguments: Node<'a>,
    pub node: Node<'a>,
}

const SKIP_PREFIXES: &[(&str, &str)] = &[("xdescribe", "describe"), ("xit", "it"), ("xtest", "test")];
const ONLY_PREFIXES: &[(&str, &str)] = &[("fdescribe", "describe"), ("fit", "it")];

/// Recognizes a call expression as a DSL call if its callee resolves (directly or
/// through a `.skip`/`.only`/`.todo` member access) to one of `wanted` base names.
pub fn recognize_call<'a>(
    node: &Node<'a>,
    source: &'a [u8],
    wanted: &[&str],
) -> Option<DslCall<'a>> {
    if node.kind() != "call_expression" {
        return None;
    }
    let callee = find_child_node(node, "function")?;
    let arguments = find_child_node(node, "arguments")?;

    let (base_name, modifier) = match callee.kind() {
        "identifier" => {
            let text = node_text(&callee, source);
            if let Some((_, base)) = SKIP_PREFIXES.iter().find(|(p, _)| *p == text) {
                (base.to_string(), CallModifier::Skip)
            } else if let Some((_, base)) = ONLY_PREFIXES.iter().find(|(p, _)| *p == text) {
                (base.to_string(), CallModifier::Only)
            } else {
                (text.to_string(), CallModifier::None)
            }
        }
        "member_expression" => {
            let object = find_child_node(&callee, "object")?;
            let property = find_child_node(&callee, "property")?;
            let base = node_text(&object, source).to_string();
            let prop = node_text(&property, source);
            let modifier = match prop {
                "skip" => CallModifier::Skip,
                "only" => CallModifier::Only,
                "todo" => CallModifier::Todo,
                _ => return None,
            };
            (base, modifier)
        }
        _ => return None,
    };

    if !wanted.contains(&base_name.as_str()) {
        return None;
    }

    Some(DslCall {
        base_name,
        modifier,
        arguments,
        node: *node,
    })
}

/// First string-literal argument's decoded text, if the first argument is a
/// string/template literal.
pub fn first_string_argument(arguments: &Node, source: &[u8]) -> Option<String> {
    for i in 0..arguments.child_count() {
        let child = arguments.child(i)?;
        match child.kind() {
            "string" => {
                let inner = find_child_node(&child, "string_fragment")
                    .map(|n| node_text(&n, source).to_string())
                    .unwrap_or_else(|| {
                        crate::ast::strings::decode_string_literal(node_text(&child, source))
                    });
                return Some(inner);
            }
            "template_string" => {
                return Some(crate::ast::strings::decode_string_literal(node_text(
                    &child, source,
                )))
            }
            "," | "(" | ")" => continue,
            _ => continue,
        }
    }
    None
}

/// The function-body argument (second argument: an arrow function or function
/// expression) of a DSL call, whose statements we recurse into for nested
/// `describe`/`it` calls.
pub fn body_argument<'a>(arguments: &Node<'a>) -> Option<Node<'a>> {
    for i in 0..arguments.child_count() {
        let child = arguments.child(i)?;
        if matches!(child.kind(), "arrow_function" | "function_expression" | "function") {
            return find_child_node(&child, "body");
        }
    }
    None
}
