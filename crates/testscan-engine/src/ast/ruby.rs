//! Call recognition for RSpec and Minitest's spec-style DSL. Ruby's grammar
//! represents both `describe "x" do ... end` and `RSpec.describe "x" do ... end` as
//! a `call` node; the receiver field is present only for the qualified form.

use tree_sitter::Node;

use super::{find_child_node, node_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RubyModifier {
    None,
    Skipped,
    Pending,
}

#[derive(Debug, Clone)]
pub struct RubyDslCall<'a> {
    pub method: String,
    pub modifier: RubyModifier,
    pub arguments: Option<Node<'a>>,
    pub block: Option<Node<'a>>,
    pub node: Node<'a>,
}

const SKIP_PREFIXED: &[(&str, &str)] = &[
    ("xdescribe", "describe"),
    ("xcontext", "context"),
    ("xit", "it"),
    ("xspecify", "specify"),
    ("xexample", "example"),
];

/// Recognizes `describe`/`context`/`it`/`specify`/`example` calls, with or without
/// an `RSpec.` receiver, normalizing `x`-prefixed skip variants to their base name.
pub fn recognize_call<'a>(node: &Node<'a>, source: &'a [u8], wanted: &[&str]) -> Option<RubyDslCall<'a>> {
    if node.kind() != "call" {
        return None;
    }
    let method_node = find_child_node(node, "method")?;
    let method_text = node_text(&method_node, source);

    if let Some(receiver) = find_child_node(node, "receiver") {
        if node_text(&receiver, source) != "RSpec" {
            return None;
        }
    }

    let (method, modifier) = if let Some((_, base)) = SKIP_PREFIXED.iter().find(|(p, _)| *p == method_text) {
        (base.to_string(), RubyModifier::Skipped)
    } else {
        (method_text.to_string(), RubyModifier::None)
    };

    if !wanted.contains(&method.as_str()) {
        return None;
    }

    Some(RubyDslCall {
        method,
        modifier,
        arguments: find_child_node(node, "arguments"),
        block: find_child_node(node, "block").or_else(|| find_child_node(node, "do_block")),
        node: *node,
    })
}

/// First string/symbol argument of a call, decoded.
pub fn first_string_argument(node: &Node, source: &[u8]) -> Option<String> {
    let args = find_child_node(node, "arguments")?;
    for i in 0..args.child_count() {
        let child = args.child(i)?;
        match child.kind() {
            "string" => return Some(super::strings::decode_string_literal(node_text(&child, source))),
            "simple_symbol" => return Some(super::strings::decode_symbol(node_text(&child, source))),
            _ => continue,
        }
    }
    None
}

/// True if a `pending` or `skip` bare call appears anywhere within the given body,
/// up to `max_depth` — used by RSpec (`pending`) and Minitest (`skip`).
pub fn body_calls_bare_method(body: &Node, source: &[u8], name: &str, max_depth: u32) -> bool {
    if max_depth == 0 {
        return false;
    }
    if body.kind() == "call" || body.kind() == "identifier" {
        let text = if body.kind() == "call" {
            find_child_node(body, "method").map(|n| node_text(&n, source).to_string())
        } else {
            Some(node_text(body, source).to_string())
        };
        if text.as_deref() == Some(name) {
            return true;
        }
    }
    for i in 0..body.child_count() {
        if let Some(child) = body.child(i) {
            if body_calls_bare_method(&child, source, name, max_depth - 1) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::ScanCancellation;
    use crate::parser_pool::ParserPool;
    use testscan_core::Language;

    fn first_call(tree: &tree_sitter::Tree) -> tree_sitter::Node<'_> {
        tree.root_node().child(0).unwrap()
    }

    #[test]
    fn bare_describe_call_has_no_modifier() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Ruby, &cancellation).unwrap();
        let src = b"describe 'User' do\nend\n";
        let tree = handle.parse(src).unwrap();
        let call = first_call(&tree);
        let dsl = recognize_call(&call, src, &["describe", "context"]).unwrap();
        assert_eq!(dsl.method, "describe");
        assert_eq!(dsl.modifier, RubyModifier::None);
    }

    #[test]
    fn rspec_qualified_receiver_is_recognized() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Ruby, &cancellation).unwrap();
        let src = b"RSpec.describe 'User' do\nend\n";
        let tree = handle.parse(src).unwrap();
        let call = first_call(&tree);
        let dsl = recognize_call(&call, src, &["describe"]).unwrap();
        assert_eq!(dsl.method, "describe");
    }

    #[test]
    fn other_receiver_is_rejected() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Ruby, &cancellation).unwrap();
        let src = b"Minitest.describe 'User' do\nend\n";
        let tree = handle.parse(src).unwrap();
        let call = first_call(&tree);
        assert!(recognize_call(&call, src, &["describe"]).is_none());
    }

    #[test]
    fn x_prefixed_call_normalizes_to_base_name_with_skipped_modifier() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Ruby, &cancellation).unwrap();
        let src = b"xdescribe 'User' do\nend\n";
        let tree = handle.parse(src).unwrap();
        let call = first_call(&tree);
        let dsl = recognize_call(&call, src, &["describe"]).unwrap();
        assert_eq!(dsl.method, "describe");
        assert_eq!(dsl.modifier, RubyModifier::Skipped);
    }

    #[test]
    fn first_string_argument_decodes_a_single_quoted_literal() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Ruby, &cancellation).unwrap();
        let src = b"describe 'User' do\nend\n";
        let tree = handle.parse(src).unwrap();
        let call = first_call(&tree);
        assert_eq!(first_string_argument(&call, src).as_deref(), Some("User"));
    }

    #[test]
    fn body_calls_bare_method_finds_a_nested_bare_call() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Ruby, &cancellation).unwrap();
        let src = b"describe 'User' do\n  it 'is pending' do\n    pending\n  end\nend\n";
        let tree = handle.parse(src).unwrap();
        let outer = first_call(&tree);
        let block = find_child_node(&outer, "block").or_else(|| find_child_node(&outer, "do_block")).unwrap();
        assert!(body_calls_bare_method(&block, src, "pending", 20));
        assert!(!body_calls_bare_method(&block, src, "skip", 20));
    }
}
