//! Google Test macro recognition.
//!
//! `TEST(Suite, Name) { ... }` and its siblings aren't real C++ grammar
//! constructs — they're preprocessor macros that happen to look like a function
//! call followed by a brace block. tree-sitter-cpp parses them inconsistently
//! (sometimes `declaration`, sometimes `function_definition`, sometimes `ERROR`
//! when the macro name isn't recognized as a type). Rather than pattern-match on
//! an unstable node shape, we walk top-level nodes and recognize the macro call by
//! its leading identifier text, then locate the argument list and trailing body
//! directly.

use tree_sitter::Node;

use super::{children_of_kind, node_text};

pub const GTEST_MACROS: &[&str] = &[
    "TEST", "TEST_F", "TEST_P", "TYPED_TEST", "TYPED_TEST_P",
];

#[derive(Debug, Clone)]
pub struct GTestInvocation<'a> {
    pub macro_name: &'static str,
    pub args: Vec<String>,
    pub body: Option<Node<'a>>,
    pub node: Node<'a>,
}

/// Scans direct children of the translation unit for Google Test macro
/// invocations, in source order.
pub fn find_gtest_invocations<'a>(root: &Node<'a>, source: &'a [u8]) -> Vec<GTestInvocation<'a>> {
    let mut out = Vec::new();
    scan(root, source, &mut out);
    out
}

fn scan<'a>(node: &Node<'a>, source: &'a [u8], out: &mut Vec<GTestInvocation<'a>>) {
    let text = node_text(node, source);
    if let Some(found) = match_macro_prefix(text) {
        if let Some(args) = extract_parenthesized_args(text) {
            out.push(GTestInvocation {
                macro_name: found,
                args,
                body: find_compound_statement(node),
                node: *node,
            });
            return;
        }
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            scan(&child, source, out);
        }
    }
}

fn match_macro_prefix(text: &str) -> Option<&'static str> {
    let trimmed = text.trim_start();
    for &name in GTEST_MACROS {
        if trimmed.starts_with(name) {
            let rest = &trimmed[name.len()..];
            if rest.trim_start().starts_with('(') {
                return Some(name);
            }
        }
    }
    None
}

/// Parses `NAME(arg1, arg2, ...)` from the front of `text`, splitting on
/// top-level commas (bracket/paren-depth aware so `std::is_same<int, int>` in an
/// argument doesn't split early).
fn extract_parenthesized_args(text: &str) -> Option<Vec<String>> {
    let open = text.find('(')?;
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut close = None;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;
    let inner = &text[open + 1..close];
    let mut args = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '(' | '<' => depth += 1,
            ')' | '>' => depth -= 1,
            ',' if depth == 0 => {
                args.push(inner[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        args.push(last.to_string());
    }
    Some(args)
}

fn find_compound_statement<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    children_of_kind(node, "compound_statement").into_iter().next()
}
