//! AST Helpers (§4.C): per-language-family navigation over a tree-sitter tree.
//!
//! Helpers never mutate nodes — they only read. Each family module exposes the
//! constructs its extractors actually recognize (annotations, macro arguments,
//! DSL call shapes); the generic utilities here are shared by all of them.

pub mod cpp;
pub mod dotnet;
pub mod go_lang;
pub mod java_kotlin;
pub mod js_ts;
pub mod php;
pub mod python;
pub mod ruby;
pub mod rust_lang;
pub mod strings;
pub mod swift;

use tree_sitter::Node;

/// Text of a named field, falling back to a same-named child kind when the grammar
/// doesn't expose the field (some grammars only name a subset of children).
pub fn find_child_text<'a>(node: &Node<'a>, field: &str, source: &'a [u8]) -> Option<String> {
    find_child_node(node, field)
        .and_then(|n| n.utf8_text(source).ok())
        .map(|s| s.to_string())
}

pub fn find_child_node<'a>(node: &Node<'a>, field: &str) -> Option<Node<'a>> {
    node.child_by_field_name(field).or_else(|| {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if child.kind() == field {
                    return Some(child);
                }
            }
        }
        None
    })
}

pub fn has_child_kind(node: &Node, kind: &str) -> bool {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                return true;
            }
        }
    }
    false
}

/// All direct children matching a kind, in source order.
pub fn children_of_kind<'a>(node: &Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut out = Vec::new();
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                out.push(child);
            }
        }
    }
    out
}

/// Raw UTF-8 text of a node, or an empty string if the bytes aren't valid UTF-8.
pub fn node_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Depth-first search for the first descendant whose `kind()` is in `kinds`, bounded
/// by `max_depth` — every extractor that searches inside a test body (e.g. Minitest's
/// `skip` call, RSpec's `pending`) must use a bound per §4.G invariant on nesting.
pub fn find_descendant_of_kinds<'a>(
    node: &Node<'a>,
    kinds: &[&str],
    max_depth: u32,
) -> Option<Node<'a>> {
    if max_depth == 0 {
        return None;
    }
    for i in 0..node.child_count() {
        let child = node.child(i)?;
        if kinds.contains(&child.kind()) {
            return Some(child);
        }
        if let Some(found) = find_descendant_of_kinds(&child, kinds, max_depth - 1) {
            return Some(found);
        }
    }
    None
}

/// Substitutes embedded NUL bytes with spaces before parsing. Some grammars (Kotlin
/// in particular) misbehave on raw NULs in fuzzer-style input; every AST helper that
/// hands bytes to a parser should route them through this first.
pub fn sanitize_for_parsing(bytes: &[u8]) -> std::borrow::Cow<'_, [u8]> {
    if bytes.contains(&0) {
        std::borrow::Cow::Owned(bytes.iter().map(|&b| if b == 0 { b' ' } else { b }).collect())
    } else {
        std::borrow::Cow::Borrowed(bytes)
    }
}

pub fn location_of(node: &Node, file_path: &str) -> testscan_core::Location {
    let start = node.start_position();
    let end = node.end_position();
    testscan_core::Location::new(
        file_path,
        start.row as u32 + 1,
        start.column as u32,
        end.row as u32 + 1,
        end.column as u32,
    )
}
