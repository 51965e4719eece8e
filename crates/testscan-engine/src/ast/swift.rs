//! XCTestCase recognition for Swift. The grammar's inheritance-clause field names
//! vary across tree-sitter-swift releases, so rather than depend on an exact field
//! name we check the class header text (everything before the body's opening
//! brace) for the `XCTestCase` token — robust across grammar versions and cheap
//! since headers are short.

use tree_sitter::Node;

use super::{find_child_node, node_text};

pub fn class_name(class_decl: &Node, source: &[u8]) -> Option<String> {
    super::find_child_text(class_decl, "name", source)
}

pub fn inherits_xctestcase(class_decl: &Node, source: &[u8]) -> bool {
    let full = node_text(class_decl, source);
    let header = match find_child_node(class_decl, "body") {
        Some(body) => &full[..(body.start_byte() - class_decl.start_byte()).min(full.len())],
        None => full,
    };
    header.contains("XCTestCase")
}

pub fn function_name(function_decl: &Node, source: &[u8]) -> Option<String> {
    super::find_child_text(function_decl, "name", source)
}
