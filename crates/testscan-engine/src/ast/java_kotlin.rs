//! Shared annotation navigation for the JVM family (Java, Kotlin, and — via the
//! C# attribute helper's sibling shape — indirectly informs §4.G.1's annotation
//! table). Java and Kotlin both expose annotations as `marker_annotation` (no
//! arguments) or `annotation` (with an `arguments`/`value_arguments` node).

use tree_sitter::Node;

use super::{children_of_kind, find_child_node, node_text};

#[derive(Debug, Clone)]
pub struct AnnotationRef<'a> {
    pub name: String,
    pub node: Node<'a>,
}

/// Collects every annotation attached to a node's modifier list, matching both
/// bare `@Disabled` and argument-carrying `@Test(timeout = 5)` shapes.
pub fn annotations_on<'a>(node: &Node<'a>, source: &'a [u8]) -> Vec<AnnotationRef<'a>> {
    let mut out = Vec::new();
    collect_annotations(node, source, &mut out);
    out
}

fn collect_annotations<'a>(node: &Node<'a>, source: &'a [u8], out: &mut Vec<AnnotationRef<'a>>) {
    for kind in ["marker_annotation", "annotation"] {
        for ann in children_of_kind(node, kind) {
            let name = find_child_node(&ann, "name")
                .map(|n| node_text(&n, source).to_string())
                .unwrap_or_else(|| node_text(&ann, source).trim_start_matches('@').to_string());
            out.push(AnnotationRef { name, node: ann });
        }
    }
    if let Some(modifiers) = find_child_node(node, "modifiers") {
        collect_annotations(&modifiers, source, out);
    }
}

pub fn has_annotation(node: &Node, source: &[u8], name: &str) -> bool {
    annotations_on(node, source).iter().any(|a| a.name == name)
}

pub fn annotation_argument_text<'a>(ann: &AnnotationRef<'a>, source: &'a [u8]) -> Option<String> {
    for kind in ["annotation_argument_list", "value_arguments"] {
        if let Some(args) = find_child_node(&ann.node, kind) {
            return Some(node_text(&args, source).to_string());
        }
    }
    None
}

/// Simple name of the superclass/extended type, if any (`extends Foo` in a Java
/// class, or `: Foo()` in a Kotlin class).
pub fn superclass_name<'a>(class_node: &Node, source: &'a [u8]) -> Option<String> {
    if let Some(superclass) = find_child_node(class_node, "superclass") {
        return Some(node_text(&superclass, source).trim_start_matches("extends").trim().to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::ScanCancellation;
    use crate::parser_pool::ParserPool;
    use testscan_core::Language;

    fn first_method(tree: &tree_sitter::Tree) -> tree_sitter::Node<'_> {
        let class = children_of_kind(&tree.root_node(), "class_declaration").remove(0);
        let body = find_child_node(&class, "class_body").unwrap();
        children_of_kind(&body, "method_declaration").remove(0)
    }

    fn first_class(tree: &tree_sitter::Tree) -> tree_sitter::Node<'_> {
        children_of_kind(&tree.root_node(), "class_declaration").remove(0)
    }

    #[test]
    fn bare_and_argument_carrying_annotations_are_both_collected() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Java, &cancellation).unwrap();
        let src = b"class T { @Test @Timeout(5) void m() {} }";
        let tree = handle.parse(src).unwrap();
        let method = first_method(&tree);
        let names: Vec<&str> = annotations_on(&method, src).iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Test", "Timeout"]);
    }

    #[test]
    fn has_annotation_checks_by_name() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Java, &cancellation).unwrap();
        let src = b"class T { @Test void m() {} }";
        let tree = handle.parse(src).unwrap();
        let method = first_method(&tree);
        assert!(has_annotation(&method, src, "Test"));
        assert!(!has_annotation(&method, src, "Disabled"));
    }

    #[test]
    fn annotation_argument_text_reads_the_parenthesized_args() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Java, &cancellation).unwrap();
        let src = b"class T { @Test(enabled = false) void m() {} }";
        let tree = handle.parse(src).unwrap();
        let method = first_method(&tree);
        let test_ann = annotations_on(&method, src).into_iter().find(|a| a.name == "Test").unwrap();
        let args = annotation_argument_text(&test_ann, src).unwrap();
        assert!(args.contains("enabled"));
        assert!(args.contains("false"));
    }

    #[test]
    fn superclass_name_strips_the_extends_keyword() {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let mut handle = pool.acquire(Language::Java, &cancellation).unwrap();
        let src = b"class T extends TestCase { }";
        let tree = handle.parse(src).unwrap();
        let class = first_class(&tree);
        assert_eq!(superclass_name(&class, src).as_deref(), Some("TestCase"));
    }
}
