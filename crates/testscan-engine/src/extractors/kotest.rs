//! Kotest: no annotation marks an individual test — a class extending one of the
//! Spec base types (`StringSpec`, `FunSpec`, `DescribeSpec`, `ShouldSpec`,
//! `WordSpec`, `BehaviorSpec`, `FeatureSpec`, `AnnotationSpec`) is the suite, and
//! each spec style has its own builder shape for declaring a test (`"name" { }`
//! for `StringSpec`, `test("name") { }` for `FunSpec`, and so on). Like the Google
//! Test macros (see `ast::cpp`), these builders aren't a single stable grammar
//! node — they're ordinary Kotlin call/operator-invoke expressions that vary by
//! spec style — so we locate the class via the AST and then regex-scan its body
//! text for the builder shapes, the same pragmatic trade-off the C++ extractor
//! makes for `TEST(...)`.

use regex::Regex;
use std::sync::OnceLock;

use testscan_core::{FrameworkPriority, Language, Location, Test, TestFile, TestStatus, TestSuite};

use crate::ast::java_kotlin;
use crate::ast::{children_of_kind, find_child_node, find_child_text, location_of, node_text};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

const SPEC_BASES: &[&str] = &[
    "StringSpec",
    "FunSpec",
    "DescribeSpec",
    "ShouldSpec",
    "WordSpec",
    "BehaviorSpec",
    "FeatureSpec",
    "AnnotationSpec",
];

const BUILDER_NAMES: &[&str] = &[
    "test", "should", "context", "describe", "given", "when", "then", "feature", "scenario",
];

pub struct KotestExtractor;

impl Extractor for KotestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Kotlin)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Kotlin, "kotest");
        for class in children_of_kind(&root, "class_declaration") {
            if let Some(suite) = build_suite(&class, ctx) {
                file.suites.push(suite);
            }
        }
        file.prune_empty_suites();
        Ok(file)
    }
}

fn build_suite(class: &tree_sitter::Node, ctx: &ExtractionContext) -> Option<TestSuite> {
    let header_text = class_header(class, ctx.bytes);
    if !SPEC_BASES.iter().any(|base| header_text.contains(base)) {
        return None;
    }
    let class_name = find_child_text(class, "name", ctx.bytes)?;
    let annotations = java_kotlin::annotations_on(class, ctx.bytes);
    let class_disabled = annotations.iter().any(|a| a.name == "Disabled" || a.name == "Ignore");
    let name_disabled = class_name.starts_with('!');
    let display_name = class_name.trim_start_matches('!').to_string();

    let loc = location_of(class, ctx.path);
    let mut suite = if class_disabled || name_disabled {
        let modifier = if name_disabled { "!" } else { "@Disabled" };
        TestSuite::non_active(display_name, TestStatus::Skipped, modifier, loc)
    } else {
        TestSuite::active(display_name, loc)
    };

    if let Some(body) = find_child_node(class, "class_body") {
        let body_text = node_text(&body, ctx.bytes);
        let body_row = body.start_position().row as u32;
        for found in find_builder_tests(body_text) {
            let (line, col) = offset_to_line_col(body_text, found.byte_offset, body_row);
            let loc = Location::point(ctx.path, line, col);
            let test = if found.skipped {
                Test::non_active(found.name, TestStatus::Skipped, found.modifier, loc)
            } else {
                Test::active(found.name, loc)
            };
            suite.tests.push(test);
        }
    }

    suite.propagate_skip();
    Some(suite)
}

fn class_header<'a>(class: &tree_sitter::Node, source: &'a [u8]) -> &'a str {
    let full = node_text(class, source);
    match find_child_node(class, "class_body") {
        Some(body) => {
            let end = (body.start_byte() - class.start_byte()).min(full.len());
            &full[..end]
        }
        None => full,
    }
}

struct BuilderTest {
    name: String,
    modifier: String,
    skipped: bool,
    byte_offset: usize,
}

fn builder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = BUILDER_NAMES.join("|");
        Regex::new(&format!(
            r#"(?P<skip>x)?\b(?P<fn>{names})\s*\(\s*"(?P<name>(?:[^"\\]|\\.)*)"\s*\)\s*\{{"#
        ))
        .expect("valid kotest builder regex")
    })
}

fn string_spec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""(?P<name>(?:[^"\\]|\\.)*)"\s*\{"#).expect("valid kotest string-spec regex"))
}

fn find_builder_tests(body_text: &str) -> Vec<BuilderTest> {
    let mut out = Vec::new();
    let mut covered = Vec::new();

    for caps in builder_regex().captures_iter(body_text) {
        let whole = caps.get(0).unwrap();
        covered.push(whole.range());
        let raw_name = &caps["name"];
        let skipped_prefix = caps.name("skip").is_some();
        let (name, bang_skipped) = strip_bang(raw_name);
        out.push(BuilderTest {
            name,
            modifier: if skipped_prefix {
                format!("x{}", &caps["fn"])
            } else if bang_skipped {
                "!".to_string()
            } else {
                String::new()
            },
            skipped: skipped_prefix || bang_skipped,
            byte_offset: whole.start(),
        });
    }

    for caps in string_spec_regex().captures_iter(body_text) {
        let whole = caps.get(0).unwrap();
        if covered.iter().any(|r| r.start <= whole.start() && whole.start() < r.end) {
            continue;
        }
        let raw_name = &caps["name"];
        let (name, bang_skipped) = strip_bang(raw_name);
        out.push(BuilderTest {
            name,
            modifier: if bang_skipped { "!".to_string() } else { String::new() },
            skipped: bang_skipped,
            byte_offset: whole.start(),
        });
    }

    out.sort_by_key(|t| t.byte_offset);
    out
}

fn strip_bang(raw: &str) -> (String, bool) {
    if let Some(stripped) = raw.strip_prefix('!') {
        (stripped.to_string(), true)
    } else {
        (raw.to_string(), false)
    }
}

fn offset_to_line_col(text: &str, offset: usize, base_row: u32) -> (u32, u32) {
    let prefix = &text[..offset.min(text.len())];
    let newlines = prefix.bytes().filter(|&b| b == b'\n').count() as u32;
    let col = match prefix.rfind('\n') {
        Some(idx) => (prefix.len() - idx - 1) as u32,
        None => prefix.len() as u32,
    };
    (base_row + newlines + 1, col)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "kotest",
        languages: &[Language::Kotlin],
        matchers: vec![
            Box::new(ImportMatcher::new(vec!["io.kotest"])),
            Box::new(ContentMatcher::new(
                &[r"StringSpec\(\)", r"FunSpec\(\)", r"DescribeSpec\(\)", r"ShouldSpec\(\)"],
                40,
                "Kotest spec base class",
            )),
        ],
        config_parser: None,
        extractor: Box::new(KotestExtractor),
        priority: FrameworkPriority::Generic,
    }
}
