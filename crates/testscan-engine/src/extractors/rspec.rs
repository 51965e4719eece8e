//! RSpec: `describe`/`context` suites (optionally `RSpec.`-qualified), `it`/
//! `specify`/`example` tests, `x`-prefixed skip variants, and `pending` (→
//! `xfail`) / `skip` (→ `skipped`) bare calls inside a block.

use testscan_core::{FrameworkPriority, Language, Location, Test, TestFile, TestStatus, TestSuite};

use crate::ast::ruby::{self, RubyModifier};
use crate::config_scope::RspecConfigParser;
use crate::registry::FrameworkDefinition;
use crate::signals::{ConfigFileMatcher, ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

const SUITE_NAMES: &[&str] = &["describe", "context"];
const TEST_NAMES: &[&str] = &["it", "specify", "example"];

pub struct RspecExtractor;

impl Extractor for RspecExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Ruby)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Ruby, "rspec");
        walk(&root, ctx, 0, &mut file.suites, &mut file.tests);
        file.prune_empty_suites();
        Ok(file)
    }
}

fn walk(
    node: &tree_sitter::Node,
    ctx: &ExtractionContext,
    depth: u32,
    suites_out: &mut Vec<TestSuite>,
    tests_out: &mut Vec<Test>,
) {
    if ctx.cancellation.is_cancelled() {
        return;
    }
    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };

        if let Some(call) = ruby::recognize_call(&child, ctx.bytes, SUITE_NAMES) {
            if depth >= ctx.max_nesting_depth {
                ctx.note_depth_exceeded();
                continue;
            }
            let loc = crate::ast::location_of(&child, ctx.path);
            let name = ruby::first_string_argument(&child, ctx.bytes).unwrap_or_else(|| "<anonymous>".to_string());
            let mut suite = match call.modifier {
                RubyModifier::Skipped => TestSuite::non_active(name, TestStatus::Skipped, "xdescribe", loc),
                _ => TestSuite::active(name, loc),
            };
            if let Some(block) = call.block {
                walk(&block, ctx, depth + 1, &mut suite.suites, &mut suite.tests);
            }
            suite.prune_empty_descendants();
            suite.propagate_skip();
            suites_out.push(suite);
            continue;
        }

        if let Some(call) = ruby::recognize_call(&child, ctx.bytes, TEST_NAMES) {
            let loc = crate::ast::location_of(&child, ctx.path);
            let name = ruby::first_string_argument(&child, ctx.bytes).unwrap_or_else(|| "<anonymous>".to_string());
            let test = build_test(name, loc, &call, ctx);
            tests_out.push(test);
            continue;
        }

        walk(&child, ctx, depth, suites_out, tests_out);
    }
}

fn build_test(name: String, loc: Location, call: &ruby::RubyDslCall<'_>, ctx: &ExtractionContext) -> Test {
    if call.modifier == RubyModifier::Skipped {
        return Test::non_active(name, TestStatus::Skipped, "xit", loc);
    }
    if let Some(block) = &call.block {
        if ruby::body_calls_bare_method(block, ctx.bytes, "pending", ctx.max_nesting_depth) {
            return Test::non_active(name, TestStatus::Xfail, "pending", loc);
        }
        if ruby::body_calls_bare_method(block, ctx.bytes, "skip", ctx.max_nesting_depth) {
            return Test::non_active(name, TestStatus::Skipped, "skip", loc);
        }
    }
    Test::active(name, loc)
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "rspec",
        languages: &[Language::Ruby],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*_spec.rb"], 20)),
            Box::new(ImportMatcher::new(vec!["require 'rspec'", "require \"rspec\""])),
            Box::new(ContentMatcher::new(
                &[r"RSpec\.describe", r"^\s*describe\s+['\x22]"],
                40,
                "RSpec describe block",
            )),
            Box::new(ConfigFileMatcher::new(vec![".rspec"])),
        ],
        config_parser: Some(Box::new(RspecConfigParser)),
        extractor: Box::new(RspecExtractor),
        priority: FrameworkPriority::Specific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::ScanCancellation;
    use crate::parser_pool::ParserPool;

    fn run(src: &[u8]) -> TestFile {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let ctx = ExtractionContext {
            path: "user_spec.rb",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        RspecExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn describe_and_context_nest_it_blocks() {
        let file = run(
            b"describe 'User' do\n\
                context 'when valid' do\n\
                  it 'is created' do\n\
                  end\n\
                end\n\
              end\n",
        );
        assert_eq!(file.suites[0].name, "User");
        assert_eq!(file.suites[0].suites[0].name, "when valid");
        assert_eq!(file.suites[0].suites[0].tests[0].name, "is created");
    }

    #[test]
    fn specify_and_example_are_both_recognized_as_tests() {
        let file = run(
            b"describe 'User' do\n\
                specify 'has a name' do\n\
                end\n\
                example 'has an email' do\n\
                end\n\
              end\n",
        );
        let names: Vec<&str> = file.suites[0].tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["has a name", "has an email"]);
    }

    #[test]
    fn rspec_qualified_describe_is_equivalent_to_bare_describe() {
        let file = run(
            b"RSpec.describe 'User' do\n\
                it 'is created' do\n\
                end\n\
              end\n",
        );
        assert_eq!(file.suites[0].name, "User");
        assert_eq!(file.suites[0].tests[0].name, "is created");
    }

    #[test]
    fn xdescribe_and_xit_are_skipped() {
        let file = run(
            b"xdescribe 'User' do\n\
                xit 'is created' do\n\
                end\n\
                it 'also skipped by propagation' do\n\
                end\n\
              end\n",
        );
        assert_eq!(file.suites[0].status, TestStatus::Skipped);
        assert_eq!(file.suites[0].modifier, "xdescribe");
        let xit_test = file.suites[0].tests.iter().find(|t| t.name == "is created").unwrap();
        assert_eq!(xit_test.status, TestStatus::Skipped);
        assert_eq!(xit_test.modifier, "xit");
    }

    #[test]
    fn pending_call_in_the_body_marks_the_test_xfail() {
        let file = run(
            b"describe 'User' do\n\
                it 'is not ready yet' do\n\
                  pending\n\
                  raise 'not implemented'\n\
                end\n\
              end\n",
        );
        let test = &file.suites[0].tests[0];
        assert_eq!(test.status, TestStatus::Xfail);
        assert_eq!(test.modifier, "pending");
    }

    #[test]
    fn skip_call_in_the_body_marks_the_test_skipped() {
        let file = run(
            b"describe 'User' do\n\
                it 'is not ready yet' do\n\
                  skip 'waiting on backend'\n\
                end\n\
              end\n",
        );
        let test = &file.suites[0].tests[0];
        assert_eq!(test.status, TestStatus::Skipped);
        assert_eq!(test.modifier, "skip");
    }
}
