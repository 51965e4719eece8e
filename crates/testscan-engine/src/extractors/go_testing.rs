//! `go test`: top-level `Test*`/`Benchmark*`/`Example*`/`Fuzz*` functions. Every
//! file collapses into a single suite named after the file, since Go has no
//! enclosing construct of its own; `t.Run("name", ...)` subtests flatten into
//! that same suite as `Parent/name` tests rather than a nested tree, matching how
//! `go test -v` reports them.

use testscan_core::{FrameworkPriority, Language, Test, TestFile, TestSuite};

use crate::ast::go_lang;
use crate::ast::{find_child_node, location_of};
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, FilenameMatcher};

use super::{parse, ExtractionContext, ExtractionError, Extractor};

const PREFIXES: &[&str] = &["Test", "Benchmark", "Example", "Fuzz"];

pub struct GoTestingExtractor;

impl Extractor for GoTestingExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let (_handle, tree) = parse(ctx, Language::Go)?;
        let root = tree.root_node();

        let mut file = TestFile::new(ctx.path, Language::Go, "go-testing");
        let suite_name = file_stem(ctx.path);
        let mut suite = TestSuite::active(suite_name, location_of(&root, ctx.path));

        for i in 0..root.child_count() {
            let Some(child) = root.child(i) else { continue };
            if child.kind() != "function_declaration" {
                continue;
            }
            let Some(name) = go_lang::function_name(&child, ctx.bytes) else { continue };
            if !PREFIXES.iter().any(|p| name.starts_with(p)) {
                continue;
            }
            let loc = location_of(&child, ctx.path);
            suite.tests.push(Test::active(name.clone(), loc));

            let Some(body) = find_child_node(&child, "body") else { continue };
            let receiver = go_lang::first_parameter_name(&child, ctx.bytes).unwrap_or_else(|| "t".to_string());
            for subtest in go_lang::find_subtest_calls(&body, ctx.bytes, &receiver, ctx.max_nesting_depth) {
                let sub_loc = location_of(&subtest.node, ctx.path);
                suite.tests.push(Test::active(format!("{name}/{}", subtest.name), sub_loc));
            }
        }

        if !suite.is_empty() {
            file.suites.push(suite);
        }
        Ok(file)
    }
}

fn file_stem(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "go-testing",
        languages: &[Language::Go],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*_test.go"], 25)),
            Box::new(ContentMatcher::new(
                &[r#""testing""#, r"\*testing\.T\b", r"\bfunc Test\w*\("],
                35,
                "built-in Go testing package",
            )),
        ],
        config_parser: None,
        extractor: Box::new(GoTestingExtractor),
        priority: FrameworkPriority::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::ScanCancellation;
    use crate::parser_pool::ParserPool;

    fn run(path: &str, src: &[u8]) -> TestFile {
        let pool = ParserPool::new(1);
        let cancellation = ScanCancellation::new();
        let ctx = ExtractionContext {
            path,
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        GoTestingExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn test_function_collapses_into_one_suite_named_after_the_file() {
        let file = run(
            "user_test.go",
            b"package user\n\nimport \"testing\"\n\nfunc TestCreatesUser(t *testing.T) {}\n",
        );
        assert_eq!(file.suites[0].name, "user_test.go");
        assert_eq!(file.suites[0].tests[0].name, "TestCreatesUser");
    }

    #[test]
    fn benchmark_example_and_fuzz_prefixes_are_all_recognized() {
        let file = run(
            "user_test.go",
            b"package user\n\nimport \"testing\"\n\n\
              func BenchmarkCreatesUser(b *testing.B) {}\n\
              func ExampleCreatesUser() {}\n\
              func FuzzCreatesUser(f *testing.F) {}\n",
        );
        let names: Vec<&str> = file.suites[0].tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["BenchmarkCreatesUser", "ExampleCreatesUser", "FuzzCreatesUser"]);
    }

    #[test]
    fn function_without_a_recognized_prefix_is_ignored() {
        let file = run("user_test.go", b"package user\n\nfunc helper() {}\n");
        assert!(file.is_empty());
    }

    #[test]
    fn t_run_subtests_flatten_into_parent_slash_name_tests() {
        let file = run(
            "user_test.go",
            b"package user\n\nimport \"testing\"\n\n\
              func TestCreatesUser(t *testing.T) {\n\
                  t.Run(\"valid email\", func(t *testing.T) {})\n\
                  t.Run(\"invalid email\", func(t *testing.T) {})\n\
              }\n",
        );
        let names: Vec<&str> = file.suites[0].tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["TestCreatesUser", "TestCreatesUser/valid email", "TestCreatesUser/invalid email"]
        );
    }
}
