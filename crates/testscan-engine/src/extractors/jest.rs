//! Jest: DSL-driven (`describe`/`it`) test detection for JS/TS, narrowed by the
//! `@jest/globals` import or a `jest.config.*` file sitting beside the test file.

use testscan_core::{FrameworkPriority, Language, TestFile};

use crate::config_scope::JestConfigParser;
use crate::registry::FrameworkDefinition;
use crate::signals::{ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{ExtractionContext, ExtractionError, Extractor};

pub struct JestExtractor;

impl Extractor for JestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let language = if ctx.path.ends_with(".ts") || ctx.path.ends_with(".tsx") {
            Language::TypeScript
        } else {
            Language::JavaScript
        };
        super::shared::extract_js_dsl(ctx, language, "jest")
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "jest",
        languages: &[Language::TypeScript, Language::JavaScript],
        matchers: vec![
            Box::new(FilenameMatcher::new(
                vec!["*.test.ts", "*.test.tsx", "*.test.js", "*.test.jsx", "*.spec.ts", "*.spec.js"],
                15,
            )),
            Box::new(ImportMatcher::new(vec!["@jest/globals", "from 'jest'", "require('jest')"])),
            Box::new(ContentMatcher::new(
                &[r"\bjest\.(mock|fn|spyOn)\b", r"\bdescribe\("],
                40,
                "jest API usage",
            )),
        ],
        config_parser: Some(Box::new(JestConfigParser)),
        extractor: Box::new(JestExtractor),
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
        JestExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn ts_extension_parses_as_typescript() {
        let file = run(
            "user.test.ts",
            b"describe('UserService', () => {\n  it('creates a user', () => {});\n});",
        );
        assert_eq!(file.suites[0].name, "UserService");
        assert_eq!(file.suites[0].tests[0].name, "creates a user");
    }

    #[test]
    fn js_extension_parses_as_javascript() {
        let file = run(
            "user.test.js",
            b"describe('UserService', () => {\n  it('creates a user', () => {});\n});",
        );
        assert_eq!(file.suites[0].name, "UserService");
    }
}
