//! Playwright: e2e browser testing, same `describe`/`test` DSL shape, imported
//! from `@playwright/test`. Carries `e2e` priority so it outranks a generic unit
//! test framework matched on the same ambiguous file.

use testscan_core::{FrameworkPriority, Language, TestFile};

use crate::config_scope::PlaywrightConfigParser;
use crate::registry::FrameworkDefinition;
use crate::signals::{ConfigFileMatcher, ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{ExtractionContext, ExtractionError, Extractor};

pub struct PlaywrightExtractor;

impl Extractor for PlaywrightExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let language = if ctx.path.ends_with(".ts") || ctx.path.ends_with(".tsx") {
            Language::TypeScript
        } else {
            Language::JavaScript
        };
        super::shared::extract_js_dsl(ctx, language, "playwright")
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "playwright",
        languages: &[Language::TypeScript, Language::JavaScript],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*.spec.ts", "*.test.ts"], 15)
                .with_definite(vec!["*.e2e.ts", "*.e2e-spec.ts"])),
            Box::new(ImportMatcher::new(vec!["@playwright/test"])),
            Box::new(ContentMatcher::new(&[r"\bpage\.(goto|click|fill)\b"], 40, "playwright page API")),
            Box::new(ConfigFileMatcher::new(vec!["playwright.config.ts", "playwright.config.js"])),
        ],
        config_parser: Some(Box::new(PlaywrightConfigParser)),
        extractor: Box::new(PlaywrightExtractor),
        priority: FrameworkPriority::E2e,
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
            path: "login.spec.ts",
            bytes: src,
            parser_pool: &pool,
            cancellation: &cancellation,
            max_nesting_depth: 20,
            depth_exceeded: std::cell::Cell::new(false),
        };
        PlaywrightExtractor.extract(&ctx).unwrap()
    }

    #[test]
    fn describe_test_dsl_is_extracted() {
        let file = run(
            b"import { test, expect } from '@playwright/test';\n\
              describe('Login', () => {\n\
                test('shows an error on bad password', async ({ page }) => {\n\
                  await page.goto('/login');\n\
                });\n\
              });",
        );
        assert_eq!(file.suites[0].name, "Login");
        assert_eq!(file.suites[0].tests[0].name, "shows an error on bad password");
    }
}
