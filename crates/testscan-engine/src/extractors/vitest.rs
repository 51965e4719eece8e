//! Vitest: the same `describe`/`it` DSL as Jest, distinguished by its own import
//! source and config file.

use testscan_core::{FrameworkPriority, Language, TestFile};

use crate::config_scope::VitestConfigParser;
use crate::registry::FrameworkDefinition;
use crate::signals::{ConfigFileMatcher, ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{ExtractionContext, ExtractionError, Extractor};

pub struct VitestExtractor;

impl Extractor for VitestExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let language = if ctx.path.ends_with(".ts") || ctx.path.ends_with(".tsx") {
            Language::TypeScript
        } else {
            Language::JavaScript
        };
        super::shared::extract_js_dsl(ctx, language, "vitest")
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "vitest",
        languages: &[Language::TypeScript, Language::JavaScript],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*.test.ts", "*.test.js", "*.spec.ts"], 15)),
            Box::new(ImportMatcher::new(vec!["from 'vitest'", "from \"vitest\""])),
            Box::new(ContentMatcher::new(
                &[r"\bvi\.(mock|fn|spyOn)\b", r"import\.meta\.vitest"],
                40,
                "vitest API usage",
            )),
            Box::new(ConfigFileMatcher::new(vec![
                "vitest.config.ts",
                "vitest.config.js",
                "vitest.config.mts",
            ])),
        ],
        config_parser: Some(Box::new(VitestConfigParser)),
        extractor: Box::new(VitestExtractor),
        priority: FrameworkPriority::Generic,
    }
}
