//! Mocha: the `describe`/`it` DSL with BDD-style hooks, no bundled assertion or
//! mocking API (unlike Jest/Vitest) so detection leans on its config file and the
//! `mocha` import/require rather than an API-usage content probe.

use testscan_core::{FrameworkPriority, Language, TestFile};

use crate::registry::FrameworkDefinition;
use crate::signals::{ConfigFileMatcher, FilenameMatcher, ImportMatcher};

use super::{ExtractionContext, ExtractionError, Extractor};

pub struct MochaExtractor;

impl Extractor for MochaExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let language = if ctx.path.ends_with(".ts") || ctx.path.ends_with(".tsx") {
            Language::TypeScript
        } else {
            Language::JavaScript
        };
        super::shared::extract_js_dsl(ctx, language, "mocha")
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "mocha",
        languages: &[Language::TypeScript, Language::JavaScript],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*.test.js", "*.spec.js", "*.test.ts"], 15)),
            Box::new(ImportMatcher::new(vec![
                "require('mocha')",
                "require(\"mocha\")",
                "from 'mocha'",
            ])),
            Box::new(ConfigFileMatcher::new(vec![".mocharc.json", ".mocharc.js", ".mocharc.yml"])),
        ],
        config_parser: None,
        extractor: Box::new(MochaExtractor),
        priority: FrameworkPriority::Generic,
    }
}
