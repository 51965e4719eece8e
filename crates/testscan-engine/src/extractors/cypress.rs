//! Cypress: e2e browser testing with a `*.cy.ts` filename convention definite
//! enough on its own to short-circuit arbitration (§4.E).

use testscan_core::{FrameworkPriority, Language, TestFile};

use crate::config_scope::CypressConfigParser;
use crate::registry::FrameworkDefinition;
use crate::signals::{ConfigFileMatcher, ContentMatcher, FilenameMatcher, ImportMatcher};

use super::{ExtractionContext, ExtractionError, Extractor};

pub struct CypressExtractor;

impl Extractor for CypressExtractor {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError> {
        let language = if ctx.path.ends_with(".ts") || ctx.path.ends_with(".tsx") {
            Language::TypeScript
        } else {
            Language::JavaScript
        };
        super::shared::extract_js_dsl(ctx, language, "cypress")
    }
}

pub fn definition() -> FrameworkDefinition {
    FrameworkDefinition {
        name: "cypress",
        languages: &[Language::TypeScript, Language::JavaScript],
        matchers: vec![
            Box::new(FilenameMatcher::new(vec!["*.spec.ts"], 15).with_definite(vec!["*.cy.ts", "*.cy.js"])),
            Box::new(ImportMatcher::new(vec!["from 'cypress'"])),
            Box::new(ContentMatcher::new(&[r"\bcy\.(visit|get|click)\b"], 40, "cypress cy API")),
            Box::new(ConfigFileMatcher::new(vec!["cypress.config.ts", "cypress.config.js", "cypress.json"])),
        ],
        config_parser: Some(Box::new(CypressConfigParser)),
        extractor: Box::new(CypressExtractor),
        priority: FrameworkPriority::E2e,
    }
}
