use glob::Pattern;

/// Framework-specific filename patterns. A `definite` pattern (e.g. `*.cy.ts` for
/// Cypress) short-circuits arbitration to full confidence on its own; the rest
/// contribute a partial confidence, typically 15-20.
pub struct FilenameMatcher {
    definite: Vec<Pattern>,
    partial: Vec<Pattern>,
    partial_confidence: u8,
}

impl FilenameMatcher {
    pub fn new(partial: Vec<&str>, partial_confidence: u8) -> Self {
        Self {
            definite: Vec::new(),
            partial: partial.into_iter().filter_map(|p| Pattern::new(p).ok()).collect(),
            partial_confidence,
        }
    }

    pub fn with_definite(mut self, definite: Vec<&str>) -> Self {
        self.definite = definite.into_iter().filter_map(|p| Pattern::new(p).ok()).collect();
        self
    }
}

impl super::Matcher for FilenameMatcher {
    fn match_signal(&self, signal: &super::Signal) -> super::MatchResult {
        let super::Signal::Filename(name) = signal else {
            return super::MatchResult::none();
        };
        if self.definite.iter().any(|p| p.matches(name)) {
            return super::MatchResult::definite(format!("filename `{name}` is a definite match"));
        }
        if self.partial.iter().any(|p| p.matches(name)) {
            return super::MatchResult::partial(self.partial_confidence, format!("filename `{name}` matches"));
        }
        super::MatchResult::none()
    }
}
