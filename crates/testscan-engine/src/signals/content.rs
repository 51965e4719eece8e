use regex::RegexSet;

use super::{MatchResult, Matcher, Signal};

/// A framework-specific regex set over file bytes, with an optional exclusion set
/// that subtracts confidence when a rival framework's markers appear (JUnit 4 vs
/// 5, for instance). `regex::RegexSet` guarantees linear-time matching regardless
/// of pattern shape, so ReDoS-safety falls out of using it rather than hand-rolled
/// backtracking; patterns should still avoid unbounded `.*` runs for clarity.
pub struct ContentMatcher {
    include: RegexSet,
    exclude: Option<RegexSet>,
    base_confidence: u8,
    exclusion_penalty: u8,
    reason: &'static str,
}

impl ContentMatcher {
    pub fn new(include: &[&str], base_confidence: u8, reason: &'static str) -> Self {
        Self {
            include: RegexSet::new(include).expect("valid content regex set"),
            exclude: None,
            base_confidence,
            exclusion_penalty: base_confidence,
            reason,
        }
    }

    pub fn with_exclusions(mut self, exclude: &[&str], penalty: u8) -> Self {
        self.exclude = Some(RegexSet::new(exclude).expect("valid exclusion regex set"));
        self.exclusion_penalty = penalty;
        self
    }
}

impl Matcher for ContentMatcher {
    fn match_signal(&self, signal: &Signal) -> MatchResult {
        let Signal::FileContent(bytes) = signal else {
            return MatchResult::none();
        };
        let text = String::from_utf8_lossy(bytes);
        if !self.include.is_match(&text) {
            return MatchResult::none();
        }
        let mut confidence = self.base_confidence as i16;
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(&text) {
                confidence -= self.exclusion_penalty as i16;
            }
        }
        MatchResult::partial(confidence.max(0) as u8, self.reason)
    }
}
