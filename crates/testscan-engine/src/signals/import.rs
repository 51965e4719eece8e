use aho_corasick::AhoCorasick;

use super::{MatchResult, Matcher, Signal};

/// Scans raw file bytes for any of a fixed list of import/require tokens.
/// Confidence 30 on first hit — the floor default is also 30, so on its own an
/// import match is exactly borderline and needs another signal to pass.
pub struct ImportMatcher {
    tokens: Vec<String>,
    automaton: AhoCorasick,
}

impl ImportMatcher {
    pub fn new(tokens: Vec<&str>) -> Self {
        let owned: Vec<String> = tokens.into_iter().map(str::to_string).collect();
        let automaton = AhoCorasick::new(&owned).expect("valid import token set");
        Self {
            tokens: owned,
            automaton,
        }
    }
}

impl Matcher for ImportMatcher {
    fn match_signal(&self, signal: &Signal) -> MatchResult {
        match signal {
            Signal::FileContent(bytes) => match self.automaton.find(bytes) {
                Some(m) => {
                    MatchResult::partial(30, format!("import token `{}`", self.tokens_hit(m.pattern().as_usize())))
                }
                None => MatchResult::none(),
            },
            // A project config declaring this framework's globals mode means the
            // import this matcher looks for may never appear in source — the
            // config itself stands in for it.
            Signal::ConfigScopeHit(name) => MatchResult::partial(30, format!("`{name}` config enables implicit globals")),
            _ => MatchResult::none(),
        }
    }
}

impl ImportMatcher {
    fn tokens_hit(&self, idx: usize) -> &str {
        self.tokens.get(idx).map(String::as_str).unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_on_first_matching_token() {
        let matcher = ImportMatcher::new(vec!["@jest/globals", "jest-environment"]);
        let result = matcher.match_signal(&Signal::FileContent(b"import { describe } from '@jest/globals';"));
        assert_eq!(result.confidence, 30);
    }

    #[test]
    fn no_hit_is_zero() {
        let matcher = ImportMatcher::new(vec!["@jest/globals"]);
        let result = matcher.match_signal(&Signal::FileContent(b"import x from 'other';"));
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn config_scope_hit_substitutes_for_a_missing_import() {
        let matcher = ImportMatcher::new(vec!["from 'vitest'"]);
        let result = matcher.match_signal(&Signal::ConfigScopeHit("vitest"));
        assert_eq!(result.confidence, 30);
    }
}
