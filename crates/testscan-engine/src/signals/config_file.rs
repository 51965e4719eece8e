use super::{MatchResult, Matcher, Signal};

/// Matches when the signal carries a filename equal to one of a fixed list of
/// project configuration filenames (`cypress.config.ts`, `.rspec`, ...).
pub struct ConfigFileMatcher {
    filenames: Vec<&'static str>,
}

impl ConfigFileMatcher {
    pub fn new(filenames: Vec<&'static str>) -> Self {
        Self { filenames }
    }
}

impl Matcher for ConfigFileMatcher {
    fn match_signal(&self, signal: &Signal) -> MatchResult {
        let Signal::ConfigFilename(name) = signal else {
            return MatchResult::none();
        };
        if self.filenames.contains(name) {
            MatchResult::partial(25, format!("config file `{name}`"))
        } else {
            MatchResult::none()
        }
    }
}
