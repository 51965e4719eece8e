use super::jest::extract_string_array;
use super::{ConfigParseError, ConfigParser, ConfigScope};

/// Playwright's `testMatch`/`testIgnore` fields (top-level or under `use`).
pub struct PlaywrightConfigParser;

impl ConfigParser for PlaywrightConfigParser {
    fn parse(&self, bytes: &[u8]) -> Result<ConfigScope, ConfigParseError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(ConfigScope {
            framework: "playwright".to_string(),
            include: extract_string_array(&text, "testMatch").unwrap_or_default(),
            exclude: extract_string_array(&text, "testIgnore").unwrap_or_default(),
            globals: false,
        })
    }
}
