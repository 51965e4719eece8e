use regex::Regex;

use super::{ConfigParseError, ConfigParser, ConfigScope};

/// Parses the handful of fields out of a `jest.config.{js,ts,json}` that matter
/// for scoping: `testMatch`/`testPathIgnorePatterns` arrays. Jest configs are
/// executable JS as often as they're JSON, so this is a light regex scrape over
/// the source text rather than a full JS/JSON parse — good enough to narrow the
/// walk, not meant to be a config validator.
pub struct JestConfigParser;

impl ConfigParser for JestConfigParser {
    fn parse(&self, bytes: &[u8]) -> Result<ConfigScope, ConfigParseError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(ConfigScope {
            framework: "jest".to_string(),
            include: extract_string_array(&text, "testMatch").unwrap_or_default(),
            exclude: extract_string_array(&text, "testPathIgnorePatterns").unwrap_or_default(),
            globals: false,
        })
    }
}

/// Extracts the string literals inside `"<key>": [...]` or `<key>: [...]`.
pub(super) fn extract_string_array(text: &str, key: &str) -> Option<Vec<String>> {
    let pattern = format!(r#""?{key}"?\s*:\s*\[([^\]]*)\]"#);
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;
    let inner = caps.get(1)?.as_str();
    let item_re = Regex::new(r#"['"]([^'"]+)['"]"#).ok()?;
    Some(item_re.captures_iter(inner).map(|c| c[1].to_string()).collect())
}
