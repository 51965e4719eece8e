use super::jest::extract_string_array;
use super::{ConfigParseError, ConfigParser, ConfigScope};

/// Cypress's `specPattern`/`excludeSpecPattern` fields under the `e2e` (or
/// `component`) key.
pub struct CypressConfigParser;

impl ConfigParser for CypressConfigParser {
    fn parse(&self, bytes: &[u8]) -> Result<ConfigScope, ConfigParseError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(ConfigScope {
            framework: "cypress".to_string(),
            include: extract_string_array(&text, "specPattern").unwrap_or_default(),
            exclude: extract_string_array(&text, "excludeSpecPattern").unwrap_or_default(),
            globals: true,
        })
    }
}
