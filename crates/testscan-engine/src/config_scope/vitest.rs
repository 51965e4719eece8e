use super::jest::extract_string_array;
use super::{ConfigParseError, ConfigParser, ConfigScope};

/// Vitest's `test.include`/`test.exclude` arrays, scraped the same way Jest's are —
/// Vitest configs are Vite config objects, not JSON, so a regex scrape over the
/// `include`/`exclude` keys is the pragmatic option without a full JS evaluator.
pub struct VitestConfigParser;

impl ConfigParser for VitestConfigParser {
    fn parse(&self, bytes: &[u8]) -> Result<ConfigScope, ConfigParseError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(ConfigScope {
            framework: "vitest".to_string(),
            include: extract_string_array(&text, "include").unwrap_or_default(),
            exclude: extract_string_array(&text, "exclude").unwrap_or_default(),
            globals: text.contains("globals: true") || text.contains("globals:true"),
        })
    }
}
