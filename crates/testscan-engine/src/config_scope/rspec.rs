use regex::Regex;

use super::{ConfigParseError, ConfigParser, ConfigScope};

/// Parses a `.rspec` dotfile: one CLI flag per line (`--require spec_helper`,
/// `--pattern spec/**/*_spec.rb`). RSpec always injects its DSL globals, so
/// `globals` is unconditionally true.
pub struct RspecConfigParser;

impl ConfigParser for RspecConfigParser {
    fn parse(&self, bytes: &[u8]) -> Result<ConfigScope, ConfigParseError> {
        let text = String::from_utf8_lossy(bytes);
        let pattern_re = Regex::new(r"--pattern\s+(\S+)").map_err(|e| ConfigParseError::Malformed(e.to_string()))?;
        let include = pattern_re
            .captures_iter(&text)
            .map(|c| c[1].to_string())
            .collect::<Vec<_>>();
        Ok(ConfigScope {
            framework: "rspec".to_string(),
            include,
            exclude: Vec::new(),
            globals: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_pattern_flag() {
        let cfg = b"--require spec_helper\n--pattern spec/**/*_spec.rb\n--color\n";
        let scope = RspecConfigParser.parse(cfg).unwrap();
        assert_eq!(scope.include, vec!["spec/**/*_spec.rb"]);
        assert!(scope.globals);
    }
}
