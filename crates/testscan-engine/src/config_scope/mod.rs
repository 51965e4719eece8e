//! Configuration-file scoping (§6): for frameworks with a project-level config
//! file, a `ConfigParser` reads its bytes and returns a `ConfigScope` the Scanner
//! can use to narrow or widen the file walk and bias detection.

mod cypress;
mod jest;
mod playwright;
mod rspec;
mod vitest;

pub use cypress::CypressConfigParser;
pub use jest::JestConfigParser;
pub use playwright::PlaywrightConfigParser;
pub use rspec::RspecConfigParser;
pub use vitest::VitestConfigParser;

#[derive(Debug, Clone, Default)]
pub struct ConfigScope {
    pub framework: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Whether the framework injects DSL globals (`describe`/`it`) implicitly,
    /// meaning test files need not import them to be recognized.
    pub globals: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigParseError {
    #[error("malformed config: {0}")]
    Malformed(String),
}

/// Parses a framework's project-level configuration file into a `ConfigScope`.
pub trait ConfigParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<ConfigScope, ConfigParseError>;
}
