//! Per-Framework Extractors (§4.G): one module per of the ~20 framework
//! strategies. Each module exposes `definition()`, building the
//! [`crate::registry::FrameworkDefinition`] — matchers, optional config parser,
//! and extractor — that `crate::registry::builtin_registry` registers at first
//! use.

mod shared;

pub mod cypress;
pub mod go_testing;
pub mod gtest;
pub mod junit4;
pub mod junit5;
pub mod kotest;
pub mod minitest;
pub mod mocha;
pub mod mstest;
pub mod nunit;
pub mod phpunit;
pub mod playwright;
pub mod pytest;
pub mod rspec;
pub mod testng;
pub mod unittest;
pub mod vitest;
pub mod xctest;
pub mod xunit;

use testscan_core::TestFile;

use crate::cancellation::ScanCancellation;
use crate::parser_pool::{ParsePoolError, ParserPool};
use crate::registry::{FrameworkRegistry, FrameworkRegistryBuilder, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Parser(#[from] ParsePoolError),
    #[error("extraction cancelled")]
    Cancelled,
    #[error("exceeded max nesting depth {0}")]
    DepthExceeded(u32),
    #[error("unexpected node shape: {0}")]
    UnexpectedNode(String),
}

/// Everything an extractor needs: the bytes it parses, where they came from, and
/// the shared resources (parser pool, cancellation, depth budget) it must respect.
pub struct ExtractionContext<'a> {
    pub path: &'a str,
    pub bytes: &'a [u8],
    pub parser_pool: &'a ParserPool,
    pub cancellation: &'a ScanCancellation,
    pub max_nesting_depth: u32,
    /// Set by a walker when it stops descending because `max_nesting_depth` was
    /// reached (§4.G: "stop descending and record a scan error with phase
    /// `extraction`"). The extractor still returns its partial tree via `Ok`;
    /// the Scanner reads this flag afterward to fold in the §7 `extraction_error`.
    pub depth_exceeded: std::cell::Cell<bool>,
}

impl ExtractionContext<'_> {
    /// Marks that a walker hit `max_nesting_depth` and stopped descending.
    pub fn note_depth_exceeded(&self) {
        self.depth_exceeded.set(true);
    }
}

/// Common shape of §4.G: acquire a parser, parse, walk, emit a `TestFile`.
pub trait Extractor: Send + Sync {
    fn extract(&self, ctx: &ExtractionContext) -> Result<TestFile, ExtractionError>;
}

/// Registers every built-in framework strategy. Called exactly once, from
/// `crate::registry::builtin_registry`.
pub fn register_all(
    mut builder: FrameworkRegistryBuilder,
) -> Result<FrameworkRegistryBuilder, RegistryError> {
    builder.register(jest_definition())?;
    builder.register(vitest::definition())?;
    builder.register(mocha::definition())?;
    builder.register(playwright::definition())?;
    builder.register(cypress::definition())?;
    builder.register(rspec::definition())?;
    builder.register(minitest::definition())?;
    builder.register(junit5::definition())?;
    builder.register(junit4::definition())?;
    builder.register(testng::definition())?;
    builder.register(kotest::definition())?;
    builder.register(xunit::definition())?;
    builder.register(mstest::definition())?;
    builder.register(nunit::definition())?;
    builder.register(gtest::definition())?;
    builder.register(pytest::definition())?;
    builder.register(unittest::definition())?;
    builder.register(cargo_test::definition())?;
    builder.register(go_testing::definition())?;
    builder.register(xctest::definition())?;
    builder.register(phpunit::definition())?;
    Ok(builder)
}

pub mod jest;
fn jest_definition() -> crate::registry::FrameworkDefinition {
    jest::definition()
}

/// Acquires a parser for `language`, parses `ctx.bytes`, and hands back the tree
/// together with the handle that must outlive it. Shared by every AST-driven
/// extractor so the acquire/parse/cancellation-check dance isn't repeated twenty
/// times over.
pub fn parse(
    ctx: &ExtractionContext,
    language: testscan_core::Language,
) -> Result<(crate::parser_pool::ParserHandle<'_>, tree_sitter::Tree), ExtractionError> {
    if ctx.cancellation.is_cancelled() {
        return Err(ExtractionError::Cancelled);
    }
    let mut handle = ctx.parser_pool.acquire(language, ctx.cancellation)?;
    // Kotlin's grammar can misbehave on embedded NUL bytes (fuzzer-style input);
    // substitute spaces in a same-length copy before handing bytes to the parser.
    // Byte offsets into `ctx.bytes` stay valid since the substitution is 1:1.
    let sanitized = if language == testscan_core::Language::Kotlin {
        crate::ast::sanitize_for_parsing(ctx.bytes)
    } else {
        std::borrow::Cow::Borrowed(ctx.bytes)
    };
    let tree = handle.parse(&sanitized)?;
    Ok((handle, tree))
}

/// Registers a fully-built registry for testing, without touching the process-wide
/// singleton.
#[cfg(test)]
pub fn test_registry() -> FrameworkRegistry {
    register_all(FrameworkRegistry::builder())
        .expect("strategies register cleanly")
        .build()
}
