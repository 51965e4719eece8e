//! # testscan-engine
//!
//! Discovery, detection, and extraction pipeline for the test inventory engine.
//! Everything here is stateful — the source walker, the pooled tree-sitter
//! parsers, the framework registry, and the `Scanner` that ties them together —
//! as opposed to `testscan-core`'s zero-I/O entity model.

#![allow(clippy::module_inception)]

pub mod ast;
pub mod cancellation;
pub mod config_scope;
pub mod detection;
pub mod extractors;
pub mod parser_pool;
pub mod registry;
pub mod scanner;
pub mod signals;
pub mod source;

pub use cancellation::ScanCancellation;
pub use detection::{detect, DetectionWinner, DEFAULT_FLOOR};
pub use extractors::{ExtractionContext, ExtractionError, Extractor};
pub use parser_pool::ParserPool;
pub use registry::{builtin_registry, FrameworkDefinition, FrameworkRegistry, FrameworkRegistryBuilder};
pub use scanner::Scanner;
pub use source::{DiscoveredFile, LocalSource, Source, SourceError};
