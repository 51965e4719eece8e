//! The Source abstraction (§4.A): everything the Scanner needs to enumerate and read
//! candidate files, independent of where they actually live.

mod local;

pub use local::LocalSource;

use std::path::{Path, PathBuf};

use crate::cancellation::ScanCancellation;

/// A file the walker surfaced, with enough metadata to apply size limits before
/// opening it.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub size: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("walk failed: {0}")]
    Walk(String),
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("io error reading {path}: {cause}")]
    Io { path: PathBuf, cause: String },
    #[error("walk cancelled")]
    Cancelled,
}

/// Abstracts access to a file tree. Implementations must be safe to call
/// concurrently from the worker pool — internal serialization is fine, but callers
/// never need to externally synchronize.
pub trait Source: Send + Sync {
    /// Enumerate candidate files under the root, honoring whatever include/exclude
    /// configuration the Source was built with. Conceptually a lazy finite sequence;
    /// `LocalSource` materializes it via a parallel walk and returns it sorted for
    /// deterministic ordering.
    fn list_files(&self, cancellation: &ScanCancellation) -> Result<Vec<DiscoveredFile>, SourceError>;

    /// Read a file's full contents. A nonexistent or oversized path is the caller's
    /// responsibility to avoid; an oversized read still returns bytes here (the
    /// Scanner enforces the size limit against `DiscoveredFile::size` beforehand).
    fn open(&self, path: &Path) -> Result<Vec<u8>, SourceError>;

    /// The absolute root this source is rooted at.
    fn root(&self) -> &Path;

    /// Release any resources held open by the source. A no-op for most
    /// implementations; present so virtual/in-memory sources have a clear teardown
    /// point.
    fn close(&self) {}
}
