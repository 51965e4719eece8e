//! Filesystem-backed `Source`, built on the `ignore` crate's parallel walker.

use std::path::{Path, PathBuf};

use crossbeam_channel as channel;

use crate::cancellation::ScanCancellation;

use super::{DiscoveredFile, Source, SourceError};

/// Directories and fixture/mock conventions excluded from every scan by default.
/// Mirrors the built-in exclusion set §4.H.1 calls for: vendor and dependency
/// directories, build output, and the fixture/mock naming conventions that would
/// otherwise surface spurious "test" files (Scenario 5).
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "target",
    ".next",
    ".nuxt",
    "__pycache__",
    ".pytest_cache",
    "coverage",
    ".nyc_output",
    "vendor",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
    "bin",
    "obj",
    "**/__fixtures__/**",
    "**/__mocks__/**",
    "**/fixtures/**",
];

/// A `Source` rooted at an absolute path on the local filesystem.
pub struct LocalSource {
    root: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
    follow_symlinks: bool,
    threads: usize,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: Vec::new(),
            exclude: Vec::new(),
            follow_symlinks: false,
            threads: 0,
        }
    }

    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }
}

impl Source for LocalSource {
    fn list_files(&self, cancellation: &ScanCancellation) -> Result<Vec<DiscoveredFile>, SourceError> {
        let (tx, rx) = channel::unbounded();

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .add_custom_ignore_filename(".testscanignore")
            .follow_links(self.follow_symlinks);

        if self.threads > 0 {
            builder.threads(self.threads);
        }

        let mut overrides = ignore::overrides::OverrideBuilder::new(&self.root);
        for pattern in &self.include {
            let _ = overrides.add(pattern);
        }
        for pattern in DEFAULT_IGNORES {
            let _ = overrides.add(&format!("!{}/**", pattern));
            let _ = overrides.add(&format!("!{}", pattern));
        }
        for pattern in &self.exclude {
            let _ = overrides.add(&format!("!{}", pattern));
        }
        if let Ok(built) = overrides.build() {
            builder.overrides(built);
        }

        let walker = builder.build_parallel();
        let cancel_flag = cancellation.clone();

        walker.run(|| {
            let tx = tx.clone();
            let cancel_flag = cancel_flag.clone();
            Box::new(move |entry| {
                if cancel_flag.is_cancelled() {
                    return ignore::WalkState::Quit;
                }

                let entry = match entry {
                    Ok(e) => e,
                    Err(_) => return ignore::WalkState::Continue,
                };

                match entry.file_type() {
                    Some(ft) if ft.is_file() => {}
                    _ => return ignore::WalkState::Continue,
                }

                let path = entry.path().to_path_buf();
                let size = match entry.metadata() {
                    Ok(m) => m.len(),
                    Err(_) => return ignore::WalkState::Continue,
                };

                let _ = tx.send(DiscoveredFile { path, size });
                ignore::WalkState::Continue
            })
        });

        drop(tx);

        if cancellation.is_cancelled() {
            return Err(SourceError::Cancelled);
        }

        let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn open(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound(path.to_path_buf())
            } else {
                SourceError::Io {
                    path: path.to_path_buf(),
                    cause: e.to_string(),
                }
            }
        })
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
