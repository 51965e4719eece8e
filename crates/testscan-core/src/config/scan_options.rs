use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration consumed by the Scanner (§4.H). All fields are optional so a
/// partially-specified struct (e.g. deserialized from a dotfile by the CLI
/// collaborator) still has sane defaults via the `effective_*` accessors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanOptions {
    /// Worker count. `None`/`Some(0)` means available parallelism, clamped to ≥1.
    pub workers: Option<usize>,
    /// Deadline for the whole scan; past it the Scanner behaves as cancelled.
    pub timeout: Option<Duration>,
    /// Glob patterns; if non-empty, only matching paths are considered.
    #[serde(default)]
    pub include: Vec<String>,
    /// Additional exclude globs, on top of the built-in exclusion set.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Maximum file size in bytes before a file is skipped with an `oversize` error.
    /// Default 5 MiB (5_242_880).
    pub max_file_size: Option<u64>,
    /// Maximum suite/extraction nesting depth. Default 20.
    pub max_nesting_depth: Option<u32>,
    /// Follow symbolic links while walking. Default false.
    pub follow_symlinks: Option<bool>,
}

impl ScanOptions {
    pub fn effective_workers(&self) -> usize {
        match self.workers {
            Some(0) | None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Some(n) => n.max(1),
        }
    }

    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(5 * 1024 * 1024)
    }

    pub fn effective_max_nesting_depth(&self) -> u32 {
        self.max_nesting_depth.unwrap_or(20)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let opts = ScanOptions::default();
        assert_eq!(opts.effective_max_file_size(), 5 * 1024 * 1024);
        assert_eq!(opts.effective_max_nesting_depth(), 20);
        assert!(opts.effective_workers() >= 1);
    }

    #[test]
    fn zero_workers_falls_back_to_parallelism() {
        let opts = ScanOptions {
            workers: Some(0),
            ..Default::default()
        };
        assert!(opts.effective_workers() >= 1);
    }
}
