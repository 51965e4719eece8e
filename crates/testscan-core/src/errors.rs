//! The error taxonomy from the scan pipeline's perspective: per-file `ScanError`
//! records that never halt a scan, and the handful of conditions that do.

use serde::{Deserialize, Serialize};

/// The pipeline phase a [`ScanError`] originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    Walking,
    Detection,
    Parsing,
    Extraction,
}

impl ScanPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanPhase::Walking => "walking",
            ScanPhase::Detection => "detection",
            ScanPhase::Parsing => "parsing",
            ScanPhase::Extraction => "extraction",
        }
    }
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of failure behind a [`ScanError`], independent of which phase raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanErrorKind {
    /// Couldn't read from the Source (walk or open).
    SourceError,
    /// A matcher failed unexpectedly.
    DetectionError,
    /// The grammar failed to parse the file's bytes.
    ParseError,
    /// The extractor hit a structurally unexpected node or exceeded the depth budget.
    ExtractionError,
    /// The file exceeded the configured max size.
    Oversize,
    /// The whole scan was cancelled or its deadline expired.
    Cancelled,
}

impl ScanErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanErrorKind::SourceError => "source_error",
            ScanErrorKind::DetectionError => "detection_error",
            ScanErrorKind::ParseError => "parse_error",
            ScanErrorKind::ExtractionError => "extraction_error",
            ScanErrorKind::Oversize => "oversize",
            ScanErrorKind::Cancelled => "cancelled",
        }
    }
}

/// A single non-fatal failure recorded against a scan.
///
/// Per-file errors never halt the scan — they accumulate in the result's `errors`
/// list. Only cancellation and source-root errors are surfaced as a top-level error
/// (see [`FatalScanError`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub path: String,
    pub phase: ScanPhase,
    pub cause: String,
}

impl ScanError {
    pub fn new(
        kind: ScanErrorKind,
        phase: ScanPhase,
        path: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            phase,
            cause: cause.into(),
        }
    }

    pub fn without_path(kind: ScanErrorKind, phase: ScanPhase, cause: impl Into<String>) -> Self {
        Self::new(kind, phase, String::new(), cause)
    }

    pub fn cancelled() -> Self {
        Self::without_path(ScanErrorKind::Cancelled, ScanPhase::Walking, "scan cancelled")
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}] {}", self.phase, self.cause)
        } else {
            write!(f, "[{}] {}: {}", self.phase, self.path, self.cause)
        }
    }
}

impl std::error::Error for ScanError {}

/// A condition that aborts the whole scan rather than being recorded per-file:
/// an invalid source root, registry corruption, or cancellation/timeout.
#[derive(Debug, thiserror::Error)]
pub enum FatalScanError {
    #[error("invalid source root: {reason}")]
    InvalidRoot { reason: String },

    #[error("framework registry error: {reason}")]
    RegistryCorruption { reason: String },

    #[error("scan cancelled or timed out")]
    Cancelled,
}
