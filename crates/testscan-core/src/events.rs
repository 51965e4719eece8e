//! Scan progress/lifecycle events. A `ScanEventHandler` is an optional observer the
//! Scanner reports to as it walks, detects, and extracts — independent of the
//! `Inventory` and `errors` it ultimately returns.

use crate::errors::ScanError;

#[derive(Debug, Clone)]
pub struct ScanStartedEvent<'a> {
    pub root_path: &'a str,
}

#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub files_discovered: usize,
    pub files_processed: usize,
}

#[derive(Debug, Clone)]
pub struct ScanErrorEvent<'a> {
    pub error: &'a ScanError,
}

#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub files_total: usize,
    pub tests_total: usize,
    pub errors_total: usize,
    pub elapsed: std::time::Duration,
}

/// Observer interface the Scanner reports lifecycle events to. Implementations must
/// be cheap and non-blocking — they run on the worker that produced the event.
pub trait ScanEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent<'_>) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_scan_error(&self, _event: &ScanErrorEvent<'_>) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
}

/// A handler that discards every event — the default when the caller doesn't need
/// progress reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventHandler;

impl ScanEventHandler for NullEventHandler {}
