//! Observer trait for scan events.

use super::types::{
    FileAnalyzedEvent, FileErrorEvent, ScanCompleteEvent, ScanProgressEvent, ScanStartedEvent,
};

/// Receives scan lifecycle events. Every method defaults to a no-op.
///
/// Called from worker threads, hence `Send + Sync`.
pub trait ScanEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_scan_progress(&self, _event: &ScanProgressEvent) {}
    fn on_file_analyzed(&self, _event: &FileAnalyzedEvent) {}
    fn on_file_error(&self, _event: &FileErrorEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
}

/// Handler that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ScanEventHandler for NoOpHandler {}

/// Handler that turns events into `tracing` records.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHandler;

impl ScanEventHandler for TracingHandler {
    fn on_scan_started(&self, event: &ScanStartedEvent) {
        match &event.root {
            Some(root) => tracing::info!(
                root = %root.display(),
                files = event.file_count,
                "scan started"
            ),
            None => tracing::info!(files = event.file_count, "scan started"),
        }
    }

    fn on_scan_progress(&self, event: &ScanProgressEvent) {
        if event.processed % 100 == 0 || event.processed == event.total {
            tracing::debug!(processed = event.processed, total = event.total, "scan progress");
        }
    }

    fn on_file_analyzed(&self, event: &FileAnalyzedEvent) {
        tracing::debug!(
            file = %event.file,
            routes = event.route_count,
            whole_file_fallbacks = event.whole_file_fallbacks,
            "analyzed file"
        );
    }

    fn on_file_error(&self, event: &FileErrorEvent) {
        tracing::warn!(file = %event.file, error = %event.message, "failed to read file");
    }

    fn on_scan_complete(&self, event: &ScanCompleteEvent) {
        tracing::info!(
            files = event.scanned_files,
            routes = event.routes,
            errors = event.errors,
            duration_ms = event.duration_ms,
            partial = event.partial,
            "scan complete"
        );
    }
}
