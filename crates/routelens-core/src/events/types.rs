//! Event payloads.

use std::path::PathBuf;

/// Emitted once, after the file provider has listed the files to scan.
#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: Option<PathBuf>,
    pub file_count: usize,
}

/// Emitted after each file finishes (successfully or not).
#[derive(Debug, Clone)]
pub struct ScanProgressEvent {
    pub processed: usize,
    pub total: usize,
}

/// Emitted for each file that was analyzed.
#[derive(Debug, Clone)]
pub struct FileAnalyzedEvent {
    pub file: String,
    pub route_count: usize,
    /// Routes whose handler body could not be isolated and were analyzed
    /// against the whole file instead.
    pub whole_file_fallbacks: usize,
}

/// Emitted for each file that could not be read.
#[derive(Debug, Clone)]
pub struct FileErrorEvent {
    pub file: String,
    pub message: String,
}

/// Emitted once at the end of a scan.
#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub scanned_files: usize,
    pub routes: usize,
    pub errors: usize,
    pub duration_ms: u64,
    /// The scan was cancelled before every file was processed.
    pub partial: bool,
}
