//! Route & input extraction engine.
//!
//! Per file: match candidates, isolate each handler's scope, infer its
//! inputs, and (optionally) list middleware registrations. Files are
//! independent, so a batch runs on rayon and is merged back in input order;
//! within a file, routes keep the matcher's order.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use routelens_core::config::EngineConfig;
use routelens_core::errors::FileError;
use routelens_core::events::types::{
    FileAnalyzedEvent, FileErrorEvent, ScanCompleteEvent, ScanProgressEvent, ScanStartedEvent,
};
use routelens_core::events::ScanEventHandler;
use routelens_core::CancellationToken;
use serde::{Deserialize, Serialize};

use super::cache::AnalysisCache;
use super::candidates::find_candidates;
use super::inputs::extract_inputs;
use super::middleware::extract_middleware;
use super::scope::{extract_handler_scope, search_window_end};
use super::text::LineIndex;
use super::types::{MiddlewareEntry, Route};
use crate::scanner::hasher::hash_source;
use crate::scanner::types::SourceFile;

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAnalysis {
    pub routes: Vec<Route>,
    pub middleware: Vec<MiddlewareEntry>,
    /// Routes analyzed against the whole file because no handler body was
    /// isolated.
    pub whole_file_fallbacks: usize,
}

/// Middleware registrations of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMiddleware {
    pub file: String,
    pub entries: Vec<MiddlewareEntry>,
}

/// What the engine hands back to its caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub routes: Vec<Route>,
    pub scanned_file_count: usize,
    pub errors: Vec<FileError>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<FileMiddleware>,
    /// Set when the scan was cancelled before every file was processed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub partial: bool,
}

/// Extract routes from one file's text. Pure and deterministic.
pub fn extract_routes(file: &str, text: &str) -> Vec<Route> {
    analyze_source(file, text, false).routes
}

/// Run the full per-file pipeline.
pub fn analyze_source(file: &str, text: &str, include_middleware: bool) -> FileAnalysis {
    let candidates = find_candidates(text);
    let lines = LineIndex::new(text);
    let mut routes = Vec::with_capacity(candidates.len());
    let mut whole_file_fallbacks = 0;

    for (i, candidate) in candidates.iter().enumerate() {
        let window_end = search_window_end(&candidates, i);
        let scope = extract_handler_scope(text, candidate, window_end);
        if !scope.is_found() {
            whole_file_fallbacks += 1;
        }
        let expected_inputs = extract_inputs(scope.analysis_text(text), &candidate.path);

        routes.push(Route {
            method: candidate.method.clone(),
            path: candidate.path.clone(),
            file: file.to_string(),
            line: lines.line_of(candidate.match_position),
            framework: candidate.declaring_identifier.clone(),
            expected_inputs,
        });
    }

    let middleware = if include_middleware {
        extract_middleware(text)
    } else {
        Vec::new()
    };

    FileAnalysis {
        routes,
        middleware,
        whole_file_fallbacks,
    }
}

enum FileOutcome {
    /// Not started because the scan was cancelled.
    Skipped,
    Failed(FileError),
    Analyzed {
        file: String,
        analysis: Arc<FileAnalysis>,
    },
}

/// Runs the per-file pipeline over batches, with caching and events.
pub struct RouteEngine {
    cache: AnalysisCache,
    include_middleware: bool,
}

impl RouteEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            cache: AnalysisCache::new(config.effective_cache_capacity()),
            include_middleware: config.effective_include_middleware(),
        }
    }

    /// Analyze one file, reusing a cached result for identical input.
    pub fn analyze(&self, file: &str, text: &str) -> Arc<FileAnalysis> {
        let key = hash_source(file, text);
        self.cache
            .get_or_insert_with(key, || analyze_source(file, text, self.include_middleware))
    }

    /// Number of cached file analyses.
    pub fn cached_files(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Scan sources already loaded by the caller. `Err` entries are read
    /// failures reported by the file provider.
    pub fn scan_sources(
        &self,
        sources: Vec<Result<SourceFile, FileError>>,
        handler: &dyn ScanEventHandler,
        cancel: &CancellationToken,
    ) -> ScanResult {
        self.run(sources, |source| source, None, handler, cancel)
    }

    /// Load and analyze `items` in parallel; merge in input order.
    pub(crate) fn run<T, F>(
        &self,
        items: Vec<T>,
        load: F,
        root: Option<&Path>,
        handler: &dyn ScanEventHandler,
        cancel: &CancellationToken,
    ) -> ScanResult
    where
        T: Send,
        F: Fn(T) -> Result<SourceFile, FileError> + Sync,
    {
        let started = Instant::now();
        let total = items.len();
        handler.on_scan_started(&ScanStartedEvent {
            root: root.map(Path::to_path_buf),
            file_count: total,
        });

        let processed = AtomicUsize::new(0);
        let outcomes: Vec<FileOutcome> = items
            .into_par_iter()
            .map(|item| {
                if cancel.is_cancelled() {
                    return FileOutcome::Skipped;
                }
                let outcome = match load(item) {
                    Ok(source) => {
                        let analysis = self.analyze(&source.id, &source.text);
                        handler.on_file_analyzed(&FileAnalyzedEvent {
                            file: source.id.clone(),
                            route_count: analysis.routes.len(),
                            whole_file_fallbacks: analysis.whole_file_fallbacks,
                        });
                        FileOutcome::Analyzed {
                            file: source.id,
                            analysis,
                        }
                    }
                    Err(err) => {
                        handler.on_file_error(&FileErrorEvent {
                            file: err.file.clone(),
                            message: err.message.clone(),
                        });
                        FileOutcome::Failed(err)
                    }
                };
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                handler.on_scan_progress(&ScanProgressEvent {
                    processed: done,
                    total,
                });
                outcome
            })
            .collect();

        let mut result = ScanResult::default();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Skipped => result.partial = true,
                FileOutcome::Failed(err) => result.errors.push(err),
                FileOutcome::Analyzed { file, analysis } => {
                    result.scanned_file_count += 1;
                    result.routes.extend(analysis.routes.iter().cloned());
                    if !analysis.middleware.is_empty() {
                        result.middleware.push(FileMiddleware {
                            file,
                            entries: analysis.middleware.clone(),
                        });
                    }
                }
            }
        }

        handler.on_scan_complete(&ScanCompleteEvent {
            scanned_files: result.scanned_file_count,
            routes: result.routes.len(),
            errors: result.errors.len(),
            duration_ms: started.elapsed().as_millis() as u64,
            partial: result.partial,
        });
        result
    }
}

impl Default for RouteEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
