//! File provider and scan driver.
//!
//! `Scanner::new(config).scan(root, handler, cancel)` walks `root`, reads
//! every eligible file, and feeds them through the [`RouteEngine`].

pub mod hasher;
pub mod language_detect;
pub mod reader;
pub mod types;
pub mod walker;

use std::path::Path;

use routelens_core::config::RoutelensConfig;
use routelens_core::errors::ScanError;
use routelens_core::events::ScanEventHandler;
use routelens_core::CancellationToken;

use crate::routes::engine::{RouteEngine, ScanResult};
use language_detect::resolve_languages;
use reader::read_source;
use walker::walk_directory;

pub use language_detect::Language;
pub use types::{DiscoveredFile, SourceFile};

/// Scans a directory tree for routes.
///
/// The engine (and its cache) lives as long as the scanner, so repeated
/// scans of an unchanged tree are served from the cache.
pub struct Scanner {
    config: RoutelensConfig,
    engine: RouteEngine,
}

impl Scanner {
    pub fn new(config: RoutelensConfig) -> Self {
        let engine = RouteEngine::new(&config.engine);
        Self { config, engine }
    }

    pub fn config(&self) -> &RoutelensConfig {
        &self.config
    }

    pub fn engine(&self) -> &RouteEngine {
        &self.engine
    }

    /// Scan `root`. Per-file read failures end up in
    /// [`ScanResult::errors`]; only an unusable root or worker pool fails
    /// the whole scan.
    pub fn scan(
        &self,
        root: &Path,
        handler: &dyn ScanEventHandler,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let languages = resolve_languages(self.config.scan.languages.as_deref());
        let files = walk_directory(root, &self.config.scan, &languages, cancel);
        tracing::debug!(root = %root.display(), files = files.len(), "discovered source files");

        // A cancelled walk may have listed only part of the tree.
        let walk_cancelled = cancel.is_cancelled();

        let threads = self.config.scan.effective_threads();
        let mut result = if threads == 0 {
            self.scan_files(root, files, handler, cancel)
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| ScanError::WorkerPool {
                    message: e.to_string(),
                })?;
            pool.install(|| self.scan_files(root, files, handler, cancel))
        };
        result.partial |= walk_cancelled;
        Ok(result)
    }

    fn scan_files(
        &self,
        root: &Path,
        files: Vec<DiscoveredFile>,
        handler: &dyn ScanEventHandler,
        cancel: &CancellationToken,
    ) -> ScanResult {
        self.engine.run(
            files,
            |file| read_source(root, &file),
            Some(root),
            handler,
            cancel,
        )
    }
}
