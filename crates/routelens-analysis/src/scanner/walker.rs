//! Parallel file walker using the `ignore` crate's `WalkParallel`.
//!
//! Supports `.routelensignore` (gitignore syntax, hierarchical), skips hidden
//! entries and the default build/vendor/VCS directories.

use std::path::Path;

use crossbeam_channel as channel;
use routelens_core::config::ScanConfig;
use routelens_core::CancellationToken;

use super::language_detect::Language;
use super::types::DiscoveredFile;

/// Directories never descended into.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".next",
    "dist",
    "build",
    "coverage",
    ".nyc_output",
    "logs",
    "tmp",
    "temp",
];

/// Custom ignore file honoured in every directory.
pub const IGNORE_FILE_NAME: &str = ".routelensignore";

/// Walk a directory tree in parallel, collecting files of `languages`.
///
/// Respects `.gitignore`, `.routelensignore`, and the default ignore list.
/// Returns files sorted by path for deterministic output. Stops early
/// (returning what was found so far) once `cancel` is set.
pub fn walk_directory(
    root: &Path,
    config: &ScanConfig,
    languages: &[Language],
    cancel: &CancellationToken,
) -> Vec<DiscoveredFile> {
    let (tx, rx) = channel::unbounded();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .follow_links(config.follow_symlinks.unwrap_or(false));

    let threads = config.effective_threads();
    if threads > 0 {
        builder.threads(threads);
    }

    // Negated override globs exclude; there are no positive globs, so
    // everything else stays eligible.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!**/{}/**", pattern));
        let _ = overrides.add(&format!("!**/{}", pattern));
    }
    for pattern in &config.extra_ignore {
        if let Err(err) = overrides.add(&format!("!{}", pattern)) {
            tracing::warn!(pattern = %pattern, error = %err, "ignoring invalid extra_ignore glob");
        }
    }
    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(err) => tracing::warn!(error = %err, "failed to build ignore overrides"),
    }

    let max_file_size = config.effective_max_file_size();
    builder.build_parallel().run(|| {
        let tx = tx.clone();
        let cancel = cancel.clone();
        Box::new(move |entry| {
            if cancel.is_cancelled() {
                return ignore::WalkState::Quit;
            }

            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "walk error");
                    return ignore::WalkState::Continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return ignore::WalkState::Continue;
            }

            let path = entry.path();
            let Some(language) = Language::from_extension(path.extension().and_then(|e| e.to_str()))
            else {
                return ignore::WalkState::Continue;
            };
            if !languages.contains(&language) {
                return ignore::WalkState::Continue;
            }

            let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if file_size > max_file_size {
                tracing::debug!(
                    path = %path.display(),
                    size = file_size,
                    limit = max_file_size,
                    "skipping file over max_file_size"
                );
                return ignore::WalkState::Continue;
            }
            let _ = tx.send(DiscoveredFile {
                path: path.to_path_buf(),
                file_size,
                language,
            });

            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "app.get('/', (req, res) => {});").unwrap();
    }

    fn relative_paths(root: &Path, files: &[DiscoveredFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| super::super::reader::file_identifier(root, &f.path))
            .collect()
    }

    #[test]
    fn test_filters_languages_and_default_ignores() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "app.js");
        touch(root, "routes/user.ts");
        touch(root, "routes/readme.md");
        touch(root, "node_modules/express/index.js");
        touch(root, "dist/bundle.js");
        touch(root, "src/build/out.js");
        touch(root, ".hidden/secret.js");

        let files = walk_directory(root, &ScanConfig::default(), &Language::ALL, &CancellationToken::new());
        assert_eq!(relative_paths(root, &files), vec!["app.js", "routes/user.ts"]);
    }

    #[test]
    fn test_language_subset_and_extra_ignore() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "a.js");
        touch(root, "b.ts");
        touch(root, "fixtures/c.js");

        let config = ScanConfig {
            extra_ignore: vec!["fixtures/**".to_string()],
            ..Default::default()
        };
        let files = walk_directory(root, &config, &[Language::JavaScript], &CancellationToken::new());
        assert_eq!(relative_paths(root, &files), vec!["a.js"]);
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "fits.js");
        fs::write(root.join("big.js"), "app.get('/big', (req, res) => {});").unwrap();

        let config = ScanConfig {
            max_file_size: Some(31),
            ..Default::default()
        };
        let files = walk_directory(root, &config, &Language::ALL, &CancellationToken::new());
        assert_eq!(relative_paths(root, &files), vec!["fits.js"]);
        assert_eq!(files[0].file_size, 31);
    }

    #[test]
    fn test_custom_ignore_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "keep.js");
        touch(root, "legacy/old.js");
        fs::write(root.join(IGNORE_FILE_NAME), "legacy/\n").unwrap();

        let files = walk_directory(root, &ScanConfig::default(), &Language::ALL, &CancellationToken::new());
        assert_eq!(relative_paths(root, &files), vec!["keep.js"]);
    }

    #[test]
    fn test_cancelled_walk_returns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.js");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let files = walk_directory(dir.path(), &ScanConfig::default(), &Language::ALL, &cancel);
        assert!(files.is_empty());
    }
}
