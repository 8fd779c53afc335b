//! Turns discovered paths into `SourceFile`s.

use std::path::Path;

use routelens_core::errors::FileError;

use super::types::{DiscoveredFile, SourceFile};

/// Identifier for `path`: relative to `root`, `/`-separated.
pub fn file_identifier(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read a discovered file. Invalid UTF-8 is replaced rather than rejected;
/// only I/O failures become errors.
pub fn read_source(root: &Path, file: &DiscoveredFile) -> Result<SourceFile, FileError> {
    let id = file_identifier(root, &file.path);
    match std::fs::read(&file.path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            Ok(SourceFile { id, text })
        }
        Err(err) => Err(FileError::io(id, &err)),
    }
}
