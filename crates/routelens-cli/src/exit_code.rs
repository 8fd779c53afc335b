//! Process exit codes.

use routelens_core::errors::{ConfigError, ScanError};

/// Scan finished; per-file read errors do not change this.
pub const SUCCESS: u8 = 0;
/// Unexpected failure, e.g. the output could not be written.
pub const INTERNAL_ERROR: u8 = 1;
/// Bad config file or invalid config value.
pub const CONFIG_ERROR: u8 = 2;
/// The scan could not run at all (missing root, not a directory).
pub const SCAN_ERROR: u8 = 3;

/// Map a top-level error to its exit code.
pub fn for_error(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<ConfigError>().is_some() {
        CONFIG_ERROR
    } else if err.downcast_ref::<ScanError>().is_some() {
        SCAN_ERROR
    } else {
        INTERNAL_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_mapping() {
        let scan = anyhow::Error::new(ScanError::RootNotFound {
            path: PathBuf::from("/nope"),
        });
        assert_eq!(for_error(&scan), SCAN_ERROR);

        let config = anyhow::Error::new(ConfigError::Invalid {
            field: "scan.max_file_size",
            message: "must be greater than zero".to_string(),
        });
        assert_eq!(for_error(&config), CONFIG_ERROR);

        assert_eq!(for_error(&anyhow::anyhow!("disk full")), INTERNAL_ERROR);
    }

    #[test]
    fn test_context_keeps_mapping() {
        let err = anyhow::Error::new(ScanError::NotADirectory {
            path: PathBuf::from("app.js"),
        })
        .context("scanning app.js");
        assert_eq!(for_error(&err), SCAN_ERROR);
    }
}
