//! Configuration: `routelens.toml`, every field optional.
//!
//! Resolution order is CLI flags > config file > built-in defaults. The CLI
//! applies its overrides on top of the value returned by [`RoutelensConfig::load`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Name of the project-level config file looked up in the scan root.
pub const CONFIG_FILE_NAME: &str = "routelens.toml";

/// Default maximum size of a file that will be read (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Default number of per-file analyses kept in the content-hash cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutelensConfig {
    pub scan: ScanConfig,
    pub engine: EngineConfig,
}

/// File-provider settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Files larger than this are skipped by the walker.
    pub max_file_size: Option<u64>,
    /// Worker threads for walking and analysis. 0 or unset = rayon default.
    pub threads: Option<usize>,
    pub follow_symlinks: Option<bool>,
    /// Extra gitignore-style globs excluded on top of the defaults.
    pub extra_ignore: Vec<String>,
    /// Language names to scan (`javascript`, `typescript`). Unset = both.
    pub languages: Option<Vec<String>>,
}

impl ScanConfig {
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }
}

/// Engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub cache_capacity: Option<u64>,
    /// Run the middleware pass and include its entries in the result.
    pub include_middleware: Option<bool>,
}

impl EngineConfig {
    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity.unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    pub fn effective_include_middleware(&self) -> bool {
        self.include_middleware.unwrap_or(false)
    }
}

impl RoutelensConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit file must exist. Without one, `routelens.toml` in `root` is
    /// used when present, otherwise defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.max_file_size == Some(0) {
            return Err(ConfigError::Invalid {
                field: "scan.max_file_size",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.engine.cache_capacity == Some(0) {
            return Err(ConfigError::Invalid {
                field: "engine.cache_capacity",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
