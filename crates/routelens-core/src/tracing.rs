//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before the caller-supplied default level.
pub const LOG_ENV_VAR: &str = "ROUTELENS_LOG";

/// Install a global `fmt` subscriber writing to stderr.
///
/// stdout is reserved for scan output. `ROUTELENS_LOG` takes precedence over
/// `default_level` (e.g. `"warn"`, `"routelens_analysis=debug"`). Calling this
/// twice is harmless; the second call is ignored.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
