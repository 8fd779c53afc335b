//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use routelens_core::config::RoutelensConfig;

#[derive(Debug, Parser)]
#[command(
    name = "routelens",
    version,
    about = "Static route & input extractor for Express-style JavaScript/TypeScript projects",
    after_help = r#"Examples:
  routelens
  routelens ./server --format table
  routelens . --stats --middleware --output routes.json
  ROUTELENS_LOG=debug routelens ./api
"#
)]
pub struct Args {
    /// Project directory to scan.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Include aggregate statistics (json only; summary always has them).
    #[arg(long)]
    pub stats: bool,

    /// Report `app.use` / `router.use` registrations.
    #[arg(long)]
    pub middleware: bool,

    /// Config file. Defaults to `routelens.toml` in the project directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = one per core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level when ROUTELENS_LOG is unset.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Summary,
}

impl Args {
    /// Apply flags on top of the loaded config. Flags win.
    pub fn apply_overrides(&self, config: &mut RoutelensConfig) {
        if let Some(threads) = self.threads {
            config.scan.threads = Some(threads);
        }
        if self.middleware {
            config.engine.include_middleware = Some(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["routelens"]).unwrap();
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.stats);
        assert!(!args.middleware);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "routelens",
            "api",
            "--format",
            "table",
            "--stats",
            "--threads",
            "2",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert_eq!(args.path, PathBuf::from("api"));
        assert_eq!(args.format, OutputFormat::Table);
        assert!(args.stats);
        assert_eq!(args.threads, Some(2));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Args::try_parse_from(["routelens", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let args = Args::try_parse_from(["routelens", "--middleware", "--threads", "3"]).unwrap();
        let mut config = RoutelensConfig::from_toml(
            "[scan]\nthreads = 8\n[engine]\ninclude_middleware = false\n",
        )
        .unwrap();
        args.apply_overrides(&mut config);
        assert_eq!(config.scan.threads, Some(3));
        assert_eq!(config.engine.include_middleware, Some(true));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["routelens"]).unwrap();
        let mut config = RoutelensConfig::from_toml("[scan]\nthreads = 8\n").unwrap();
        args.apply_overrides(&mut config);
        assert_eq!(config.scan.threads, Some(8));
        assert_eq!(config.engine.include_middleware, None);
    }
}
