//! `routelens`: list the HTTP routes of a JavaScript/TypeScript project and
//! the request inputs each handler reads.
//!
//! ```bash
//! routelens                          # scan the current directory, json to stdout
//! routelens ./api --format table
//! routelens . --stats --middleware -o routes.json
//! ```

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use routelens_analysis::routes::aggregate;
use routelens_analysis::Scanner;
use routelens_cli::args::Args;
use routelens_cli::{exit_code, output};
use routelens_core::events::TracingHandler;
use routelens_core::tracing::init_tracing;
use routelens_core::{CancellationToken, RoutelensConfig};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::from(exit_code::SUCCESS),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code::for_error(&err))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = RoutelensConfig::load(&args.path, args.config.as_deref())?;
    args.apply_overrides(&mut config);
    tracing::debug!(?config, "effective config");

    let scanner = Scanner::new(config);
    let result = scanner.scan(&args.path, &TracingHandler, &CancellationToken::new())?;

    let statistics = args.stats.then(|| aggregate(&result.routes));
    let rendered = output::render(&result, statistics.as_ref(), args.format)
        .context("failed to serialize scan result")?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}
