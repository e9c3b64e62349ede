//! `tracing` subscriber setup for the binaries
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// The default filter for the given `-v`/`-q` counts; `RUST_LOG` overrides
/// it
pub fn default_level(verbose: u8, quiet: u8) -> &'static str {
    match (verbose, quiet) {
        (_, 2..) => "error",
        (_, 1) => "warn",
        (3.., _) => "trace",
        (2, _) => "debug",
        (1, _) => "info",
        _ => "warn",
    }
}

fn env_filter(verbose: u8, quiet: u8) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose, quiet)))
        .map_err(|e| LoggingError::Filter(e.to_string()))
}

/// Logs to stderr
pub fn init(verbose: u8, quiet: u8) -> Result<(), LoggingError> {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, quiet)?)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already set, continuing");
    }
    Ok(())
}

/// Logs to `path`, truncating it.  For programs that own the terminal.
pub fn init_file(path: &Path, verbose: u8) -> Result<(), LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose.max(1), 0)?)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already set, continuing");
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid RUST_LOG / log filter: {0}")]
    Filter(String),
    #[error("failed to open log file {path}")]
    Open {
        path: String,
        source: std::io::Error,
    },
}
