//! Logging infrastructure for tilegrab.
//!
//! Provides structured logging with file output and optional console output:
//! - Writes to the configured log file (cleared on session start)
//! - Optionally mirrors to stderr, off when a progress bar owns the terminal
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors setting up logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory or file could not be prepared
    #[error("Failed to prepare log file '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// A global subscriber was already installed
    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Creates the log file's directory and truncates the file.
///
/// Returns `(directory, file name)` for the appender.
pub fn prepare_log_file(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let io_err = |source| LoggingError::Io {
        path: log_path.to_path_buf(),
        source,
    };

    let dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file = log_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| io_err(io::Error::new(io::ErrorKind::InvalidInput, "missing file name")))?;

    fs::create_dir_all(&dir).map_err(io_err)?;

    // Clear previous session's log
    fs::write(dir.join(&file), "").map_err(io_err)?;

    Ok((dir, file))
}

/// Builds the level filter: `RUST_LOG` if set, otherwise `info` (or `debug`
/// when `debug_mode` is on).
pub fn env_filter(debug_mode: bool) -> EnvFilter {
    if debug_mode {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging system.
///
/// # Arguments
///
/// * `log_path` - Log file, truncated at start
/// * `console` - Also write human-readable logs to stderr
/// * `debug_mode` - Force debug level regardless of `RUST_LOG`
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
pub fn init_logging(
    log_path: &Path,
    console: bool,
    debug_mode: bool,
) -> Result<LoggingGuard, LoggingError> {
    let (dir, file) = prepare_log_file(log_path)?;

    // Create file appender with non-blocking writer
    let file_appender = tracing_appender::rolling::never(&dir, &file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let console_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter(debug_mode))
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("logs").join("tilegrab.log");

        let (dir, file) = prepare_log_file(&log_path).unwrap();

        assert_eq!(dir, temp.path().join("logs"));
        assert_eq!(file, "tilegrab.log");
        assert!(log_path.exists());
    }

    #[test]
    fn test_prepare_clears_existing_log() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("tilegrab.log");
        fs::write(&log_path, "old session").unwrap();

        prepare_log_file(&log_path).unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_prepare_fails_under_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = prepare_log_file(&blocker.join("tilegrab.log")).unwrap_err();
        assert!(matches!(err, LoggingError::Io { .. }));
    }

    #[test]
    fn test_debug_mode_filter() {
        assert_eq!(env_filter(true).to_string(), "debug");
    }
}
