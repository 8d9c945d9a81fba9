//! CLI runner for common setup.
//!
//! Encapsulates config loading and logging initialization so command handlers
//! start from a ready environment.

use std::path::Path;

use tilegrab::config::ConfigFile;
use tilegrab::logging::{init_logging, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file; the default location when `None`
    /// * `console_logs` - Mirror logs to stderr (off while a progress bar is drawn)
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    pub fn new(
        config_path: Option<&Path>,
        console_logs: bool,
        debug_mode: bool,
    ) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?,
        };

        let logging_guard = init_logging(&config.logging.file, console_logs, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tilegrab v{}", tilegrab::VERSION);
        info!("tilegrab CLI: {} command", command);
        info!(log_file = %self.config.logging.file.display(), "Logging initialized");
    }
}
