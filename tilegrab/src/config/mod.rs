//! User configuration.
//!
//! Settings are read from an INI file; command-line flags override them and
//! anything unset in both falls back to the defaults in
//! [`DownloadConfig`](crate::download::DownloadConfig).

mod file;

pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, DownloadSettings,
    LoggingSettings, DEFAULT_LOG_FILE,
};
