//! Runtime configuration for the download loop.

use std::path::PathBuf;
use std::time::Duration;

use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::store::DEFAULT_EXTENSION;

/// Default pause between consecutive tile requests.
pub const DEFAULT_WAIT_MS: u64 = 1000;

/// Configuration for a [`TileDownloader`](super::TileDownloader) run.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadConfig {
    /// Root directory of the `z/x/y` tree.
    pub output_dir: PathBuf,

    /// File extension for saved tiles, without the dot.
    pub extension: String,

    /// Pause between consecutive tiles. Not applied after the last tile.
    pub wait: Duration,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// Extra attempts per tile after a failed fetch.
    pub retries: u32,

    /// User-Agent header for tile requests.
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            wait: Duration::from_millis(DEFAULT_WAIT_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retries: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl DownloadConfig {
    /// Create a new configuration writing under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Set the file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the pause between tiles.
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retries per tile.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
