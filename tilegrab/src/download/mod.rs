//! Sequential tile download loop.
//!
//! [`TileDownloader`] walks an enumerated tile sequence one tile at a time:
//! render the request URL, fetch it through the injected [`HttpClient`],
//! write it into the [`TileStore`], update the caller's [`DownloadStats`],
//! then pause before the next tile.
//!
//! A failed tile is logged and counted; the loop moves on. Cancellation is
//! cooperative via a shared flag checked before each tile.

mod config;
mod stats;

pub use config::{DownloadConfig, DEFAULT_WAIT_MS};
pub use stats::DownloadStats;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::coord::TileId;
use crate::provider::{FetchError, HttpClient, ReqwestClient};
use crate::store::{StoreError, TileStore};
use crate::template::UrlTemplate;

/// Errors for a single tile.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The tile could not be fetched
    #[error("Fetch failed for {tile}: {source}")]
    Fetch { tile: TileId, source: FetchError },

    /// The tile was fetched but could not be written
    #[error("Save failed for {tile}: {source}")]
    Store { tile: TileId, source: StoreError },
}

/// Result of one tile, as reported to the progress callback.
#[derive(Debug)]
pub enum TileOutcome<'a> {
    Saved(&'a Path),
    Failed(&'a DownloadError),
}

/// Progress callback invoked after every tile.
///
/// # Arguments
///
/// * `tile` - The tile just processed
/// * `outcome` - Where it was saved, or why it failed
/// * `stats` - Counters after this tile
pub type ProgressCallback = Box<dyn Fn(&TileId, TileOutcome<'_>, &DownloadStats) + Send + Sync>;

/// Fetches tiles one by one and saves them to disk.
pub struct TileDownloader<C: HttpClient> {
    client: C,
    template: UrlTemplate,
    store: TileStore,
    wait: Duration,
    retries: u32,
    cancel: Arc<AtomicBool>,
    progress: Option<ProgressCallback>,
}

impl TileDownloader<ReqwestClient> {
    /// Builds a downloader with a real HTTP client from configuration.
    pub fn from_config(template: UrlTemplate, config: &DownloadConfig) -> Result<Self, FetchError> {
        let client = ReqwestClient::with_options(config.timeout, &config.user_agent)?;
        Ok(Self::with_config(client, template, config))
    }
}

impl<C: HttpClient> TileDownloader<C> {
    /// Creates a downloader with no wait and no retries.
    pub fn new(client: C, template: UrlTemplate, store: TileStore) -> Self {
        Self {
            client,
            template,
            store,
            wait: Duration::ZERO,
            retries: 0,
            cancel: Arc::new(AtomicBool::new(false)),
            progress: None,
        }
    }

    /// Creates a downloader with an injected client and settings from `config`.
    pub fn with_config(client: C, template: UrlTemplate, config: &DownloadConfig) -> Self {
        let store = TileStore::new(&config.output_dir).with_extension(&config.extension);
        Self::new(client, template, store)
            .with_wait(config.wait)
            .with_retries(config.retries)
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Shares a cancellation flag; setting it stops the run before the next tile.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Fetches and saves a single tile, retrying transient fetch failures.
    pub fn fetch_tile(&self, tile: &TileId) -> Result<PathBuf, DownloadError> {
        let url = self.template.render(tile);
        let data = self.fetch_with_retries(tile, &url)?;

        self.store
            .save(tile, &data)
            .map_err(|source| DownloadError::Store { tile: *tile, source })
    }

    fn fetch_with_retries(&self, tile: &TileId, url: &str) -> Result<Vec<u8>, DownloadError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url) {
                Ok(data) => {
                    debug!(tile = %tile, url, attempt, bytes = data.len(), "Fetched tile");
                    return Ok(data);
                }
                Err(e) if attempt <= self.retries && e.is_retryable() && !self.is_cancelled() => {
                    debug!(tile = %tile, url, attempt, error = %e, "Fetch failed, retrying");
                    thread::sleep(self.wait);
                }
                Err(source) => {
                    return Err(DownloadError::Fetch {
                        tile: *tile,
                        source,
                    })
                }
            }
        }
    }

    /// Downloads every tile in `tiles`, updating `stats` as it goes.
    ///
    /// Returns when the sequence is exhausted or the cancel flag is set.
    /// Individual failures never abort the run.
    pub fn run<I>(&self, tiles: I, stats: &mut DownloadStats)
    where
        I: IntoIterator<Item = TileId>,
    {
        info!(
            template = %self.template,
            output = %self.store.root().display(),
            total = stats.total,
            "Starting download"
        );

        let mut tiles = tiles.into_iter().peekable();
        while let Some(tile) = tiles.next() {
            if self.is_cancelled() {
                stats.cancelled = true;
                info!(processed = stats.processed(), "Download cancelled");
                break;
            }

            match self.fetch_tile(&tile) {
                Ok(path) => {
                    stats.succeeded += 1;
                    self.report(&tile, TileOutcome::Saved(&path), stats);
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!(tile = %tile, error = %e, "Tile failed");
                    self.report(&tile, TileOutcome::Failed(&e), stats);
                }
            }

            if !self.wait.is_zero() && tiles.peek().is_some() {
                thread::sleep(self.wait);
            }
        }

        info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            elapsed_ms = stats.elapsed().as_millis() as u64,
            "Download finished"
        );
    }

    fn report(&self, tile: &TileId, outcome: TileOutcome<'_>, stats: &DownloadStats) {
        if let Some(progress) = &self.progress {
            progress(tile, outcome, stats);
        }
    }
}
