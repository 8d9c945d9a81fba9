//! Counters for a download run.

use std::fmt;
use std::time::{Duration, Instant};

/// Progress and outcome counters for one run.
///
/// Owned by the caller and passed by `&mut` into the download loop, so a
/// progress display reads the same struct the loop updates.
#[derive(Debug, Clone)]
pub struct DownloadStats {
    /// Tiles scheduled for this run.
    pub total: u64,
    /// Tiles fetched and saved.
    pub succeeded: u64,
    /// Tiles that failed to fetch or save.
    pub failed: u64,
    /// Set when the run stopped early on request.
    pub cancelled: bool,
    started: Instant,
}

impl DownloadStats {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            cancelled: false,
            started: Instant::now(),
        }
    }

    /// Tiles attempted so far.
    pub fn processed(&self) -> u64 {
        self.succeeded + self.failed
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_complete(&self) -> bool {
        self.processed() >= self.total
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// One-line in-flight status.
    pub fn status_line(&self) -> String {
        format!(
            "Downloading...{}/{} Succeeded: {} Failed: {}",
            self.processed(),
            self.total,
            self.succeeded,
            self.failed
        )
    }

    /// Summary line printed when the run ends.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DownloadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Done: {}/{} Succeeded: {} Failed: {} Execution Time: {:.3}s",
            self.processed(),
            self.total,
            self.succeeded,
            self.failed,
            self.elapsed().as_secs_f64()
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}
