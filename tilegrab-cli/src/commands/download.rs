//! Download command - fetch every tile covering a bounding box.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tilegrab::download::{DownloadStats, ProgressCallback, TileDownloader, TileOutcome};
use tilegrab::template::UrlTemplate;
use tracing::info;

use super::common::{enumerate_area, resolve_download_config, DownloadOverrides};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the download command.
pub struct DownloadArgs {
    pub url: String,
    pub zooms: String,
    pub bbox: String,
    pub config: Option<PathBuf>,
    pub debug: bool,
    pub overrides: DownloadOverrides,
}

/// Run the download command.
///
/// Returns the final counters; the caller decides the exit code from them.
pub fn run(args: DownloadArgs) -> Result<DownloadStats, CliError> {
    // Validate all input before touching the network or disk
    let sequence = enumerate_area(&args.bbox, &args.zooms)?;
    let template = UrlTemplate::new(args.url)?;

    // The progress bar owns stderr on a terminal; keep logs in the file then
    let interactive = atty::is(atty::Stream::Stderr);
    let runner = CliRunner::new(args.config.as_deref(), !interactive, args.debug)?;
    runner.log_startup("download");

    let config = resolve_download_config(&args.overrides, runner.config())?;
    let total = sequence.total();

    println!("Downloading tiles:");
    println!("  Template: {}", template);
    println!("  Zooms:    {}", args.zooms);
    println!("  Bbox:     {}", args.bbox);
    println!("  Tiles:    {}", total);
    println!("  Output:   {}", config.output_dir.display());
    println!();

    // Set up signal handler for graceful shutdown
    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_clone.store(true, Ordering::SeqCst);
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    let bar = interactive.then(|| progress_bar(total));
    let progress = match &bar {
        Some(bar) => bar_callback(bar.clone()),
        None => line_callback(),
    };

    let downloader = TileDownloader::from_config(template, &config)?
        .with_cancel_flag(cancel)
        .with_progress(progress);

    let mut stats = DownloadStats::new(total);
    downloader.run(sequence, &mut stats);

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let summary = stats.summary();
    if stats.has_failures() || stats.cancelled {
        println!("{}", style(summary).yellow());
    } else {
        println!("{}", style(summary).green());
    }
    info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        cancelled = stats.cancelled,
        "Download command complete"
    );

    Ok(stats)
}

fn progress_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    bar.set_style(style);
    bar
}

/// Progress bar updates, with failed tiles printed above the bar.
fn bar_callback(bar: ProgressBar) -> ProgressCallback {
    Box::new(move |tile, outcome, stats| {
        if let TileOutcome::Failed(e) = outcome {
            bar.println(format!("{} {}: {}", style("failed").red(), tile, e));
        }
        bar.set_position(stats.processed());
        bar.set_message(format!("ok {} failed {}", stats.succeeded, stats.failed));
    })
}

/// Plain status lines for non-terminal output.
fn line_callback() -> ProgressCallback {
    Box::new(|_, _, stats| {
        println!("{}", stats.status_line());
    })
}
