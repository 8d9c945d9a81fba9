//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;
use std::time::Duration;

use tilegrab::config::ConfigFile;
use tilegrab::coord::{parse_bounding_box, parse_zooms, tiles, Tiles};
use tilegrab::download::DownloadConfig;

use crate::error::CliError;

/// Download settings given on the command line; `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct DownloadOverrides {
    pub output: Option<PathBuf>,
    pub extension: Option<String>,
    pub wait_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

/// Resolve download settings: CLI flag, then config file, then built-in default.
pub fn resolve_download_config(
    overrides: &DownloadOverrides,
    config: &ConfigFile,
) -> Result<DownloadConfig, CliError> {
    let mut resolved = config.download_config();

    if let Some(output) = &overrides.output {
        resolved.output_dir = output.clone();
    }
    if let Some(extension) = &overrides.extension {
        resolved = resolved.with_extension(extension.trim_start_matches('.'));
    }
    if let Some(wait_ms) = overrides.wait_ms {
        resolved = resolved.with_wait(Duration::from_millis(wait_ms));
    }
    if let Some(timeout_secs) = overrides.timeout_secs {
        if timeout_secs == 0 {
            return Err(CliError::Config(
                "--timeout must be at least 1 second".to_string(),
            ));
        }
        resolved = resolved.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = overrides.retries {
        resolved = resolved.with_retries(retries);
    }

    Ok(resolved)
}

/// Parse `--bbox` and `--zooms` text and enumerate the covering tiles.
pub fn enumerate_area(bbox: &str, zooms: &str) -> Result<Tiles, CliError> {
    let bbox = parse_bounding_box(bbox)?;
    let zooms = parse_zooms(zooms)?;
    Ok(tiles(&bbox, &zooms)?)
}
