//! tilegrab CLI - Command-line interface
//!
//! This binary provides a command-line interface to the tilegrab library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::common::DownloadOverrides;
use commands::download::DownloadArgs;
use commands::list::ListArgs;
use error::EXIT_TILES_FAILED;

#[derive(Parser)]
#[command(name = "tilegrab")]
#[command(version, about = "Download slippy-map tiles covering a bounding box", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every tile covering a bounding box into <output>/z/x/y.<ext>
    Download {
        /// Tile URL template with {x}, {y}, {z}, {q} or {bbox} placeholders
        #[arg(long)]
        url: String,

        /// Comma-separated zoom levels (e.g. 10,11,12)
        #[arg(long)]
        zooms: String,

        /// Bounding box as left,bottom,right,top in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,

        /// Pause between tile requests in milliseconds [config default: 1000]
        #[arg(long)]
        wait: Option<u64>,

        /// Output directory for the z/x/y tree [config default: .]
        #[arg(long)]
        output: Option<PathBuf>,

        /// File extension for saved tiles [config default: png]
        #[arg(long)]
        ext: Option<String>,

        /// HTTP timeout in seconds [config default: 30]
        #[arg(long)]
        timeout: Option<u64>,

        /// Extra attempts for transient failures [config default: 0]
        #[arg(long)]
        retries: Option<u32>,

        /// Configuration file [default: ~/.tilegrab/config.ini]
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable debug-level logging
        #[arg(long)]
        debug: bool,
    },

    /// Print the tiles covering a bounding box, one z/x/y per line
    List {
        /// Comma-separated zoom levels (e.g. 10,11,12)
        #[arg(long)]
        zooms: String,

        /// Bounding box as left,bottom,right,top in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,

        /// Append each tile's bounds as left,bottom,right,top
        #[arg(long)]
        bounds: bool,

        /// Print only the number of tiles
        #[arg(long, conflicts_with = "bounds")]
        count: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Download {
            url,
            zooms,
            bbox,
            wait,
            output,
            ext,
            timeout,
            retries,
            config,
            debug,
        } => commands::download::run(DownloadArgs {
            url,
            zooms,
            bbox,
            config,
            debug,
            overrides: DownloadOverrides {
                output,
                extension: ext,
                wait_ms: wait,
                timeout_secs: timeout,
                retries,
            },
        })
        .map(|stats| stats.has_failures() || stats.cancelled),
        Commands::List {
            zooms,
            bbox,
            bounds,
            count,
        } => commands::list::run(ListArgs {
            zooms,
            bbox,
            bounds,
            count,
        })
        .map(|_| false),
    };

    match result {
        Ok(false) => {}
        Ok(true) => process::exit(EXIT_TILES_FAILED),
        Err(e) => e.exit(),
    }
}
