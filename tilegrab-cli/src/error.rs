//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::io;
use std::process;

use tilegrab::config::ConfigFileError;
use tilegrab::coord::{CoordError, ParseError};
use tilegrab::provider::FetchError;
use tilegrab::template::TemplateError;

/// Exit code for a run that lost at least one tile or was interrupted.
pub const EXIT_TILES_FAILED: i32 = 2;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Configuration file could not be read or has a bad value
    ConfigFile(ConfigFileError),
    /// Bounding box or zoom text is malformed
    InvalidInput(ParseError),
    /// URL template is malformed
    Template(TemplateError),
    /// Tile enumeration rejected the request
    Enumerate(CoordError),
    /// Failed to create the HTTP client
    HttpClient(FetchError),
    /// Failed to write command output
    Output(io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::InvalidInput(_) | CliError::Enumerate(_) => {
                eprintln!();
                eprintln!("Expected formats:");
                eprintln!("  --bbox  left,bottom,right,top in decimal degrees (e.g. 19.79,49.97,20.22,50.13)");
                eprintln!("  --zooms comma-separated levels between 0 and 30 (e.g. 10,11,12)");
                eprintln!("Boxes crossing the antimeridian must be split in two.");
            }
            CliError::Template(_) => {
                eprintln!();
                eprintln!("Supported placeholders: {{x}} {{y}} {{z}} {{q}} {{bbox}}");
                eprintln!("  e.g. https://tile.example.org/{{z}}/{{x}}/{{y}}.png");
            }
            CliError::ConfigFile(_) => {
                eprintln!();
                eprintln!(
                    "Check {} or pass --config <path>",
                    tilegrab::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            CliError::Template(e) => write!(f, "{}", e),
            CliError::Enumerate(e) => write!(f, "Cannot enumerate tiles: {}", e),
            CliError::HttpClient(e) => write!(f, "{}", e),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::InvalidInput(e) => Some(e),
            CliError::Template(e) => Some(e),
            CliError::Enumerate(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::InvalidInput(e)
    }
}

impl From<TemplateError> for CliError {
    fn from(e: TemplateError) -> Self {
        CliError::Template(e)
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::Enumerate(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::HttpClient(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Output(e)
    }
}
