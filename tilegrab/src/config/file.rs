//! Configuration file handling for ~/.tilegrab/config.ini.
//!
//! Loads and saves user configuration with sensible defaults. Every key is
//! optional; anything missing keeps its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::download::{DownloadConfig, DEFAULT_WAIT_MS};
use crate::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::store::DEFAULT_EXTENSION;

/// Default log file name inside the config directory.
pub const DEFAULT_LOG_FILE: &str = "tilegrab.log";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    Write(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    Directory(std::io::Error),
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    pub wait_ms: u64,
    pub timeout_secs: u64,
    pub retries: u32,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub extension: String,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            wait_ms: DEFAULT_WAIT_MS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retries: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: config_directory().join(DEFAULT_LOG_FILE),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub download: DownloadSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.tilegrab/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Build configuration from already-parsed INI content.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("download")) {
            let download = &mut config.download;
            if let Some(v) = section.get("wait_ms") {
                download.wait_ms = parse_number("download", "wait_ms", v)?;
            }
            if let Some(v) = section.get("timeout_secs") {
                download.timeout_secs = parse_number("download", "timeout_secs", v)?;
                if download.timeout_secs == 0 {
                    return Err(invalid("download", "timeout_secs", v, "must be at least 1"));
                }
            }
            if let Some(v) = section.get("retries") {
                download.retries = parse_number("download", "retries", v)?;
            }
            if let Some(v) = section.get("user_agent") {
                let v = v.trim();
                if v.is_empty() {
                    return Err(invalid("download", "user_agent", v, "must not be empty"));
                }
                download.user_agent = v.to_string();
            }
            if let Some(v) = section.get("output_dir") {
                download.output_dir = expand_tilde(v.trim());
            }
            if let Some(v) = section.get("extension") {
                download.extension = v.trim().trim_start_matches('.').to_string();
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(v) = section.get("file") {
                config.logging.file = expand_tilde(v.trim());
            }
        }

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::Directory)?;
        }

        let d = &self.download;
        let mut ini = Ini::new();
        ini.with_section(Some("download"))
            .set("wait_ms", d.wait_ms.to_string())
            .set("timeout_secs", d.timeout_secs.to_string())
            .set("retries", d.retries.to_string())
            .set("user_agent", d.user_agent.as_str())
            .set("output_dir", d.output_dir.to_string_lossy())
            .set("extension", d.extension.as_str());
        ini.with_section(Some("logging"))
            .set("file", self.logging.file.to_string_lossy());

        ini.write_to_file(path)
            .map_err(|e| ConfigFileError::Write(e.to_string()))
    }

    /// Runtime download settings derived from the file.
    pub fn download_config(&self) -> DownloadConfig {
        let d = &self.download;
        DownloadConfig::new(&d.output_dir)
            .with_extension(d.extension.clone())
            .with_wait(Duration::from_millis(d.wait_ms))
            .with_timeout(Duration::from_secs(d.timeout_secs))
            .with_retries(d.retries)
            .with_user_agent(d.user_agent.clone())
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(
    section: &str,
    key: &str,
    value: &str,
) -> Result<T, ConfigFileError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(section, key, value, "expected a non-negative integer"))
}

fn expand_tilde(value: &str) -> PathBuf {
    match value.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(value),
    }
}

/// Get the path to the config directory (~/.tilegrab).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilegrab")
}

/// Get the path to the config file (~/.tilegrab/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.download.wait_ms, 1000);
        assert_eq!(config.download.timeout_secs, 30);
        assert_eq!(config.download.retries, 0);
        assert_eq!(config.download.user_agent, "tms-downloader");
        assert_eq!(config.download.extension, "png");
        assert!(config.logging.file.ends_with(".tilegrab/tilegrab.log"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(
            &path,
            "[download]\nwait_ms = 250\nretries = 2\nextension = .jpg\noutput_dir = /srv/tiles\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.download.wait_ms, 250);
        assert_eq!(config.download.retries, 2);
        assert_eq!(config.download.extension, "jpg");
        assert_eq!(config.download.output_dir, PathBuf::from("/srv/tiles"));
        assert_eq!(config.download.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_number_rejected() {
        let ini = Ini::load_from_str("[download]\nwait_ms = soon\n").unwrap();
        let err = ConfigFile::from_ini(&ini).unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, .. } => {
                assert_eq!(section, "download");
                assert_eq!(key, "wait_ms");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let ini = Ini::load_from_str("[download]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            ConfigFile::from_ini(&ini),
            Err(ConfigFileError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.download.wait_ms = 0;
        config.download.user_agent = "tilegrab-test".to_string();
        config.logging.file = temp.path().join("out.log");
        config.save_to(&path).unwrap();

        let reloaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_download_config_conversion() {
        let mut config = ConfigFile::default();
        config.download.wait_ms = 50;
        config.download.retries = 4;

        let download = config.download_config();
        assert_eq!(download.wait, Duration::from_millis(50));
        assert_eq!(download.retries, 4);
        assert_eq!(download.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_tilde_expansion() {
        let path = expand_tilde("~/tiles");
        assert!(path.ends_with("tiles"));
        assert!(!path.starts_with("~"));
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}
