/*!
 * Application configuration.
 *
 * Handles loading, validating and saving configuration settings.
 */

use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::probe::{Probe, DEFAULT_FFPROBE};

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Publication language code used for book names (e.g. "S", "E")
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory holding the cached book catalogs
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// External tool settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// External tool configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolsConfig {
    // @field: ffprobe program name or path
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,

    // @field: Timeout for one ffprobe run
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffprobe: default_ffprobe(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "S".to_string()
}

fn default_ffprobe() -> String {
    DEFAULT_FFPROBE.to_string()
}

fn default_probe_timeout_secs() -> u64 {
    60
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let language = self.language.trim();
        if language.is_empty() {
            return Err(anyhow!("Language code must not be empty"));
        }
        if !language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(anyhow!("Invalid language code: {}", self.language));
        }

        if self.tools.ffprobe.trim().is_empty() {
            return Err(anyhow!("ffprobe program must not be empty"));
        }

        if self.tools.probe_timeout_secs == 0 {
            return Err(anyhow!("Probe timeout must be greater than zero"));
        }

        Ok(())
    }

    /// Catalog cache directory, falling back to the user cache directory
    pub fn work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("cutup")
        })
    }

    // @creates: Probe from tool settings
    pub fn probe(&self) -> Probe {
        Probe::new(
            self.tools.ffprobe.clone(),
            Duration::from_secs(self.tools.probe_timeout_secs),
        )
    }

    /// Load a configuration file, writing a default one first when it is missing
    pub fn load_or_create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            let file = File::open(config_path)
                .context(format!("Failed to open config file: {:?}", config_path))?;

            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {:?}", config_path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", config_path);
        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {:?}", config_path))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            work_dir: None,
            tools: ToolsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
