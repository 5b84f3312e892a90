use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Environment variable naming a settings file to use instead of the default one.
pub const CONFIG_ENV: &str = "PHONEBOOK_CONFIG";
/// Settings file looked up in the working directory when CONFIG_ENV is unset.
pub const DEFAULT_CONFIG_FILE: &str = "phonebook.json";

const DEFAULT_EXTENSION: &str = "txt";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    #[serde(rename = "logLevel")]
    level: Option<String>,
    #[serde(rename = "logFile")]
    log_file: Option<String>,
    extension: Option<String>,
}

/// Runtime settings.  Everything else about a session is chosen interactively.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    log_level: LevelFilter,
    log_file: Option<PathBuf>,
    extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            log_level: LevelFilter::Warn,
            log_file: None,
            extension: String::from(DEFAULT_EXTENSION),
        }
    }
}

impl Settings {
    /// Load settings from $PHONEBOOK_CONFIG, or ./phonebook.json if it exists, or fall back to
    /// the defaults.
    pub fn load() -> Result<Self> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).is_file() {
            return Self::from_file(DEFAULT_CONFIG_FILE);
        }

        Ok(Self::default())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let file: SettingsFile = serde_json::from_str(data)?;
        let mut settings = Settings::default();

        if let Some(level) = file.level {
            settings.log_level = LevelFilter::from_str(&level)
                .map_err(|_| ConfigError::LogLevel(level.clone()))?;
        }

        settings.log_file = file.log_file.map(PathBuf::from);

        if let Some(extension) = file.extension {
            let extension = extension.trim_start_matches('.');
            if extension.is_empty() {
                return Err(ConfigError::Extension);
            }
            settings.extension = String::from(extension);
        }

        Ok(settings)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] io::Error),
    #[error("Invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown log level: {0}")]
    LogLevel(String),
    #[error("The book file extension can't be empty")]
    Extension,
}
