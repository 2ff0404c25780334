//! Application configuration, read from a RON file and overridden by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use summarizer_core::{ModelKind, Theme};
use summarizer_engine::ServiceSettings;
use thiserror::Error;

use crate::cli::Cli;
use crate::platform::logging::LogDestination;

const CONFIG_DIR: &str = "summarizer";
const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Where downloads go; the working directory when unset.
    pub download_dir: Option<PathBuf>,
    pub default_model: String,
    pub log_level: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub theme: ThemePreference,
}

impl Default for AppConfig {
    fn default() -> Self {
        let service = ServiceSettings::default();
        Self {
            service_url: service.base_url,
            connect_timeout_secs: service.connect_timeout.as_secs(),
            request_timeout_secs: service.request_timeout.as_secs(),
            download_dir: None,
            default_model: ModelKind::default().as_str().to_string(),
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./summarizer.log"),
            theme: ThemePreference::Dark,
        }
    }
}

impl AppConfig {
    /// `{config_dir}/summarizer/config.ron`, or the working directory if there is no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILENAME)
    }

    /// Loads the file named on the command line (or the default file), then applies CLI overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::load_or_default(&Self::default_path())?,
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A missing file is not an error; defaults apply.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(url) = &cli.service_url {
            self.service_url = url.clone();
        }
        if let Some(dir) = &cli.download_dir {
            self.download_dir = Some(dir.clone());
        }
        if let Some(model) = cli.model {
            self.default_model = model.as_str().to_string();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_url.trim().is_empty() {
            return Err(invalid("service_url must not be empty"));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(invalid("timeouts must be at least one second"));
        }
        if ModelKind::parse(&self.default_model).is_none() {
            return Err(invalid(format!(
                "unknown default_model {:?}, expected bart or t5",
                self.default_model
            )));
        }
        if engine_logging::parse_level(&self.log_level).is_none() {
            return Err(invalid(format!("unknown log_level {:?}", self.log_level)));
        }
        Ok(())
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            base_url: self.service_url.trim().to_string(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn model(&self) -> ModelKind {
        ModelKind::parse(&self.default_model).unwrap_or_default()
    }

    pub fn level(&self) -> LevelFilter {
        engine_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn theme(&self) -> Theme {
        match self.theme {
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Light => Theme::Light,
        }
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}
