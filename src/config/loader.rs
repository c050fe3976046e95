//! Configuration file loader.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{AlertsConfig, IndexPolicy, PaletteEntry, CONFIG_VERSION};
use crate::alert::Rule;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".chat-alerts.toml";

/// Persistence collaborator for the rule list.
pub trait RuleStore {
    /// Load the saved rules.
    ///
    /// # Errors
    ///
    /// Returns an error if stored rules exist but cannot be read.
    fn load(&self) -> Result<Vec<Rule>, ConfigError>;

    /// Persist the rules, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be written.
    fn save(&self, rules: &[Rule]) -> Result<(), ConfigError>;
}

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .chat-alerts.toml
        search_paths.push(PathBuf::from(LOCAL_CONFIG_FILE));

        // 2. User config directory: ~/.config/chat-alerts/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("chat-alerts").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load_config(&self) -> Result<AlertsConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(AlertsConfig::default())
    }

    /// Write `config` to the save target, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_config(&self, config: &AlertsConfig) -> Result<PathBuf, ConfigError> {
        self.write(&ConfigView {
            version: config.version,
            index_policy: config.index_policy,
            palette: &config.palette,
            alerts: &config.alerts,
        })
    }

    fn write(&self, view: &ConfigView<'_>) -> Result<PathBuf, ConfigError> {
        let path = self.save_path().ok_or(ConfigError::NoSavePath)?;
        let content = toml::to_string_pretty(view).map_err(ConfigError::SerializeError)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        }
        std::fs::write(&path, content).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), alerts = view.alerts.len(), "Saved config file");
        Ok(path)
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &Path) -> Result<AlertsConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut config: AlertsConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
        config.normalize();
        Ok(config)
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the first config file that exists.
    #[must_use]
    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.exists()).cloned()
    }

    /// Where saves go: the existing config file, else the last search path.
    #[must_use]
    pub fn save_path(&self) -> Option<PathBuf> {
        self.find_config_file()
            .or_else(|| self.search_paths.last().cloned())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStore for ConfigLoader {
    fn load(&self) -> Result<Vec<Rule>, ConfigError> {
        Ok(self.load_config()?.alerts)
    }

    fn save(&self, rules: &[Rule]) -> Result<(), ConfigError> {
        // Global settings come from the existing file; only the rules change.
        let current = self.load_config()?;
        self.write(&ConfigView {
            version: CONFIG_VERSION,
            index_policy: current.index_policy,
            palette: &current.palette,
            alerts: rules,
        })
        .map(|_| ())
    }
}

/// Borrowed serialization shape of [`AlertsConfig`].
#[derive(Serialize)]
struct ConfigView<'a> {
    version: u32,
    index_policy: IndexPolicy,
    palette: &'a [PaletteEntry],
    alerts: &'a [Rule],
}

/// Errors that can occur during configuration loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(toml::ser::Error),

    #[error("Failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No location to save the config file")]
    NoSavePath,
}
