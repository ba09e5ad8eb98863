use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::STARTER_TITLES;
use crate::undo::{HistoryConfig, DEFAULT_MAX_DEPTH};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Record undo history for edits
    pub undo_enabled: bool,
    /// Maximum number of undo steps kept (0 = unlimited)
    pub max_undo_depth: usize,
    /// Titles of the items a new document starts with
    pub starter_items: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_enabled: true,
            max_undo_depth: DEFAULT_MAX_DEPTH,
            starter_items: STARTER_TITLES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl EditorConfig {
    /// Load configuration with priority: config file > defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// History settings derived from this configuration.
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig::new(self.max_undo_depth)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Cannot read editor settings at '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Invalid editor settings in '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError(_, e) => Some(e),
            ConfigError::ParseError(_, e) => Some(e),
        }
    }
}
