//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use artlister_llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use artlister_pipeline::{resolve, OutputConfig, PipelineConfig, DEFAULT_PROMPT_PATH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the configuration file in the application directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Application configuration, stored as `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Artifact output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Model service settings
    #[serde(default)]
    pub model: ModelSettings,

    /// Prompt template settings
    #[serde(default)]
    pub prompt: PromptSettings,
}

/// Model service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
}

/// Prompt template settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptSettings {
    /// Template file
    #[serde(default = "default_prompt_path")]
    pub path: PathBuf,
}

impl AppConfig {
    /// Directory holding the executable, or the working directory if it
    /// cannot be determined.
    pub fn app_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::app_dir().join(CONFIG_FILENAME)
    }

    /// Directory that relative paths in `config_path` resolve against.
    pub fn base_dir(config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Load configuration from `path`.
    ///
    /// A missing or unreadable file yields the defaults; a file that cannot
    /// be parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "Loaded configuration");
                Self::from_toml(&contents)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file not readable, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CliError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Prompt template path resolved against `base`.
    pub fn prompt_path(&self, base: &Path) -> PathBuf {
        resolve(base, &self.prompt.path)
    }

    /// Pipeline configuration with every relative path resolved against `base`.
    pub fn pipeline_config(&self, base: &Path) -> PipelineConfig {
        PipelineConfig::new(self.prompt_path(base), self.output.resolved_against(base))
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            path: default_prompt_path(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_prompt_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROMPT_PATH)
}
