//! Configuration for the processing pipeline

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output directory name
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default base filename of the JSON artifact
pub const DEFAULT_JSON_FILENAME: &str = "art_list.json";

/// Default base filename of the spreadsheet artifact
pub const DEFAULT_EXCEL_FILENAME: &str = "art_list.xlsx";

/// Default prompt template location
pub const DEFAULT_PROMPT_PATH: &str = "prompt.md";

/// Where and under which names artifacts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory; created on first write if absent
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Base filename of the JSON artifact
    #[serde(default = "default_json_filename")]
    pub json_filename: String,

    /// Base filename of the spreadsheet artifact
    #[serde(default = "default_excel_filename")]
    pub excel_filename: String,
}

impl OutputConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.directory.as_os_str().is_empty() {
            return Err("output directory must not be empty".to_string());
        }
        validate_filename("json_filename", &self.json_filename)?;
        validate_filename("excel_filename", &self.excel_filename)?;
        Ok(())
    }

    /// Resolve a relative output directory against `base`
    pub fn resolved_against(&self, base: &Path) -> Self {
        Self {
            directory: resolve(base, &self.directory),
            ..self.clone()
        }
    }
}

fn validate_filename(field: &str, name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!("{} must be a bare file name, got '{}'", field, name));
    }
    match Path::new(name).file_stem() {
        Some(stem) if !stem.is_empty() => Ok(()),
        _ => Err(format!("{} has no file stem: '{}'", field, name)),
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            json_filename: default_json_filename(),
            excel_filename: default_excel_filename(),
        }
    }
}

/// Configuration for one pipeline instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Prompt template file, read fresh on every run
    #[serde(default = "default_prompt_path")]
    pub prompt_path: PathBuf,

    /// Artifact output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Create a configuration from explicit paths
    pub fn new(prompt_path: impl Into<PathBuf>, output: OutputConfig) -> Self {
        Self {
            prompt_path: prompt_path.into(),
            output,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.prompt_path.as_os_str().is_empty() {
            return Err(PipelineError::Config("prompt path must not be empty".to_string()));
        }
        self.output.validate().map_err(PipelineError::Config)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prompt_path: default_prompt_path(),
            output: OutputConfig::default(),
        }
    }
}

/// Join `path` onto `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_json_filename() -> String {
    DEFAULT_JSON_FILENAME.to_string()
}

fn default_excel_filename() -> String {
    DEFAULT_EXCEL_FILENAME.to_string()
}

fn default_prompt_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROMPT_PATH)
}
