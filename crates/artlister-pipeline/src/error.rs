//! Error types for the processing pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a processing run.
///
/// Each variant belongs to exactly one stage; none are retried.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Prompt template or output configuration is missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be converted to text
    #[error("Document conversion failed: {0}")]
    Conversion(String),

    /// Transport failure, timeout or non-success status from the model service
    #[error("Model call failed: {0}")]
    ModelCall(String),

    /// Model response is not a usable inventory
    #[error("Invalid model response: {message}")]
    Parse {
        /// What was wrong with the response
        message: String,
        /// Response text exactly as returned by the model
        raw: String,
        /// Response text after fence stripping
        sanitized: String,
    },

    /// Artifact could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Build a parse error carrying both response texts
    pub fn parse(message: impl Into<String>, raw: &str, sanitized: &str) -> Self {
        PipelineError::Parse {
            message: message.into(),
            raw: raw.to_string(),
            sanitized: sanitized.to_string(),
        }
    }

    /// Short name of the error kind, as shown in failure reports
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "ConfigError",
            PipelineError::Conversion(_) => "ConversionError",
            PipelineError::ModelCall(_) => "ModelCallError",
            PipelineError::Parse { .. } => "ParseError",
            PipelineError::Io { .. } => "IOError",
        }
    }
}
