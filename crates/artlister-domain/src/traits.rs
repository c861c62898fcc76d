//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the processing pipeline and
//! its collaborators. Implementations live in other crates.

use crate::{ApiKey, ChatRequest};
use std::path::Path;

/// Trait for language-model clients
///
/// Implemented by the infrastructure layer (artlister-llm)
pub trait ChatModel {
    /// Error type for model calls
    type Error;

    /// Send one non-streaming completion request and return the text of
    /// the single completion. Implementations make exactly one attempt.
    fn complete(&self, request: &ChatRequest, api_key: &ApiKey) -> Result<String, Self::Error>;

    /// Model identifier, used for logging
    fn model_name(&self) -> &str;
}

/// Trait for converting a source document into plain or markdown text
///
/// Implemented by the infrastructure layer (artlister-convert)
pub trait TextExtractor {
    /// Error type for conversion
    type Error;

    /// Convert the document at `path` into text
    fn extract(&self, path: &Path) -> Result<String, Self::Error>;
}
