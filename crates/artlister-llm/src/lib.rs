//! ArtLister LLM Provider Layer
//!
//! Implementations of the `ChatModel` trait from `artlister-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `DeepSeekProvider`: OpenAI-compatible chat completions API (DeepSeek by default)
//!
//! # Examples
//!
//! ```
//! use artlister_llm::MockProvider;
//! use artlister_domain::{ApiKey, ChatModel, ChatRequest};
//!
//! let provider = MockProvider::new("{\"items\": []}");
//! let request = ChatRequest::new("template", "text");
//! let result = provider.complete(&request, &ApiKey::new("sk-test")).unwrap();
//! assert_eq!(result, "{\"items\": []}");
//! ```

#![warn(missing_docs)]

pub mod deepseek;

use artlister_domain::{ApiKey, ChatModel, ChatRequest};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use deepseek::{DeepSeekProvider, DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not complete within its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns a pre-configured response (or error) without making any network
/// calls. Clones share the call counter and the recorded requests.
///
/// # Examples
///
/// ```
/// use artlister_llm::{LlmError, MockProvider};
/// use artlister_domain::{ApiKey, ChatModel, ChatRequest};
///
/// let provider = MockProvider::failing(LlmError::Timeout("180s elapsed".into()));
/// let request = ChatRequest::new("template", "text");
/// assert!(provider.complete(&request, &ApiKey::new("k")).is_err());
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    outcome: Result<String, LlmError>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockProvider {
    /// Create a MockProvider that answers every request with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            outcome: Ok(response.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider that fails every request with `error`
    pub fn failing(error: LlmError) -> Self {
        Self {
            outcome: Err(error),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.recorded().last().cloned()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<ChatRequest>> {
        // A poisoned lock only means a test thread panicked mid-push
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl ChatModel for MockProvider {
    type Error = LlmError;

    fn complete(&self, request: &ChatRequest, _api_key: &ApiKey) -> Result<String, Self::Error> {
        self.recorded().push(request.clone());
        self.outcome.clone()
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
