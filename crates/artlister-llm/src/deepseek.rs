//! DeepSeek Provider Implementation
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint; DeepSeek's
//! hosted API is the default.
//!
//! # Features
//!
//! - Blocking HTTP communication (the pipeline is synchronous)
//! - Configurable endpoint and model
//! - Per-request timeout taken from the request's generation parameters
//! - Exactly one attempt per call, no retries
//!
//! # Examples
//!
//! ```no_run
//! use artlister_llm::DeepSeekProvider;
//! use artlister_domain::{ApiKey, ChatModel, ChatRequest};
//!
//! let provider = DeepSeekProvider::new("https://api.deepseek.com/v1", "deepseek-chat").unwrap();
//! let request = ChatRequest::new("List the props as JSON.", "a wooden chair");
//! let text = provider.complete(&request, &ApiKey::new("sk-...")).unwrap();
//! ```

use crate::LlmError;
use artlister_domain::chat::DEFAULT_TIMEOUT_SECS;
use artlister_domain::{ApiKey, ChatModel, ChatRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default DeepSeek API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// OpenAI-compatible chat completions provider
pub struct DeepSeekProvider {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl DeepSeekProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: API base URL (e.g., "https://api.deepseek.com/v1")
    /// - `model`: Model to use (e.g., "deepseek-chat")
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        })
    }

    /// Create a provider for DeepSeek's hosted API and default model
    pub fn default_endpoint() -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Full URL of the completions route
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }

    fn body<'a>(&'a self, request: &'a ChatRequest) -> CompletionRequest<'a> {
        CompletionRequest {
            model: &self.model,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: request.params.temperature,
            max_tokens: request.params.max_tokens,
            stream: request.params.stream,
        }
    }
}

/// Pull the first completion's text out of a response body
fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no choices".to_string()))?;

    choice
        .message
        .content
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("Completion has no content".to_string()))
}

fn map_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(e.to_string())
    } else {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

impl ChatModel for DeepSeekProvider {
    type Error = LlmError;

    fn complete(&self, request: &ChatRequest, api_key: &ApiKey) -> Result<String, Self::Error> {
        let url = self.completions_url();
        debug!(model = %self.model, %url, chars = request.content_len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .timeout(request.params.timeout)
            .json(&self.body(request))
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = DeepSeekProvider::new("https://api.deepseek.com/v1/", "deepseek-chat").unwrap();
        assert_eq!(provider.endpoint, "https://api.deepseek.com/v1");
        assert_eq!(provider.model_name(), "deepseek-chat");
        assert_eq!(
            provider.completions_url(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_default_endpoint() {
        let provider = DeepSeekProvider::default_endpoint().unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_request_body_shape() {
        let provider = DeepSeekProvider::default_endpoint().unwrap();
        let request = ChatRequest::new("template", "道具");
        let body = serde_json::to_value(provider.body(&request)).unwrap();

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["temperature"], 1.0);
        assert_eq!(body["max_tokens"], 4096);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "template");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "道具");
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"  {\"a\":1}\n"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_parse_completion_without_choices() {
        let result = parse_completion(r#"{"choices":[]}"#);
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_completion_null_content() {
        let result = parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#);
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_completion_garbage() {
        let result = parse_completion("<html>bad gateway</html>");
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_error_handling_unreachable_endpoint() {
        // Invalid port triggers a transport error before any network I/O
        let provider = DeepSeekProvider::new("http://localhost:99999", "deepseek-chat").unwrap();
        let result = provider.complete(&ChatRequest::new("t", "u"), &ApiKey::new("k"));

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }
}
