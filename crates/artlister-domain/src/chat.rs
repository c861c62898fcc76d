//! Chat-style prompt types
//!
//! A model request is always a system message carrying the instruction
//! template followed by a user message carrying the extracted document text.

use std::time::Duration;

/// Sampling temperature sent with every request
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Upper bound on generated tokens
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Request timeout for a single completion (3 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatRole {
    /// Instruction message
    System,
    /// End-user content
    User,
}

impl ChatRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
        }
    }
}

/// A single message in a chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who is speaking
    pub role: ChatRole,
    /// Message body, passed through verbatim
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Fixed generation parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of output tokens
    pub max_tokens: u32,
    /// Whether to request a streamed response
    pub stream: bool,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            stream: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// A complete model request: ordered messages plus parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Messages in the order they are sent
    pub messages: Vec<ChatMessage>,
    /// Generation parameters
    pub params: GenerationParams,
}

impl ChatRequest {
    /// Build the two-message request `{system: template, user: text}`
    pub fn new(template: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(template), ChatMessage::user(text)],
            params: GenerationParams::default(),
        }
    }

    /// Total characters across all messages
    pub fn content_len(&self) -> usize {
        self.messages.iter().map(|m| m.content.chars().count()).sum()
    }
}
