//! ArtLister Domain Layer
//!
//! Core vocabulary shared by every ArtLister crate. Like the rest of the
//! domain layer it has no external dependencies: it only defines the value
//! types that cross crate boundaries and the trait interfaces that
//! infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **ChatRequest**: the two-message prompt plus fixed generation parameters
//! - **ApiKey**: a per-call credential whose `Debug` output is redacted
//! - **ChatModel**: anything that can turn a `ChatRequest` into raw text
//! - **TextExtractor**: anything that can turn a document into plain text

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod credential;
pub mod traits;

// Re-exports for convenience
pub use chat::{ChatMessage, ChatRequest, ChatRole, GenerationParams};
pub use credential::ApiKey;
pub use traits::{ChatModel, TextExtractor};
