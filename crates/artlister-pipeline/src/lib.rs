//! ArtLister Pipeline
//!
//! Turns one office document into an inventory of items using an LLM.
//!
//! # Overview
//!
//! The pipeline extracts the document's text, sends it to a language model
//! together with a fixed instruction template, strips any markdown fencing
//! from the answer, validates it as a JSON inventory and persists the result
//! twice: as pretty-printed JSON and as a one-sheet spreadsheet.
//!
//! # Architecture
//!
//! ```text
//! Document → TextExtractor → PromptTemplate → ChatModel → sanitize
//!          → validate_inventory → ArtifactWriter (JSON, XLSX)
//! ```
//!
//! Every stage reports through a [`ProcessingSession`]: status text, a
//! progress percentage and an ordered, timestamped log that observers can
//! subscribe to.
//!
//! # Example Usage
//!
//! ```no_run
//! use artlister_pipeline::{Pipeline, PipelineConfig, ProcessingSession};
//! use artlister_convert::MarkdownConverter;
//! use artlister_llm::DeepSeekProvider;
//! use artlister_domain::ApiKey;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = DeepSeekProvider::default_endpoint()?;
//! let pipeline = Pipeline::new(MarkdownConverter::new(), model, PipelineConfig::default());
//!
//! let mut session = ProcessingSession::new()
//!     .with_observer(|u: &artlister_pipeline::SessionUpdate| println!("{:>3}% {}", u.percent, u.entry));
//!
//! let outcome = pipeline.run(Path::new("script.docx"), &ApiKey::new("sk-..."), &mut session)?;
//! println!("Spreadsheet: {}", outcome.spreadsheet.path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod inventory;
mod naming;
mod pipeline;
mod prompt;
mod sanitize;
mod session;
mod writer;
pub mod xlsx;


pub use config::{
    resolve, OutputConfig, PipelineConfig, DEFAULT_EXCEL_FILENAME, DEFAULT_JSON_FILENAME,
    DEFAULT_OUTPUT_DIR, DEFAULT_PROMPT_PATH,
};
pub use error::PipelineError;
pub use inventory::{validate_inventory, ItemRecord, ValidatedInventory, EXPECTED_KEY};
pub use naming::{candidate_path, create_unique};
pub use pipeline::{Pipeline, RunOutcome};
pub use prompt::{PromptTemplate, DEFAULT_PROMPT};
pub use sanitize::sanitize_response;
pub use session::{
    ChannelObserver, FailureReport, LogEntry, ProcessingSession, SessionObserver, SessionUpdate,
    Stage,
};
pub use writer::{spreadsheet_columns, ArtifactKind, ArtifactWriter, OutputArtifact};
