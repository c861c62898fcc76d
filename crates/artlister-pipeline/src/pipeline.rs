//! Single-document processing pipeline

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::inventory::{validate_inventory, ValidatedInventory};
use crate::prompt::PromptTemplate;
use crate::sanitize::sanitize_response;
use crate::session::{ProcessingSession, Stage};
use crate::writer::{ArtifactWriter, OutputArtifact};
use artlister_domain::{ApiKey, ChatModel, TextExtractor};
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// How many characters of the raw response go into the session log
const RESPONSE_PREVIEW_CHARS: usize = 500;

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Id of the session that produced this outcome
    pub run_id: Uuid,
    /// The JSON artifact
    pub json: OutputArtifact,
    /// The spreadsheet artifact
    pub spreadsheet: OutputArtifact,
    /// Parsed inventory, including the resolved item-list key
    pub inventory: ValidatedInventory,
}

/// Drives one document through conversion, the model, validation and
/// persistence.
///
/// Runs are synchronous and must be serialized by the caller; the output
/// directory is the only state shared between runs.
pub struct Pipeline<E, M>
where
    E: TextExtractor,
    M: ChatModel,
{
    extractor: E,
    model: M,
    config: PipelineConfig,
    writer: ArtifactWriter,
}

impl<E, M> Pipeline<E, M>
where
    E: TextExtractor,
    M: ChatModel,
    E::Error: Display,
    M::Error: Display,
{
    /// Create a new pipeline
    pub fn new(extractor: E, model: M, config: PipelineConfig) -> Self {
        let writer = ArtifactWriter::new(config.output.clone());
        Self {
            extractor,
            model,
            config,
            writer,
        }
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process `document`, reporting through `session`.
    ///
    /// On failure the session is moved to `Failed` with a full report before
    /// the error is returned; stages after the failing one never run.
    pub fn run(
        &self,
        document: &Path,
        api_key: &ApiKey,
        session: &mut ProcessingSession,
    ) -> Result<RunOutcome, PipelineError> {
        let span = info_span!("run", run_id = %session.run_id());
        let _guard = span.enter();

        match self.run_stages(document, api_key, session) {
            Ok(outcome) => {
                session.advance(Stage::Complete);
                session.record(format!(
                    "Done: {} item(s) written to {}",
                    outcome.inventory.item_count(),
                    outcome.spreadsheet.path.display()
                ));
                Ok(outcome)
            }
            Err(err) => {
                session.fail(&err);
                Err(err)
            }
        }
    }

    fn run_stages(
        &self,
        document: &Path,
        api_key: &ApiKey,
        session: &mut ProcessingSession,
    ) -> Result<RunOutcome, PipelineError> {
        // 1. Document to text
        session.advance(Stage::Converting);
        self.config.validate()?;
        session.record(format!("Processing file: {}", document.display()));
        let text = self
            .extractor
            .extract(document)
            .map_err(|e| PipelineError::Conversion(e.to_string()))?;
        session.record(format!(
            "Conversion succeeded, text length: {} chars",
            text.chars().count()
        ));

        // 2. Prompt and model call
        session.advance(Stage::CallingModel);
        session.record(format!(
            "Loading prompt template: {}",
            self.config.prompt_path.display()
        ));
        let template = PromptTemplate::load(&self.config.prompt_path)?;
        session.record(format!("Prompt template loaded, length: {} chars", template.len()));

        let request = template.assemble(text);
        session.record(format!(
            "Calling model '{}', this may take a while...",
            self.model.model_name()
        ));
        let raw = self
            .model
            .complete(&request, api_key)
            .map_err(|e| PipelineError::ModelCall(e.to_string()))?;
        session.record("Model call succeeded");

        // 3. Sanitize and validate
        session.advance(Stage::ParsingResponse);
        session.record(format!("Response length: {} chars", raw.chars().count()));
        session.record(format!("Response preview: {}", preview(&raw)));

        let sanitized = sanitize_response(&raw);
        session.record(format!("Sanitized response length: {} chars", sanitized.chars().count()));

        let inventory = validate_inventory(&raw, &sanitized)?;
        if inventory.used_fallback() {
            session.record(format!(
                "Warning: key '{}' not found; available keys: {:?}; using '{}'",
                crate::inventory::EXPECTED_KEY,
                inventory.keys(),
                inventory.key()
            ));
        } else {
            session.record(format!(
                "Found '{}' with {} item(s)",
                inventory.key(),
                inventory.item_count()
            ));
        }

        // 4. Artifacts
        session.advance(Stage::WritingJson);
        let json = self.writer.write_json(inventory.document())?;
        session.record(format!("JSON saved to {}", json.path.display()));
        session.record_artifact(json.clone());

        session.advance(Stage::WritingSpreadsheet);
        let spreadsheet = self.writer.write_spreadsheet(&inventory.items())?;
        session.record(format!("Spreadsheet saved to {}", spreadsheet.path.display()));
        session.record_artifact(spreadsheet.clone());

        info!(
            key = %inventory.key(),
            items = inventory.item_count(),
            json = %json.path.display(),
            spreadsheet = %spreadsheet.path.display(),
            "Run complete"
        );
        debug!(fallback = inventory.used_fallback(), "Key resolution");

        Ok(RunOutcome {
            run_id: session.run_id(),
            json,
            spreadsheet,
            inventory,
        })
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(RESPONSE_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(preview("{}"), "{}");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let text = "椅".repeat(RESPONSE_PREVIEW_CHARS + 10);
        let out = preview(&text);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), RESPONSE_PREVIEW_CHARS + 3);
    }
}
