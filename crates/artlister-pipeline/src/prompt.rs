//! Prompt template loading and request assembly

use crate::error::PipelineError;
use artlister_domain::ChatRequest;
use std::fs;
use std::path::{Path, PathBuf};

/// Instruction template sent as the system message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
    source: PathBuf,
}

impl PromptTemplate {
    /// Read the template from disk.
    ///
    /// Missing or unreadable files are a configuration error; the caller
    /// does not retry.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to load prompt template {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self {
            text,
            source: path.to_path_buf(),
        })
    }

    /// Template body
    pub fn text(&self) -> &str {
        &self.text
    }

    /// File the template was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Character count of the template
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the template is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Pair the template with extracted document text.
    ///
    /// Both parts are passed through untouched:
    /// `{system: template, user: text}`.
    pub fn assemble(&self, extracted_text: impl Into<String>) -> ChatRequest {
        ChatRequest::new(self.text.clone(), extracted_text)
    }
}

/// Template written by `artlister init` when no `prompt.md` exists yet
pub const DEFAULT_PROMPT: &str = r#"你是一名影视/游戏美术制片助理。请阅读用户提供的剧本或文档内容，整理出其中出现的全部场景道具。

You are an art-department assistant. Read the document supplied by the user and list every prop that appears in it.

Output rules:
- Return ONLY a JSON object, no explanations.
- The object has exactly one key, "场景道具清单", whose value is an array of items.
- Each item is a flat object with scalar values, using these fields:
  - "场景": scene or location where the prop appears
  - "道具名称": prop name
  - "数量": quantity (number)
  - "描述": short visual description
  - "备注": notes (empty string if none)

Example:
{
  "场景道具清单": [
    {"场景": "书房", "道具名称": "木椅", "数量": 1, "描述": "旧式实木靠背椅", "备注": ""}
  ]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use artlister_domain::ChatRole;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_assemble() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prompt.md");
        fs::write(&path, "List props as JSON.\n").unwrap();

        let template = PromptTemplate::load(&path).unwrap();
        assert_eq!(template.len(), 20);
        assert_eq!(template.source(), path.as_path());

        let request = template.assemble("a wooden chair and a lamp");
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert_eq!(request.messages[0].content, "List props as JSON.\n");
        assert_eq!(request.messages[1].role, ChatRole::User);
        assert_eq!(request.messages[1].content, "a wooden chair and a lamp");
    }

    #[test]
    fn test_missing_template_is_config_error() {
        let dir = TempDir::new().unwrap();
        let result = PromptTemplate::load(&dir.path().join("absent.md"));
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_default_prompt_names_expected_key() {
        assert!(DEFAULT_PROMPT.contains(crate::inventory::EXPECTED_KEY));
    }
}
