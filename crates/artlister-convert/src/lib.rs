//! ArtLister document conversion
//!
//! Turns office documents into markdown-flavoured plain text for the
//! model prompt. Dispatch is by file extension:
//!
//! | Extension                          | Handling                              |
//! |------------------------------------|---------------------------------------|
//! | `txt`, `md`, `markdown`, `csv`, `json` | read as UTF-8 (lossy)             |
//! | `xlsx`, `xlsm`, `xls`, `ods`       | one markdown table per sheet          |
//! | `docx`                             | paragraphs and table rows, one per line |
//!
//! Anything else, including legacy binary `.doc`, is rejected with
//! [`ConvertError::Unsupported`].

#![warn(missing_docs)]

mod docx;
mod error;
mod sheet;

use artlister_domain::TextExtractor;
use std::fs;
use std::path::Path;
use tracing::debug;

pub use error::ConvertError;

/// Kind of document, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Plain or markdown text
    PlainText,
    /// Workbook readable by calamine
    Spreadsheet,
    /// Office Open XML word-processor document
    WordDocument,
}

impl DocumentKind {
    /// Classify a path by its extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "md" | "markdown" | "csv" | "json" => Some(DocumentKind::PlainText),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(DocumentKind::Spreadsheet),
            "docx" => Some(DocumentKind::WordDocument),
            _ => None,
        }
    }
}

/// Default [`TextExtractor`] for the formats listed in the crate docs
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    /// Create a converter
    pub fn new() -> Self {
        Self
    }

    /// Whether `path` has an extension this converter handles
    pub fn supports(path: &Path) -> bool {
        DocumentKind::from_path(path).is_some()
    }

    /// Convert the document at `path` into text
    pub fn convert(&self, path: &Path) -> Result<String, ConvertError> {
        let kind = DocumentKind::from_path(path).ok_or_else(|| {
            ConvertError::Unsupported(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            )
        })?;

        if !path.is_file() {
            return Err(ConvertError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }

        debug!(path = %path.display(), ?kind, "Converting document");

        match kind {
            DocumentKind::PlainText => {
                let bytes = fs::read(path).map_err(|source| ConvertError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
            DocumentKind::Spreadsheet => sheet::workbook_to_markdown(path),
            DocumentKind::WordDocument => docx::docx_to_text(path),
        }
    }
}

impl TextExtractor for MarkdownConverter {
    type Error = ConvertError;

    fn extract(&self, path: &Path) -> Result<String, Self::Error> {
        self.convert(path)
    }
}
