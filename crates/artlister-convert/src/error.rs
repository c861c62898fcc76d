//! Error types for document conversion

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while converting a document to text
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// No converter handles this extension
    #[error("Unsupported document type: '{0}'")]
    Unsupported(String),

    /// Workbook could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Word document archive or XML is malformed
    #[error("Word document error: {0}")]
    Docx(String),
}

impl From<calamine::Error> for ConvertError {
    fn from(e: calamine::Error) -> Self {
        ConvertError::Spreadsheet(e.to_string())
    }
}

impl From<zip::result::ZipError> for ConvertError {
    fn from(e: zip::result::ZipError) -> Self {
        ConvertError::Docx(e.to_string())
    }
}

impl From<quick_xml::Error> for ConvertError {
    fn from(e: quick_xml::Error) -> Self {
        ConvertError::Docx(e.to_string())
    }
}
