//! Persist a validated inventory as JSON and as a spreadsheet

use crate::config::OutputConfig;
use crate::error::PipelineError;
use crate::inventory::ItemRecord;
use crate::naming::create_unique;
use crate::xlsx::{self, Cell};
use serde_json::{Map, Value};
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Kind of artifact a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Pretty-printed JSON document
    Json,
    /// Single-sheet `.xlsx` workbook
    Spreadsheet,
}

/// A file written by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    /// What was written
    pub kind: ArtifactKind,
    /// Where it was written; never a pre-existing file
    pub path: PathBuf,
}

/// Writes both artifacts into the configured output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    config: OutputConfig,
}

impl ArtifactWriter {
    /// Create a writer for the given output settings
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Directory artifacts are written into
    pub fn output_dir(&self) -> &Path {
        &self.config.directory
    }

    /// Canonical (unsuffixed) JSON path
    pub fn json_base_path(&self) -> PathBuf {
        self.config.directory.join(&self.config.json_filename)
    }

    /// Canonical (unsuffixed) spreadsheet path
    pub fn spreadsheet_base_path(&self) -> PathBuf {
        self.config.directory.join(&self.config.excel_filename)
    }

    /// Write the full inventory object as UTF-8 JSON with two-space
    /// indentation and non-ASCII characters left as-is.
    pub fn write_json(&self, document: &Map<String, Value>) -> Result<OutputArtifact, PipelineError> {
        let base = self.json_base_path();
        let body = serde_json::to_string_pretty(document).map_err(|e| PipelineError::Io {
            path: base.clone(),
            source: std::io::Error::other(e),
        })?;

        let path = self.write_new_file(&base, body.as_bytes())?;
        info!(path = %path.display(), bytes = body.len(), "Wrote JSON artifact");

        Ok(OutputArtifact {
            kind: ArtifactKind::Json,
            path,
        })
    }

    /// Write one row per item record under a header of field names.
    /// No index column is emitted.
    pub fn write_spreadsheet(&self, items: &[&ItemRecord]) -> Result<OutputArtifact, PipelineError> {
        let base = self.spreadsheet_base_path();
        let columns = spreadsheet_columns(items);
        let rows: Vec<Vec<Cell>> = items
            .iter()
            .map(|item| {
                columns
                    .iter()
                    .map(|col| item.get(col).map(Cell::from_json).unwrap_or(Cell::Empty))
                    .collect()
            })
            .collect();

        debug!(columns = ?columns, rows = rows.len(), "Building spreadsheet");

        let buffer = xlsx::write_workbook(Cursor::new(Vec::new()), &columns, &rows)
            .map_err(|source| PipelineError::Io {
                path: base.clone(),
                source,
            })?
            .into_inner();

        let path = self.write_new_file(&base, &buffer)?;
        info!(path = %path.display(), rows = rows.len(), "Wrote spreadsheet artifact");

        Ok(OutputArtifact {
            kind: ArtifactKind::Spreadsheet,
            path,
        })
    }

    fn write_new_file(&self, base: &Path, bytes: &[u8]) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.config.directory).map_err(|source| PipelineError::Io {
            path: self.config.directory.clone(),
            source,
        })?;

        let (path, mut file) = create_unique(base).map_err(|source| PipelineError::Io {
            path: base.to_path_buf(),
            source,
        })?;

        let written = file.write_all(bytes).and_then(|_| file.sync_all());
        drop(file);

        if let Err(source) = written {
            // Do not leave a truncated artifact behind
            let _ = fs::remove_file(&path);
            return Err(PipelineError::Io { path, source });
        }

        Ok(path)
    }
}

/// Column headers: every field name, in the order first encountered
/// (the first record's keys come first).
pub fn spreadsheet_columns(items: &[&ItemRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        for key in item.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(value: Value) -> ItemRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn writer_in(dir: &Path) -> ArtifactWriter {
        ArtifactWriter::new(OutputConfig {
            directory: dir.join("output"),
            ..OutputConfig::default()
        })
    }

    #[test]
    fn test_columns_union_in_first_seen_order() {
        let a = record(json!({"name": "chair", "qty": 1}));
        let b = record(json!({"qty": 2, "color": "red", "name": "lamp"}));
        assert_eq!(spreadsheet_columns(&[&a, &b]), vec!["name", "qty", "color"]);
    }

    #[test]
    fn test_json_is_pretty_and_unescaped() {
        let dir = TempDir::new().unwrap();
        let writer = writer_in(dir.path());
        let doc = record(json!({"场景道具清单": [{"name": "椅子"}]}));

        let artifact = writer.write_json(&doc).unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Json);
        assert_eq!(artifact.path, dir.path().join("output").join("art_list.json"));

        let text = fs::read_to_string(&artifact.path).unwrap();
        assert!(text.contains("椅子"));
        assert!(!text.contains("\\u"));
        assert!(text.starts_with("{\n  \"场景道具清单\": [\n    {"));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let writer = writer_in(dir.path());
        let doc = record(json!({"items": [{"name": "desk", "qty": 2, "used": true, "note": null}], "meta": {"v": 1}}));

        let artifact = writer.write_json(&doc).unwrap();
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&artifact.path).unwrap()).unwrap();
        assert_eq!(parsed, Value::Object(doc));
    }

    #[test]
    fn test_second_write_gets_suffix() {
        let dir = TempDir::new().unwrap();
        let writer = writer_in(dir.path());
        let doc = record(json!({"items": []}));

        let first = writer.write_json(&doc).unwrap();
        let second = writer.write_json(&doc).unwrap();
        let third = writer.write_json(&doc).unwrap();

        assert!(first.path.ends_with("art_list.json"));
        assert!(second.path.ends_with("art_list(1).json"));
        assert!(third.path.ends_with("art_list(2).json"));
    }

    #[test]
    fn test_spreadsheet_written_under_unique_name() {
        let dir = TempDir::new().unwrap();
        let writer = writer_in(dir.path());
        let item = record(json!({"name": "chair", "qty": 1}));

        let first = writer.write_spreadsheet(&[&item]).unwrap();
        let second = writer.write_spreadsheet(&[&item]).unwrap();

        assert_eq!(first.kind, ArtifactKind::Spreadsheet);
        assert!(first.path.ends_with("art_list.xlsx"));
        assert!(second.path.ends_with("art_list(1).xlsx"));
        // Zip local file header magic
        assert_eq!(&fs::read(&first.path).unwrap()[..2], b"PK");
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("output");
        fs::write(&blocker, "a file where the directory should be").unwrap();

        let writer = writer_in(dir.path());
        let result = writer.write_json(&record(json!({"items": []})));
        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }
}
