//! Word (.docx) text extraction
//!
//! Reads `word/document.xml` from the package and emits one line per
//! paragraph. Table rows are flattened to a single line with cells joined
//! by ` | `.

use crate::error::ConvertError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

pub(crate) fn docx_to_text(path: &Path) -> Result<String, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = ZipArchive::new(file)?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)
        .map_err(|e| ConvertError::Docx(format!("Failed to read document.xml: {}", e)))?;

    document_xml_to_text(&xml)
}

#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
    paragraph: String,
    cell: String,
    row: Vec<String>,
    table_depth: usize,
    in_text: bool,
}

impl TextCollector {
    fn end_paragraph(&mut self) {
        let paragraph = std::mem::take(&mut self.paragraph);
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            return;
        }
        if self.table_depth > 0 {
            if !self.cell.is_empty() {
                self.cell.push(' ');
            }
            self.cell.push_str(paragraph);
        } else {
            self.lines.push(paragraph.to_string());
        }
    }

    fn end_cell(&mut self) {
        let cell = std::mem::take(&mut self.cell);
        self.row.push(cell);
    }

    fn end_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        if row.iter().any(|c| !c.is_empty()) {
            self.lines.push(row.join(" | "));
        }
    }
}

fn document_xml_to_text(xml: &str) -> Result<String, ConvertError> {
    let mut reader = Reader::from_str(xml);
    let mut collector = TextCollector::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => collector.in_text = true,
                b"w:tbl" => collector.table_depth += 1,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => collector.paragraph.push('\t'),
                b"w:br" | b"w:cr" => collector.paragraph.push(' '),
                _ => {}
            },
            Event::Text(e) if collector.in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| ConvertError::Docx(e.to_string()))?;
                collector.paragraph.push_str(&text);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => collector.in_text = false,
                b"w:p" => collector.end_paragraph(),
                b"w:tc" => collector.end_cell(),
                b"w:tr" => collector.end_row(),
                b"w:tbl" => collector.table_depth = collector.table_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(collector.lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Scene 1: the study</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">A wooden </w:t></w:r><w:r><w:t>chair &amp; a lamp</w:t></w:r></w:p>
    <w:p></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>name</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>qty</w:t></w:r></w:p></w:tc>
      </w:tr>
      <w:tr>
        <w:tc><w:p><w:r><w:t>desk</w:t></w:r></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>2</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;

    #[test]
    fn test_paragraphs_and_tables() {
        let text = document_xml_to_text(BODY).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["Scene 1: the study", "A wooden chair & a lamp", "name | qty", "desk | 2"]
        );
    }

    #[test]
    fn test_docx_package() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scene.docx");

        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(BODY.as_bytes()).unwrap();
        zip.finish().unwrap();

        let text = docx_to_text(&path).unwrap();
        assert!(text.contains("A wooden chair & a lamp"));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "plain text pretending").unwrap();

        let result = docx_to_text(&path);
        assert!(matches!(result, Err(ConvertError::Docx(_))));
    }
}
