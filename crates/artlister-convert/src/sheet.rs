//! Workbook to markdown conversion using calamine
//!
//! Every worksheet becomes a `## <name>` heading followed by a pipe table
//! whose first row is treated as the header.

use crate::error::ConvertError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

pub(crate) fn workbook_to_markdown(path: &Path) -> Result<String, ConvertError> {
    let mut workbook = open_workbook_auto(path)?;
    let mut out = String::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .collect();

        debug!(sheet = %name, rows = rows.len(), "Read worksheet");

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## {}\n\n", name));
        out.push_str(&rows_to_table(&rows));
    }

    Ok(out)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().replace('|', "\\|").replace('\n', " "),
    }
}

fn rows_to_table(rows: &[Vec<String>]) -> String {
    let Some(width) = rows.iter().map(Vec::len).max() else {
        return String::new();
    };

    let mut table = String::new();
    for (idx, row) in rows.iter().enumerate() {
        let cells: Vec<&str> = (0..width)
            .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
            .collect();
        table.push_str(&format!("| {} |\n", cells.join(" | ")));

        if idx == 0 {
            table.push_str(&format!("|{}\n", " --- |".repeat(width)));
        }
    }
    table
}
