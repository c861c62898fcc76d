//! Output formatting for the CLI.

use artlister_pipeline::{spreadsheet_columns, ItemRecord, RunOutcome, SessionUpdate, Stage};
use colored::*;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Rows shown in the inventory preview
const PREVIEW_ROWS: usize = 20;

/// Longest cell text shown in the inventory preview
const PREVIEW_CELL_CHARS: usize = 40;

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format one live session update.
    pub fn session_update(&self, update: &SessionUpdate) -> String {
        let line = format!("[{:>3}%] {}", update.percent, update.entry);
        match update.stage {
            Stage::Failed => self.colorize(&line, "red"),
            Stage::Complete => self.colorize(&line, "green"),
            _ if update.entry.message.starts_with("Warning") => self.colorize(&line, "yellow"),
            _ if update.entry.message == update.status => self.colorize(&line, "cyan"),
            _ => line,
        }
    }

    /// Format the summary of a successful run.
    pub fn run_summary(&self, outcome: &RunOutcome) -> String {
        let inventory = &outcome.inventory;
        let mut lines = vec![
            self.success("Processing complete!"),
            format!("  JSON:        {}", outcome.json.path.display()),
            format!("  Spreadsheet: {}", outcome.spreadsheet.path.display()),
            format!("  Items:       {}", inventory.item_count()),
        ];
        if inventory.used_fallback() {
            lines.push(self.warning(&format!(
                "Expected key not found, used '{}' instead",
                inventory.key()
            )));
        } else {
            lines.push(format!("  Key:         {}", inventory.key()));
        }
        lines.join("\n")
    }

    /// Format a preview table of inventory items.
    pub fn inventory_table(&self, items: &[&ItemRecord]) -> String {
        if items.is_empty() {
            return self.colorize("No items found.", "yellow");
        }

        let columns = spreadsheet_columns(items);
        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(String::as_str));

        for item in items.iter().take(PREVIEW_ROWS) {
            builder.push_record(
                columns
                    .iter()
                    .map(|col| item.get(col).map(preview_cell).unwrap_or_default()),
            );
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        if items.len() > PREVIEW_ROWS {
            out.push('\n');
            out.push_str(&self.info(&format!(
                "{} more item(s) in the spreadsheet",
                items.len() - PREVIEW_ROWS
            )));
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn preview_cell(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CELL_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> ItemRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("boom"), "✗ boom");
    }

    #[test]
    fn test_inventory_table_headers_and_cells() {
        let formatter = Formatter::new(false);
        let chair = item(json!({"name": "chair", "qty": 2}));
        let lamp = item(json!({"name": "lamp", "note": null}));
        let output = formatter.inventory_table(&[&chair, &lamp]);
        assert!(output.contains("name"));
        assert!(output.contains("note"));
        assert!(output.contains("chair"));
        assert!(output.contains('2'));
    }

    #[test]
    fn test_inventory_table_empty() {
        let formatter = Formatter::new(false);
        assert!(formatter.inventory_table(&[]).contains("No items found"));
    }

    #[test]
    fn test_inventory_table_truncates_rows() {
        let formatter = Formatter::new(false);
        let items: Vec<ItemRecord> = (0..PREVIEW_ROWS + 5)
            .map(|i| item(json!({ "name": format!("prop-{}", i) })))
            .collect();
        let refs: Vec<&ItemRecord> = items.iter().collect();
        let output = formatter.inventory_table(&refs);
        assert!(output.contains("5 more item(s)"));
        assert!(!output.contains(&format!("prop-{}", PREVIEW_ROWS)));
    }

    #[test]
    fn test_preview_cell_truncates_long_text() {
        let long = Value::String("道".repeat(PREVIEW_CELL_CHARS + 1));
        let cell = preview_cell(&long);
        assert_eq!(cell.chars().count(), PREVIEW_CELL_CHARS + 1);
        assert!(cell.ends_with('…'));
    }
}
