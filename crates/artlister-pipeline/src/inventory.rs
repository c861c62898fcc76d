//! Validate sanitized model output as an inventory
//!
//! The model is asked for `{"场景道具清单": [ {...}, ... ]}`. When that key
//! is missing the first key of the object is used instead, so minor drift in
//! the model's naming does not fail the run.

use crate::error::PipelineError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Key the prompt asks the model to use for the item list ("scene item list")
pub const EXPECTED_KEY: &str = "场景道具清单";

/// One item: field name to scalar value, in model order
pub type ItemRecord = Map<String, Value>;

/// A parsed inventory plus the key that holds its items
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInventory {
    document: Map<String, Value>,
    key: String,
    used_fallback: bool,
}

impl ValidatedInventory {
    /// The full top-level object, as returned by the model
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Key selected as the item list
    pub fn key(&self) -> &str {
        &self.key
    }

    /// True when [`EXPECTED_KEY`] was absent and the first key was used
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// All top-level keys in insertion order
    pub fn keys(&self) -> Vec<&str> {
        self.document.keys().map(String::as_str).collect()
    }

    /// Item records under the selected key
    pub fn items(&self) -> Vec<&ItemRecord> {
        self.document
            .get(&self.key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Number of items under the selected key
    pub fn item_count(&self) -> usize {
        self.items().len()
    }
}

/// Parse `sanitized` as an inventory object and resolve its item-list key.
///
/// `raw` is only carried into the error for diagnostics.
///
/// # Errors
///
/// Returns `PipelineError::Parse` if:
/// - the text is not valid JSON, or not a JSON object
/// - the object has no keys
/// - the selected value is not an array of objects
pub fn validate_inventory(raw: &str, sanitized: &str) -> Result<ValidatedInventory, PipelineError> {
    let value: Value = serde_json::from_str(sanitized)
        .map_err(|e| PipelineError::parse(format!("JSON parse error: {}", e), raw, sanitized))?;

    let document = match value {
        Value::Object(map) => map,
        other => {
            return Err(PipelineError::parse(
                format!("Expected a JSON object, got {}", type_name(&other)),
                raw,
                sanitized,
            ))
        }
    };

    let (key, used_fallback) = if document.contains_key(EXPECTED_KEY) {
        (EXPECTED_KEY.to_string(), false)
    } else {
        let first = document.keys().next().cloned().ok_or_else(|| {
            PipelineError::parse("JSON object has no keys", raw, sanitized)
        })?;
        warn!(
            expected = EXPECTED_KEY,
            available = ?document.keys().collect::<Vec<_>>(),
            selected = %first,
            "Expected key missing, falling back to first key"
        );
        (first, true)
    };

    let Some(items) = document.get(&key).and_then(Value::as_array) else {
        return Err(PipelineError::parse(
            format!(
                "Value under '{}' is {}, expected an array of item records",
                key,
                document.get(&key).map(type_name).unwrap_or("missing")
            ),
            raw,
            sanitized,
        ));
    };

    if let Some(idx) = items.iter().position(|item| !item.is_object()) {
        return Err(PipelineError::parse(
            format!(
                "Item {} under '{}' is {}, expected an object",
                idx,
                key,
                type_name(&items[idx])
            ),
            raw,
            sanitized,
        ));
    }

    debug!(key = %key, items = items.len(), "Validated inventory");

    Ok(ValidatedInventory {
        document,
        key,
        used_fallback,
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
