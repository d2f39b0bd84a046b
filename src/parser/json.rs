//! JSON replacement table loader
//!
//! Reads a flat JSON object of `"YYYYMMDD": "YYYYMMDD"` pairs. Unlike the
//! serialized-map decoder, invalid pairs are reported back to the caller as
//! [`SkippedEntry`] diagnostics instead of vanishing silently.

use crate::error::{EvalDateError, EvalDateResult};
use crate::models::{is_date_string, DateMap};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// A JSON pair excluded from the table because it failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub key: String,
    pub value: Value,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(s) => write!(f, "{}: {}", self.key, s),
            other => write!(f, "{}: {}", self.key, other),
        }
    }
}

/// Outcome of loading a JSON table
#[derive(Debug, Clone, Default)]
pub struct JsonDecode {
    /// Valid pairs, in file order
    pub map: DateMap,

    /// One diagnostic per rejected pair, in file order
    pub skipped: Vec<SkippedEntry>,
}

/// Load and validate a JSON date table
///
/// A file with zero valid pairs still succeeds with an empty map.
pub fn decode_json(path: &Path) -> EvalDateResult<JsonDecode> {
    if !path.is_file() {
        return Err(EvalDateError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => EvalDateError::MalformedInput(e.to_string()),
        _ => EvalDateError::FileNotFound(path.to_path_buf()),
    })?;

    decode_json_str(&content)
}

/// Validate an in-memory JSON document
pub fn decode_json_str(content: &str) -> EvalDateResult<JsonDecode> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| EvalDateError::MalformedInput(e.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(EvalDateError::MalformedInput(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut result = JsonDecode::default();
    for (key, value) in object {
        let accepted = match &value {
            Value::String(date) if is_date_string(&key) && is_date_string(date) => {
                result.map.insert(key.clone(), date.clone())
            }
            _ => false,
        };
        if !accepted {
            result.skipped.push(SkippedEntry { key, value });
        }
    }

    Ok(result)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
