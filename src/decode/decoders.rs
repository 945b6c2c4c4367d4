//! JSON decoder and path helpers

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
///
/// With no path the document itself must be an array of records. With a path
/// (`rooms`, `$.data.items`, `$.results[*].item`) the value at the path must
/// be an array; a missing key is a schema mismatch, not an empty page.
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// The configured record path
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode_raw(&self, body: &str) -> Result<Value> {
        serde_json::from_str(body).map_err(|e| Error::Decode {
            message: format!("Failed to parse JSON: {e}"),
        })
    }

    fn extract_records(&self, document: &Value) -> Result<Vec<Value>> {
        match &self.record_path {
            Some(path) if path.contains('*') => extract_with_jsonpath(document, path),
            Some(path) => match extract_path(document, path) {
                Some(Value::Array(arr)) => Ok(arr.clone()),
                Some(other) => Err(Error::RecordExtraction {
                    path: path.clone(),
                    message: format!("expected an array, found {}", kind_of(other)),
                }),
                None => Err(missing_key(path)),
            },
            None => match document {
                Value::Array(arr) => Ok(arr.clone()),
                other => Err(Error::RecordExtraction {
                    path: "$".to_string(),
                    message: format!("expected an array, found {}", kind_of(other)),
                }),
            },
        }
    }
}

// ============================================================================
// Path helpers
// ============================================================================

/// Look up a dot-separated path (`meta.next_page_url`, `$.items.0`)
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Look up a path and render scalar values as a string
///
/// `null`, objects and arrays yield `None`.
pub fn extract_string(value: &Value, path: &str) -> Option<String> {
    match extract_path(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    // The container in front of the first wildcard must exist. Once it does,
    // no match (`Null`) means an empty page.
    let container = path.split("[*]").next().unwrap_or(path);
    if extract_path(value, container).is_none() {
        return Err(missing_key(path));
    }

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}

fn missing_key(path: &str) -> Error {
    Error::RecordExtraction {
        path: path.to_string(),
        message: "key not present in response".to_string(),
    }
}

/// JSON type name of a value, for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
