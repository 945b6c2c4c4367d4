//! Decoder traits

use crate::error::Result;
use serde_json::Value;

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Parse the response body into a single JSON document
    fn decode_raw(&self, body: &str) -> Result<Value>;

    /// Pull the record values out of an already parsed document
    fn extract_records(&self, document: &Value) -> Result<Vec<Value>>;

    /// Parse the body and extract its records in one step
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let document = self.decode_raw(body)?;
        self.extract_records(&document)
    }
}
