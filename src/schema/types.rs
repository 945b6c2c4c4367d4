//! Schema types

use crate::decode::{extract_path, kind_of};
use crate::error::{Error, Result};
use crate::pagination::{PageParamNames, PaginationConfig};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Semantic type of a resource field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Any JSON value
    #[default]
    Any,
    String,
    Integer,
    Number,
    Boolean,
    /// RFC 3339 (`2015-07-30T20:00:00Z`) or RFC 2822 (`Thu, 30 Jul 2015 20:00:00 +0000`)
    DateTime,
    /// Absolute URL or server-relative URI
    Uri,
    Object,
    Array,
}

impl FieldType {
    /// Check a non-null value against this type
    ///
    /// `null` is accepted for every type; the server omits unset fields that way.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (FieldType::Any, _) => true,
            (FieldType::String, Value::String(_)) => true,
            (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldType::Number, Value::Number(_)) => true,
            (FieldType::Boolean, Value::Bool(_)) => true,
            (FieldType::DateTime, Value::String(s)) => {
                DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok()
            }
            (FieldType::Uri, Value::String(s)) => s.starts_with('/') || url::Url::parse(s).is_ok(),
            (FieldType::Object, Value::Object(_)) => true,
            (FieldType::Array, Value::Array(_)) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Any => write!(f, "any"),
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::DateTime => write!(f, "date_time"),
            FieldType::Uri => write!(f, "uri"),
            FieldType::Object => write!(f, "object"),
            FieldType::Array => write!(f, "array"),
        }
    }
}

/// Paths to the page metadata hints in a response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaPaths {
    /// Zero-based page number
    #[serde(default)]
    pub page: Option<String>,
    /// Page size the server applied
    #[serde(default)]
    pub page_size: Option<String>,
    /// Total record count (rarely reported, never authoritative)
    #[serde(default)]
    pub total: Option<String>,
}

impl Default for MetaPaths {
    fn default() -> Self {
        Self {
            page: Some("meta.page".to_string()),
            page_size: Some("meta.page_size".to_string()),
            total: None,
        }
    }
}

impl MetaPaths {
    /// Read a numeric hint, ignoring anything that is not a non-negative integer
    pub fn read(path: Option<&str>, body: &Value) -> Option<u64> {
        let value = extract_path(body, path?)?;
        value
            .as_u64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
    }
}

/// Declarative description of one kind of resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Resource name used to look it up (`rooms`, `calls`)
    pub name: String,
    /// URI template relative to the API base URL (`/v1/Services/{ServiceSid}/Roles`)
    pub uri: String,
    /// Key the records live under in a page body; `None` for a bare array
    #[serde(default)]
    pub record_key: Option<String>,
    /// How the next page is found
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Query parameter names for page options
    #[serde(default)]
    pub page_params: PageParamNames,
    /// Where page metadata hints live
    #[serde(default)]
    pub meta: MetaPaths,
    /// Declared field types
    #[serde(default)]
    pub fields: BTreeMap<String, FieldType>,
}

impl ResourceSchema {
    /// Create a schema with Twilio-style defaults
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            record_key: None,
            pagination: PaginationConfig::default(),
            page_params: PageParamNames::default(),
            meta: MetaPaths::default(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the record key
    #[must_use]
    pub fn with_record_key(mut self, key: impl Into<String>) -> Self {
        self.record_key = Some(key.into());
        self
    }

    /// Set the pagination layout
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the metadata paths
    #[must_use]
    pub fn with_meta(mut self, meta: MetaPaths) -> Self {
        self.meta = meta;
        self
    }

    /// Declare a field
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    /// Check a record against the declared field types
    ///
    /// Undeclared fields pass through and declared fields may be absent.
    pub fn validate_record(&self, record: &Value) -> Result<()> {
        if self.fields.is_empty() {
            return Ok(());
        }

        let Value::Object(map) = record else {
            return Err(Error::field_type(
                self.name.clone(),
                "object",
                kind_of(record),
            ));
        };

        for (field, field_type) in &self.fields {
            if let Some(value) = map.get(field) {
                if !field_type.accepts(value) {
                    return Err(Error::field_type(
                        format!("{}.{field}", self.name),
                        field_type.to_string(),
                        kind_of(value),
                    ));
                }
            }
        }

        Ok(())
    }
}
