//! Pagination types and traits
//!
//! Defines the request options for one page and the strategy trait that
//! derives the next page locator from a response.

use crate::decode::extract_path;
use crate::error::{Error, Result};
use crate::types::{StringMap, MAX_PAGE_SIZE};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

// ============================================================================
// Page Options
// ============================================================================

/// Filter and pagination options for fetching a single page
///
/// `page_number` is bookkeeping layered on top of the opaque `page_token`;
/// the server only honours it together with a token, so a non-zero page
/// number without a token is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    /// Records per page hint sent to the server
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Page number to request (requires `page_token` unless zero)
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Opaque server cursor, passed through verbatim
    #[serde(default)]
    pub page_token: Option<String>,
    /// Resource filter parameters (`Status`, `DateCreatedAfter`, ...)
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl PageOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the page number
    #[must_use]
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Set the page token
    #[must_use]
    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Add a filter parameter
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Check and normalise the options before a request is built
    ///
    /// An empty token counts as no token. Oversized pages are clamped to the
    /// server maximum.
    pub fn validate(mut self) -> Result<Self> {
        if self.page_token.as_deref() == Some("") {
            self.page_token = None;
        }

        match self.page_size {
            Some(0) => {
                return Err(Error::invalid_argument(
                    "page_size",
                    "must be greater than zero",
                ))
            }
            Some(size) if size > MAX_PAGE_SIZE => {
                warn!("page_size {size} exceeds the maximum, clamping to {MAX_PAGE_SIZE}");
                self.page_size = Some(MAX_PAGE_SIZE);
            }
            _ => {}
        }

        if let Some(number) = self.page_number {
            if number > 0 && self.page_token.is_none() {
                return Err(Error::invalid_argument(
                    "page_number",
                    format!("page {number} cannot be requested without a page_token to anchor it"),
                ));
            }
        }

        Ok(self)
    }
}

// ============================================================================
// Query Parameter Names
// ============================================================================

/// Names of the query parameters carrying page options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParamNames {
    /// Page size parameter
    #[serde(default = "default_page_size_param")]
    pub page_size: String,
    /// Page number parameter
    #[serde(default = "default_page_number_param")]
    pub page_number: String,
    /// Page token parameter
    #[serde(default = "default_page_token_param")]
    pub page_token: String,
}

fn default_page_size_param() -> String {
    "PageSize".to_string()
}

fn default_page_number_param() -> String {
    "Page".to_string()
}

fn default_page_token_param() -> String {
    "PageToken".to_string()
}

impl Default for PageParamNames {
    fn default() -> Self {
        Self {
            page_size: default_page_size_param(),
            page_number: default_page_number_param(),
            page_token: default_page_token_param(),
        }
    }
}

impl PageParamNames {
    /// Render options as query parameters
    pub fn query(&self, options: &PageOptions) -> StringMap {
        let mut params: StringMap = options
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if let Some(size) = options.page_size {
            params.insert(self.page_size.clone(), size.to_string());
        }
        if let Some(number) = options.page_number {
            params.insert(self.page_number.clone(), number.to_string());
        }
        if let Some(token) = &options.page_token {
            params.insert(self.page_token.clone(), token.clone());
        }
        params
    }
}

// ============================================================================
// Pagination Config
// ============================================================================

/// Declarative pagination layout of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// Single page, never a next one
    None,

    /// Next (and previous) page URL found in the response body
    NextUrl {
        /// Path to the next page URL
        #[serde(default = "default_next_path")]
        next_path: String,
        /// Path to the previous page URL
        #[serde(default)]
        previous_path: Option<String>,
    },

    /// RFC 5988 `Link` header
    LinkHeader {
        /// Rel value to follow
        #[serde(default = "default_rel")]
        rel: String,
    },

    /// Cursor value in the body, sent back as a query parameter
    Cursor {
        /// Query parameter carrying the cursor
        cursor_param: String,
        /// Path to the cursor in the response
        cursor_path: String,
        /// When to stop even though a cursor is present
        #[serde(default)]
        stop_condition: StopCondition,
    },
}

fn default_next_path() -> String {
    "meta.next_page_url".to_string()
}

fn default_rel() -> String {
    "next".to_string()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::NextUrl {
            next_path: default_next_path(),
            previous_path: Some("meta.previous_page_url".to_string()),
        }
    }
}

impl PaginationConfig {
    /// Create next URL pagination config
    pub fn next_url(next_path: impl Into<String>) -> Self {
        Self::NextUrl {
            next_path: next_path.into(),
            previous_path: None,
        }
    }

    /// Create link header pagination config
    pub fn link_header(rel: impl Into<String>) -> Self {
        Self::LinkHeader { rel: rel.into() }
    }

    /// Create cursor pagination config
    pub fn cursor(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        stop_condition: StopCondition,
    ) -> Self {
        Self::Cursor {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            stop_condition,
        }
    }
}

/// Stop conditions for cursor pagination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopCondition {
    /// Stop when page is empty (no records)
    #[default]
    EmptyPage,

    /// Stop when a field has a specific value
    Field {
        /// Path to the field
        path: String,
        /// Value that ends pagination
        value: Value,
    },
}

impl StopCondition {
    /// Create a field-based stop condition
    pub fn field(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Field {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Whether pagination should end after this response
    pub fn should_stop(&self, body: &Value, record_count: usize) -> bool {
        match self {
            StopCondition::EmptyPage => record_count == 0,
            StopCondition::Field { path, value } => extract_path(body, path) == Some(value),
        }
    }
}

// ============================================================================
// Paginator Trait
// ============================================================================

/// What a paginator sees of one response
#[derive(Debug, Clone, Copy)]
pub struct ResponseView<'a> {
    /// URL the page was fetched from
    pub url: &'a str,
    /// Parsed response body
    pub body: &'a Value,
    /// Response headers
    pub headers: &'a HeaderMap,
    /// Number of records on the page
    pub record_count: usize,
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Names of the page option query parameters
    fn param_names(&self) -> &PageParamNames;

    /// Query parameters for a request built from options
    fn initial_params(&self, options: &PageOptions) -> StringMap {
        self.param_names().query(options)
    }

    /// Locator of the page after this response, `None` when it is the last
    fn next_locator(&self, response: &ResponseView<'_>) -> Option<String>;

    /// Locator of the page before this response
    fn previous_locator(&self, _response: &ResponseView<'_>) -> Option<String> {
        None
    }
}

/// Resolve a possibly relative locator against the URL of the current page
///
/// Empty locators resolve to `None`.
pub fn resolve_locator(current_url: &str, locator: &str) -> Option<String> {
    let locator = locator.trim();
    if locator.is_empty() {
        return None;
    }
    if url::Url::parse(locator).is_ok() {
        return Some(locator.to_string());
    }
    match url::Url::parse(current_url).and_then(|base| base.join(locator)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(_) => Some(locator.to_string()),
    }
}
