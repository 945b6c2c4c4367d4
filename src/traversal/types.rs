//! Traversal types

use crate::adapter::PageRequest;
use crate::pagination::PageOptions;
use crate::types::MAX_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options for `each`, `list` and `stream`
///
/// The page fields shape the first request only; later pages are fetched
/// through the locator the server hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Records per page hint
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Maximum number of records delivered across all pages
    #[serde(default)]
    pub limit: Option<usize>,
    /// Page number of the first request
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Page token of the first request
    #[serde(default)]
    pub page_token: Option<String>,
    /// Resource filter parameters
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListOptions {
    /// Create empty options: unbounded, server default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record limit
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the page number of the first request
    #[must_use]
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Set the page token of the first request
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

    /// Options for the first page request
    ///
    /// Without an explicit page size, a limit below the server maximum is
    /// used as the page size so a small limit is served by one small page.
    pub fn page_options(&self) -> PageOptions {
        let page_size = self.page_size.or_else(|| {
            self.limit
                .filter(|&limit| limit > 0)
                .map(|limit| limit.min(MAX_PAGE_SIZE as usize) as u32)
        });

        PageOptions {
            page_size,
            page_number: self.page_number,
            page_token: self.page_token.clone(),
            filters: self.filters.clone(),
        }
    }
}

/// Statistics of one finished traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Records handed to the caller
    pub records_delivered: usize,
    /// Pages fetched
    pub pages_fetched: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl TraversalStats {
    /// Create empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one delivered record
    pub fn add_record(&mut self) {
        self.records_delivered += 1;
    }

    /// Count one fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Where a traversal stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The next step fetches this page
    Fetching(PageRequest),
    /// Records of the current page are being handed out
    Delivering,
    /// Finished: limit reached or last page delivered
    Done,
    /// Stopped by a fetch, decode or callback error
    Failed,
}

impl Phase {
    /// Whether no further fetch or delivery can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}
