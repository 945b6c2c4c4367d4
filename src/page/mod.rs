//! One fetched batch of records
//!
//! A `Page` holds the records of a single response, in server order, plus
//! the locator of the batch after it. It is never mutated once built: the
//! traversal moves records out with [`Page::into_records`], everything else
//! reads through shared references.

use crate::adapter::{PageRequest, ResourceAdapter};
use crate::error::Result;
use serde::Serialize;
use tracing::debug;

/// One page of a remote collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    records: Vec<T>,
    next_page_url: Option<String>,
    previous_page_url: Option<String>,
    url: Option<String>,
    page_number: Option<u64>,
    page_size: Option<u64>,
    total: Option<u64>,
}

impl<T> Page<T> {
    /// Create a terminal page holding `records`
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            next_page_url: None,
            previous_page_url: None,
            url: None,
            page_number: None,
            page_size: None,
            total: None,
        }
    }

    /// Set the next page locator; an empty locator marks the last page
    #[must_use]
    pub fn with_next_page_url(mut self, url: Option<String>) -> Self {
        self.next_page_url = non_empty(url);
        self
    }

    /// Set the previous page locator
    #[must_use]
    pub fn with_previous_page_url(mut self, url: Option<String>) -> Self {
        self.previous_page_url = non_empty(url);
        self
    }

    /// Set the URL this page was fetched from
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_empty(Some(url.into()));
        self
    }

    /// Set the page number hint
    #[must_use]
    pub fn with_page_number(mut self, page_number: Option<u64>) -> Self {
        self.page_number = page_number;
        self
    }

    /// Set the page size hint
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<u64>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the total count hint
    #[must_use]
    pub fn with_total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    /// Records on this page, in server order
    pub fn instances(&self) -> &[T] {
        &self.records
    }

    /// Locator of the next page, `None` on the last page
    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page_url.as_deref()
    }

    /// Locator of the previous page
    pub fn previous_page_url(&self) -> Option<&str> {
        self.previous_page_url.as_deref()
    }

    /// URL this page was fetched from
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Zero-based page number reported by the server
    ///
    /// Display only; the locator is what identifies a page.
    pub fn page_number(&self) -> Option<u64> {
        self.page_number
    }

    /// Page size reported by the server
    pub fn page_size(&self) -> Option<u64> {
        self.page_size
    }

    /// Total record count, when the server reports one (not authoritative)
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether this is the last page
    pub fn is_last(&self) -> bool {
        self.next_page_url.is_none()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Take the records and the next locator out of the page
    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.records, self.next_page_url)
    }

    /// Take the records out of the page
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Fetch the page after this one
    ///
    /// Returns `Ok(None)` without touching the adapter on the last page.
    pub async fn next_page<A>(&self, adapter: &A) -> Result<Option<Page<T>>>
    where
        A: ResourceAdapter<Record = T> + ?Sized,
    {
        follow(adapter, self.next_page_url.as_deref()).await
    }

    /// Fetch the page before this one
    pub async fn previous_page<A>(&self, adapter: &A) -> Result<Option<Page<T>>>
    where
        A: ResourceAdapter<Record = T> + ?Sized,
    {
        follow(adapter, self.previous_page_url.as_deref()).await
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

async fn follow<A>(adapter: &A, locator: Option<&str>) -> Result<Option<Page<A::Record>>>
where
    A: ResourceAdapter + ?Sized,
{
    let Some(url) = locator else {
        return Ok(None);
    };
    debug!("Following page locator {url}");
    let page = adapter.load_page(&PageRequest::Url(url.to_string())).await?;
    Ok(Some(page))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests;
