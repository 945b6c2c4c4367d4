//! In-memory adapter for engine tests

use super::{PageRequest, ResourceAdapter};
use crate::error::{Error, Result};
use crate::http::RawResponse;
use crate::page::Page;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves a fixed chain of pages of string records
///
/// Page `i` lives at `mock://pages/{i}`; the last page reports an empty next
/// locator. Every fetch is counted and recorded.
pub(crate) struct MockAdapter {
    pages: Vec<Vec<String>>,
    fetches: AtomicUsize,
    requests: Mutex<Vec<PageRequest>>,
    fail_on: Option<usize>,
}

impl MockAdapter {
    pub(crate) fn new(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|page| page.iter().map(|r| (*r).to_string()).collect())
                .collect(),
            fetches: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    /// The A..E chain: `[A, B, C]` then `[D, E]`
    pub(crate) fn letters() -> Self {
        Self::new(&[&["A", "B", "C"], &["D", "E"]])
    }

    /// Fail with a 500 when page `index` is requested
    pub(crate) fn failing_on(mut self, index: usize) -> Self {
        self.fail_on = Some(index);
        self
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn url(index: usize) -> String {
        format!("mock://pages/{index}")
    }

    fn index_of(request: &PageRequest) -> Result<usize> {
        match request {
            PageRequest::Options(_) => Ok(0),
            PageRequest::Url(url) => url
                .strip_prefix("mock://pages/")
                .and_then(|i| i.parse().ok())
                .ok_or_else(|| Error::http_status(404, format!("no page at {url}"))),
        }
    }
}

#[async_trait]
impl ResourceAdapter for MockAdapter {
    type Record = String;

    async fn fetch_page(&self, request: &PageRequest) -> Result<RawResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let index = Self::index_of(request)?;
        if self.fail_on == Some(index) {
            return Err(Error::http_status(500, "boom"));
        }
        let records = self
            .pages
            .get(index)
            .ok_or_else(|| Error::http_status(404, "page out of range"))?;
        let next = if index + 1 < self.pages.len() {
            Self::url(index + 1)
        } else {
            String::new()
        };

        Ok(RawResponse::json(
            Self::url(index),
            &json!({"records": records, "next": next, "page": index}),
        ))
    }

    fn deserialize(&self, raw: &RawResponse) -> Result<Page<String>> {
        let body: serde_json::Value = serde_json::from_slice(&raw.body)?;
        let records: Vec<String> = serde_json::from_value(body["records"].clone())?;
        let next = body["next"].as_str().map(str::to_string);

        Ok(Page::new(records)
            .with_url(raw.url.clone())
            .with_next_page_url(next)
            .with_page_number(body["page"].as_u64()))
    }
}
