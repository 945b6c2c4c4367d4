//! Resource adapter boundary
//!
//! The traversal engine knows nothing about URLs or record shapes. It asks a
//! `ResourceAdapter` for raw pages and has the same adapter turn each raw
//! response into a typed [`Page`].
//!
//! # Overview
//!
//! - `ResourceAdapter` - fetch one page, deserialize one page
//! - `PageRequest` - either an exact locator or options for the first page
//! - `HttpResourceAdapter` - the one generic implementation, driven by a
//!   `ResourceSchema`

mod http;

pub use http::HttpResourceAdapter;

use crate::error::Result;
use crate::http::RawResponse;
use crate::page::Page;
use crate::pagination::PageOptions;
use async_trait::async_trait;

/// What to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// An exact locator, fetched verbatim
    Url(String),
    /// Filter and page options for a request built from the resource URI
    Options(PageOptions),
}

impl PageRequest {
    /// Request the first page with default options
    pub fn first() -> Self {
        Self::Options(PageOptions::default())
    }
}

impl From<PageOptions> for PageRequest {
    fn from(options: PageOptions) -> Self {
        Self::Options(options)
    }
}

/// Resource-specific half of pagination
///
/// Implementations know one kind of resource: where it lives and how its
/// pages look on the wire.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    /// Record type carried by pages of this resource
    type Record: Send;

    /// Perform one fetch
    async fn fetch_page(&self, request: &PageRequest) -> Result<RawResponse>;

    /// Parse one raw response into a page
    fn deserialize(&self, raw: &RawResponse) -> Result<Page<Self::Record>>;

    /// Fetch and deserialize one page
    async fn load_page(&self, request: &PageRequest) -> Result<Page<Self::Record>> {
        let raw = self.fetch_page(request).await?;
        self.deserialize(&raw)
    }
}

#[cfg(test)]
pub(crate) mod mock;

#[cfg(test)]
mod tests;
