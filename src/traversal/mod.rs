//! Paginated collection traversal
//!
//! `ListInstance` walks a remote collection page by page through a
//! [`ResourceAdapter`].
//!
//! # Overview
//!
//! - `each` / `each_with_done` - hand records to a callback one at a time
//! - `list` - collect every record, all or nothing
//! - `stream` - the same walk as a lazy `Stream`
//! - `page` / `get_page` - fetch exactly one page
//!
//! All of them run on [`Traversal`], a small state machine:
//!
//! ```text
//! Fetching ──▶ Delivering ──▶ Fetching ...
//!     │            │
//!     ▼            ▼
//!   Failed        Done
//! ```
//!
//! Pages are fetched strictly one after another and only once every record
//! of the previous page has been delivered. A record is delivered only once
//! the callback for the previous record has finished.

mod callback;
mod types;

pub use callback::{with_callback, DoneSignal};
use callback::await_signal;
pub use types::{ListOptions, Phase, TraversalStats};

use crate::adapter::{PageRequest, ResourceAdapter};
use crate::error::{Error, Result};
use crate::page::Page;
use crate::pagination::PageOptions;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::future::Future;
use std::time::Instant;
use tracing::debug;

// ============================================================================
// List Instance
// ============================================================================

/// Collection operations over one resource
#[derive(Debug, Clone)]
pub struct ListInstance<A> {
    adapter: A,
}

impl<A: ResourceAdapter> ListInstance<A> {
    /// Create a list instance over an adapter
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// The underlying adapter
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Start a pull-based traversal
    ///
    /// Options are checked here; nothing is fetched until the first
    /// [`Traversal::next_record`].
    pub fn traverse(&self, options: ListOptions) -> Result<Traversal<'_, A>> {
        let page_options = options.page_options().validate()?;
        Ok(Traversal::new(&self.adapter, page_options, options.limit))
    }

    /// Hand every record to `callback`, in order
    ///
    /// The next record is delivered once the future returned for the current
    /// one resolves. An error from the callback stops the traversal and is
    /// returned unchanged.
    pub async fn each<F, Fut>(&self, options: ListOptions, mut callback: F) -> Result<TraversalStats>
    where
        F: FnMut(A::Record) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut traversal = self.traverse(options)?;

        while let Some(record) = traversal.next_record().await? {
            if let Err(e) = callback(record).await {
                debug!(
                    "Record callback stopped traversal after {} records",
                    traversal.stats().records_delivered
                );
                traversal.fail();
                return Err(e);
            }
        }

        Ok(traversal.finish())
    }

    /// Hand every record to `callback` together with its continuation
    ///
    /// The callback may finish before completing the [`DoneSignal`], e.g.
    /// after passing it to another task. The traversal waits for the signal.
    pub async fn each_with_done<F, Fut>(
        &self,
        options: ListOptions,
        mut callback: F,
    ) -> Result<TraversalStats>
    where
        F: FnMut(A::Record, DoneSignal) -> Fut,
        Fut: Future<Output = ()>,
    {
        self.each(options, |record| {
            let (signal, receiver) = DoneSignal::new();
            let delivered = callback(record, signal);
            async move {
                delivered.await;
                await_signal(receiver).await
            }
        })
        .await
    }

    /// Collect every record
    ///
    /// Any error discards the records gathered so far.
    pub async fn list(&self, options: ListOptions) -> Result<Vec<A::Record>> {
        let mut records = Vec::new();
        self.each(options, |record| {
            records.push(record);
            futures::future::ready(Ok(()))
        })
        .await?;
        Ok(records)
    }

    /// Walk the collection as a lazy stream
    ///
    /// A page is fetched only when the consumer polls past the records
    /// already buffered. The stream ends after the first error; invalid
    /// options surface as that first error.
    pub fn stream(&self, options: ListOptions) -> impl Stream<Item = Result<A::Record>> + '_ {
        stream::try_unfold(self.traverse(options), |state| async move {
            let mut traversal = state?;
            let record = traversal.next_record().await?;
            Ok::<_, Error>(record.map(|record| (record, Ok(traversal))))
        })
    }

    /// Fetch exactly one page built from `options`
    pub async fn page(&self, options: PageOptions) -> Result<Page<A::Record>> {
        let options = options.validate()?;
        self.adapter.load_page(&PageRequest::Options(options)).await
    }

    /// Fetch exactly the page at `url`
    ///
    /// The URL already carries its filters, so no option checks apply.
    pub async fn get_page(&self, url: &str) -> Result<Page<A::Record>> {
        if url.trim().is_empty() {
            return Err(Error::invalid_argument("url", "page URL must not be empty"));
        }
        self.adapter
            .load_page(&PageRequest::Url(url.to_string()))
            .await
    }
}

// ============================================================================
// Traversal State Machine
// ============================================================================

/// One walk over a collection, pulled a record at a time
pub struct Traversal<'a, A: ResourceAdapter> {
    adapter: &'a A,
    remaining: Option<usize>,
    buffer: VecDeque<A::Record>,
    next: Option<String>,
    phase: Phase,
    stats: TraversalStats,
    started: Instant,
}

impl<'a, A: ResourceAdapter> Traversal<'a, A> {
    fn new(adapter: &'a A, options: PageOptions, limit: Option<usize>) -> Self {
        let phase = if limit == Some(0) {
            Phase::Done
        } else {
            Phase::Fetching(PageRequest::Options(options))
        };

        Self {
            adapter,
            remaining: limit,
            buffer: VecDeque::new(),
            next: None,
            phase,
            stats: TraversalStats::new(),
            started: Instant::now(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Statistics so far
    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    /// Next record, fetching the next page when the current one is used up
    ///
    /// Returns `Ok(None)` once the traversal is done or has failed.
    pub async fn next_record(&mut self) -> Result<Option<A::Record>> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Done => return Ok(None),
                Phase::Failed => {
                    self.phase = Phase::Failed;
                    return Ok(None);
                }
                Phase::Fetching(request) => self.fetch(request).await?,
                Phase::Delivering => {
                    if self.remaining == Some(0) {
                        debug!("Record limit reached after {} pages", self.stats.pages_fetched);
                        return Ok(None);
                    }
                    match self.buffer.pop_front() {
                        Some(record) => {
                            self.phase = Phase::Delivering;
                            if let Some(remaining) = self.remaining.as_mut() {
                                *remaining -= 1;
                            }
                            self.stats.add_record();
                            return Ok(Some(record));
                        }
                        None => {
                            self.phase = match self.next.take() {
                                Some(url) => Phase::Fetching(PageRequest::Url(url)),
                                None => Phase::Done,
                            };
                        }
                    }
                }
            }
        }
    }

    async fn fetch(&mut self, request: PageRequest) -> Result<()> {
        match self.adapter.load_page(&request).await {
            Ok(page) => {
                self.stats.add_page();
                let (records, next) = page.into_parts();
                debug!(
                    "Fetched page {} with {} records, next page: {}",
                    self.stats.pages_fetched,
                    records.len(),
                    next.as_deref().unwrap_or("none")
                );
                self.buffer = records.into();
                self.next = next;
                self.phase = Phase::Delivering;
                Ok(())
            }
            Err(e) => {
                debug!("Page fetch failed: {e}");
                self.fail();
                Err(e)
            }
        }
    }

    /// Stop the traversal; no further fetch or delivery happens
    pub fn fail(&mut self) {
        self.phase = Phase::Failed;
        self.buffer.clear();
        self.next = None;
    }

    /// Final statistics
    pub fn finish(mut self) -> TraversalStats {
        self.stats.set_duration(self.started.elapsed().as_millis() as u64);
        debug!(
            "Traversal finished: {} records from {} pages in {}ms",
            self.stats.records_delivered, self.stats.pages_fetched, self.stats.duration_ms
        );
        self.stats
    }
}
