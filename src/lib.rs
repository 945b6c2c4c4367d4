// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pagewalk
//!
//! A minimal, Rust-native engine for traversing paginated REST collections.
//! Resources are described as data; one generic adapter and one traversal
//! engine serve all of them.
//!
//! ## Features
//!
//! - **Traversal**: `each`, `list`, `stream`, `page`, `get_page` over any collection
//! - **Backpressure**: the next record waits for the callback of the previous one
//! - **Limits**: stop after N records without fetching further pages
//! - **Declarative resources**: URI template, record key, field types and
//!   pagination layout in YAML
//! - **Pagination layouts**: next page URL in the body, Link header, cursor
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::{Client, ListOptions, Result};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Room {
//!     sid: String,
//!     status: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::from_file("twilio-video.yaml")?;
//!     let rooms = client.list_instance::<Room>("rooms", &Default::default())?;
//!
//!     // Every room, one at a time
//!     rooms
//!         .each(ListOptions::new().with_limit(100), |room| async move {
//!             println!("{} {}", room.sid, room.status);
//!             Ok(())
//!         })
//!         .await?;
//!
//!     // One page, then the next
//!     let page = rooms.page(Default::default()).await?;
//!     if let Some(next) = page.next_page(rooms.adapter()).await? {
//!         println!("{} more rooms", next.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         ListInstance                            │
//! │  each()  each_with_done()  list()  stream()  page()  get_page() │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                     ┌──────────┴──────────┐
//!                     │   ResourceAdapter   │  fetch_page / deserialize
//!                     └──────────┬──────────┘
//! ┌──────────┬───────────────┬───┴───────┬───────────┬─────────────┐
//! │   HTTP   │  Pagination   │  Decode   │  Schema   │  Template   │
//! ├──────────┼───────────────┼───────────┼───────────┼─────────────┤
//! │ GET      │ Next URL      │ JSON      │ Fields    │ {Param}     │
//! │ Rate     │ Link Header   │ JSONPath  │ Types     │ path params │
//! │ Limit    │ Cursor        │           │ Meta      │             │
//! └──────────┴───────────────┴───────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Response decoders
pub mod decode;

/// Declarative resource schemas
pub mod schema;

/// URI path parameters
pub mod template;

/// One fetched page
pub mod page;

/// Resource adapter boundary
pub mod adapter;

/// Collection traversal engine
pub mod traversal;

/// YAML loader for client definitions
pub mod loader;

/// Client assembled from a definition
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use adapter::{HttpResourceAdapter, PageRequest, ResourceAdapter};
pub use client::Client;
pub use loader::{load_client, load_client_from_str, ClientDefinition};
pub use page::Page;
pub use pagination::PageOptions;
pub use schema::{FieldType, ResourceSchema};
pub use traversal::{with_callback, DoneSignal, ListInstance, ListOptions, TraversalStats};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
