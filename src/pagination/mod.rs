//! Pagination module
//!
//! Supports: Next URL (body), Link Header, Cursor, None
//!
//! # Overview
//!
//! The pagination module turns `PageOptions` into query parameters for the
//! first request and, for every response, derives the locator of the next
//! page. The locator is an opaque URL; the traversal engine never looks
//! inside it.

mod strategies;
mod types;

pub use strategies::{CursorPaginator, LinkHeaderPaginator, NextUrlPaginator, NoPaginator};
pub use types::{
    resolve_locator, PageOptions, PageParamNames, PaginationConfig, Paginator, ResponseView,
    StopCondition,
};
