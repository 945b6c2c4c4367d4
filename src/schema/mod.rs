//! Resource schema module
//!
//! A resource (Rooms, Calls, Roles, ...) is described by data rather than
//! code: its URI template, the key its records live under, the pagination
//! layout of its responses and the semantic type of each field.
//!
//! # Features
//!
//! - **Declarative resources**: one `ResourceSchema` per kind of resource
//! - **Field typing**: records are checked against declared field types
//! - **Page metadata**: paths to page number, page size and total hints

mod types;

pub use types::{FieldType, MetaPaths, ResourceSchema};
