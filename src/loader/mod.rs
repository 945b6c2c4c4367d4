//! YAML Loader module
//!
//! Parse client definitions from YAML files.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ClientDefinition` - API root, HTTP settings and resource schemas
//! - `HttpDefinition` - timeout, rate limit and user agent
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_client, load_client_from_str};
pub use types::{ClientDefinition, HttpDefinition};
