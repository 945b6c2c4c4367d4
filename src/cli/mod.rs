//! CLI module
//!
//! Command-line interface for walking resources.
//!
//! # Commands
//!
//! - `resources` - List resources of a client definition
//! - `validate` - Validate a client definition
//! - `list` - Walk a resource and print every record
//! - `page` - Fetch one page built from options
//! - `get-page` - Fetch one page by URL

mod commands;
mod runner;

pub use commands::{parse_key_val, Cli, Commands, OutputFormat, PageArgs, TargetArgs};
pub use runner::Runner;
