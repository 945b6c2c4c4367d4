//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Paginated REST collection walker
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client definition file (YAML)
    #[arg(short, long, global = true)]
    pub client: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the resources of the client definition
    Resources,

    /// Validate the client definition
    Validate,

    /// Walk a resource and print every record
    List {
        /// Resource name
        resource: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Maximum number of records
        #[arg(long)]
        limit: Option<usize>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Fetch one page built from options
    Page {
        /// Resource name
        resource: String,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Fetch the page at an exact URL (e.g. a previous next_page_url)
    GetPage {
        /// Resource name
        resource: String,

        /// Page URL
        url: String,

        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Path parameters and filters
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// URI path parameter (repeatable), e.g. `--param ServiceSid=IS123`
    #[arg(short, long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Filter query parameter (repeatable), e.g. `--filter Status=completed`
    #[arg(long = "filter", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,
}

/// Page options of the first request
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Records per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Page number (requires --page-token unless 0)
    #[arg(long)]
    pub page_number: Option<u32>,

    /// Opaque page token
    #[arg(long)]
    pub page_token: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Parse a `KEY=VALUE` argument
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
