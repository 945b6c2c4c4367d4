//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PageArgs, TargetArgs};
use crate::client::Client;
use crate::error::{Error, Result};
use crate::loader::{load_client, ClientDefinition};
use crate::page::Page;
use crate::pagination::PageOptions;
use crate::traversal::{ListInstance, ListOptions};
use crate::types::StringMap;
use crate::HttpResourceAdapter;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Resources => self.resources(),
            Commands::Validate => self.validate(),
            Commands::List {
                resource,
                target,
                limit,
                page,
            } => self.list(resource, target, *limit, page).await,
            Commands::Page {
                resource,
                target,
                page,
            } => self.page(resource, target, page).await,
            Commands::GetPage {
                resource,
                url,
                target,
            } => self.get_page(resource, url, target).await,
        }
    }

    /// Path of the client definition
    fn definition_path(&self) -> Result<&PathBuf> {
        self.cli
            .client
            .as_ref()
            .ok_or_else(|| Error::config("Client definition not specified (use -c flag)"))
    }

    /// Load client definition
    fn load_definition(&self) -> Result<ClientDefinition> {
        load_client(self.definition_path()?)
    }

    /// Build a list instance for a resource
    fn list_instance(
        &self,
        resource: &str,
        target: &TargetArgs,
    ) -> Result<ListInstance<HttpResourceAdapter<Value>>> {
        let client = Client::new(self.load_definition()?)?;
        let params: StringMap = target.params.iter().cloned().collect();
        client.list_instance(resource, &params)
    }

    /// List resources
    fn resources(&self) -> Result<()> {
        let definition = self.load_definition()?;

        let resources: Vec<Value> = definition
            .resources
            .iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "uri": r.uri,
                    "record_key": r.record_key,
                    "fields": r.fields,
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "RESOURCES",
            "client": definition.name,
            "resources": resources
        }));

        Ok(())
    }

    /// Validate client definition
    fn validate(&self) -> Result<()> {
        let definition = self.load_definition()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Client '{}' v{} is valid with {} resources",
                    definition.name,
                    definition.version,
                    definition.resources.len()
                )
            }
        }));

        Ok(())
    }

    /// Walk a resource, printing records as they arrive
    async fn list(
        &self,
        resource: &str,
        target: &TargetArgs,
        limit: Option<usize>,
        page: &PageArgs,
    ) -> Result<()> {
        let list = self.list_instance(resource, target)?;

        let mut options = ListOptions {
            page_size: page.page_size,
            limit,
            page_number: page.page_number,
            page_token: page.page_token.clone(),
            ..ListOptions::default()
        };
        options.filters.extend(target.filters.iter().cloned());

        info!("Listing {resource}");
        let stats = list
            .each(options, |record| {
                self.output_message(&json!({
                    "type": "RECORD",
                    "resource": resource,
                    "record": record
                }));
                futures::future::ready(Ok(()))
            })
            .await?;

        self.output_message(&json!({
            "type": "STATS",
            "resource": resource,
            "stats": stats
        }));

        Ok(())
    }

    /// Fetch one page from options
    async fn page(&self, resource: &str, target: &TargetArgs, page: &PageArgs) -> Result<()> {
        let list = self.list_instance(resource, target)?;

        let mut options = PageOptions {
            page_size: page.page_size,
            page_number: page.page_number,
            page_token: page.page_token.clone(),
            ..PageOptions::default()
        };
        options.filters.extend(target.filters.iter().cloned());

        let page = list.page(options).await?;
        self.output_page(resource, &page);
        Ok(())
    }

    /// Fetch one page by URL
    async fn get_page(&self, resource: &str, url: &str, target: &TargetArgs) -> Result<()> {
        let list = self.list_instance(resource, target)?;
        let page = list.get_page(url).await?;
        self.output_page(resource, &page);
        Ok(())
    }

    fn output_page(&self, resource: &str, page: &Page<Value>) {
        self.output_message(&json!({
            "type": "PAGE",
            "resource": resource,
            "page": page
        }));
    }

    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
