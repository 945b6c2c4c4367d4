//! Client assembled from a definition
//!
//! One `Client` owns one HTTP transport (and so one rate limiter) shared by
//! every list instance it hands out.

use crate::adapter::HttpResourceAdapter;
use crate::error::{Result, ResultExt};
use crate::http::HttpClient;
use crate::loader::{load_client, ClientDefinition};
use crate::schema::ResourceSchema;
use crate::traversal::ListInstance;
use crate::types::StringMap;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Entry point for traversing the resources of one API
#[derive(Debug, Clone)]
pub struct Client {
    http: Arc<HttpClient>,
    definition: Arc<ClientDefinition>,
}

impl Client {
    /// Create a client from a definition
    pub fn new(definition: ClientDefinition) -> Result<Self> {
        let http = HttpClient::with_config(definition.http_config())
            .with_context(|| format!("Failed to build HTTP client for '{}'", definition.name))?;
        debug!(
            "Client '{}' ready with {} resources",
            definition.name,
            definition.resources.len()
        );
        Ok(Self {
            http: Arc::new(http),
            definition: Arc::new(definition),
        })
    }

    /// Load a definition file and create a client from it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(load_client(path)?)
    }

    /// The client definition
    pub fn definition(&self) -> &ClientDefinition {
        &self.definition
    }

    /// The shared HTTP transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Look up a resource schema by name
    pub fn resource(&self, name: &str) -> Result<&ResourceSchema> {
        self.definition.resource(name)
    }

    /// Collection operations for a resource
    ///
    /// `params` fills the path parameters of the resource URI.
    pub fn list_instance<T>(
        &self,
        name: &str,
        params: &StringMap,
    ) -> Result<ListInstance<HttpResourceAdapter<T>>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let schema = self.resource(name)?.clone();
        let adapter = HttpResourceAdapter::with_params(self.http.clone(), schema, params)?;
        Ok(ListInstance::new(adapter))
    }
}
