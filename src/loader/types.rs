//! Client definition types
//!
//! These types mirror the YAML structure of a client definition.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::schema::ResourceSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Complete client definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDefinition {
    /// Client name
    pub name: String,
    /// Definition version
    #[serde(default = "default_version")]
    pub version: String,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// API root that resource URIs are relative to
    pub base_url: String,
    /// HTTP configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Resource definitions
    #[serde(default)]
    pub resources: Vec<ResourceSchema>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

impl ClientDefinition {
    /// Look up a resource by name
    pub fn resource(&self, name: &str) -> Result<&ResourceSchema> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::resource_not_found(name))
    }

    /// Names of all resources, in definition order
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }

    /// HTTP client configuration for this definition
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_secs));

        builder = match self.http.rate_limit_rps {
            Some(rps) => builder.rate_limit(RateLimiterConfig::new(
                rps,
                self.http.burst_size.unwrap_or(rps),
            )),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        for (key, value) in &self.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        builder.build()
    }
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Rate limit (requests per second); no limit when absent
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,
    /// Burst size for the rate limiter (defaults to the rate)
    #[serde(default)]
    pub burst_size: Option<u32>,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            rate_limit_rps: None,
            burst_size: None,
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}
