//! YAML parser for client definitions
//!
//! Parses and validates client definition files.

use crate::error::{Error, Result};
use crate::loader::types::ClientDefinition;
use crate::schema::ResourceSchema;
use crate::template;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load a client definition from a file path
///
/// # Examples
///
/// ```ignore
/// let def = load_client("./twilio-video.yaml")?;
/// ```
pub fn load_client(path: impl AsRef<Path>) -> Result<ClientDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read client definition '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_client_from_str(&content)
}

/// Load a client definition from a YAML string
pub fn load_client_from_str(yaml: &str) -> Result<ClientDefinition> {
    let def: ClientDefinition = serde_yaml::from_str(yaml)?;

    validate_client(&def)?;
    Ok(def)
}

/// Validate a client definition
fn validate_client(def: &ClientDefinition) -> Result<()> {
    if def.name.is_empty() {
        return Err(Error::config("Client name cannot be empty"));
    }

    if def.base_url.is_empty() {
        return Err(Error::missing_field("base_url"));
    }
    url::Url::parse(&def.base_url).map_err(|e| {
        Error::config(format!("Client base_url '{}' is invalid: {e}", def.base_url))
    })?;

    if def.resources.is_empty() {
        return Err(Error::config("Client must define at least one resource"));
    }

    let names: HashSet<_> = def.resources.iter().map(|r| &r.name).collect();
    if names.len() != def.resources.len() {
        return Err(Error::config("Duplicate resource names found"));
    }

    for resource in &def.resources {
        validate_resource(resource)?;
    }

    Ok(())
}

/// Validate a resource definition
fn validate_resource(resource: &ResourceSchema) -> Result<()> {
    if resource.name.is_empty() {
        return Err(Error::config("Resource name cannot be empty"));
    }

    if resource.uri.is_empty() {
        return Err(Error::config(format!(
            "Resource '{}' uri cannot be empty",
            resource.name
        )));
    }

    template::validate(&resource.uri).map_err(|e| {
        Error::config(format!("Resource '{}': {e}", resource.name))
    })?;

    if resource.record_key.as_deref() == Some("") {
        return Err(Error::config(format!(
            "Resource '{}' record_key cannot be empty; omit it for bare arrays",
            resource.name
        )));
    }

    Ok(())
}
