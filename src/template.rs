//! URI path parameters
//!
//! Resource URIs carry `{Param}` placeholders, e.g.
//! `/v1/Services/{ServiceSid}/Roles`. Rendering substitutes every placeholder
//! from a parameter map. Values must be a single path segment.

use crate::error::{Error, Result};
use crate::types::StringMap;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Scratch URL used to percent-encode path segments
const SEGMENT_BASE: &str = "http://localhost/";

/// Regex for matching path parameters: {ParamName}
static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Render a URI template with the given path parameters
///
/// Every placeholder must be defined. Missing ones are reported together.
/// Values are percent-encoded as one path segment each.
pub fn render(template: &str, params: &StringMap) -> Result<String> {
    let mut missing = Vec::new();
    let mut encoded = StringMap::new();

    for cap in PARAM_REGEX.captures_iter(template) {
        let name = &cap[1];
        match params.get(name) {
            Some(value) => {
                check_segment(name, value)?;
                encoded.insert(name.to_string(), encode_segment(value)?);
            }
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(Error::undefined_var(missing.join(", ")));
    }

    let rendered = PARAM_REGEX.replace_all(template, |cap: &regex::Captures<'_>| {
        encoded.get(&cap[1]).cloned().unwrap_or_default()
    });
    Ok(rendered.into_owned())
}

/// Check if a string contains path parameters
pub fn has_templates(s: &str) -> bool {
    PARAM_REGEX.is_match(s)
}

/// Extract all parameter names from a template, in order of appearance
pub fn extract_variables(template: &str) -> Vec<String> {
    PARAM_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Check that braces in a template are balanced and every placeholder is well formed
pub fn validate(template: &str) -> Result<()> {
    let stripped = PARAM_REGEX.replace_all(template, "");
    if stripped.contains('{') || stripped.contains('}') {
        return Err(Error::template(format!(
            "malformed path parameter in '{template}'"
        )));
    }
    Ok(())
}

fn check_segment(name: &str, value: &str) -> Result<()> {
    let single = !value.contains('/') && !value.contains('?') && !matches!(value, "." | "..");
    if value.is_empty() || !single {
        return Err(Error::template(format!(
            "path parameter {name} must be a single non-empty path segment, got '{value}'"
        )));
    }
    Ok(())
}

fn encode_segment(value: &str) -> Result<String> {
    let mut url = Url::parse(SEGMENT_BASE)?;
    url.path_segments_mut()
        .map_err(|()| Error::template(format!("cannot encode path segment '{value}'")))?
        .pop_if_empty()
        .push(value);
    Ok(url.path().trim_start_matches('/').to_string())
}
