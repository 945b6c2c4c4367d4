//! Pagination strategy implementations
//!
//! Each strategy turns a response into the opaque locator of the next page.
//! Whatever shape the server uses, the locator handed back is always a URL
//! that can be fetched verbatim.

use super::types::{
    resolve_locator, PageParamNames, PaginationConfig, Paginator, ResponseView, StopCondition,
};
use crate::decode::extract_string;

impl PaginationConfig {
    /// Build the paginator described by this config
    pub fn build(&self, params: PageParamNames) -> Box<dyn Paginator> {
        match self {
            PaginationConfig::None => Box::new(NoPaginator::new(params)),
            PaginationConfig::NextUrl {
                next_path,
                previous_path,
            } => {
                let mut paginator = NextUrlPaginator::new(next_path.clone()).with_params(params);
                if let Some(previous) = previous_path {
                    paginator = paginator.with_previous_path(previous.clone());
                }
                Box::new(paginator)
            }
            PaginationConfig::LinkHeader { rel } => {
                Box::new(LinkHeaderPaginator::new(rel.clone()).with_params(params))
            }
            PaginationConfig::Cursor {
                cursor_param,
                cursor_path,
                stop_condition,
            } => Box::new(
                CursorPaginator::new(cursor_param.clone(), cursor_path.clone(), stop_condition.clone())
                    .with_params(params),
            ),
        }
    }
}

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Next URL pagination (URL in response body)
///
/// Common patterns:
/// - `{ "meta": { "next_page_url": "https://video.twilio.com/v1/Rooms?PageToken=..." } }`
/// - `{ "next_page_uri": "/2010-04-01/Accounts/AC.../Calls.json?Page=1&PageToken=..." }`
///
/// Relative URIs are resolved against the URL of the page they came from.
#[derive(Debug, Clone)]
pub struct NextUrlPaginator {
    /// Path to the next page URL
    pub next_path: String,
    /// Path to the previous page URL
    pub previous_path: Option<String>,
    params: PageParamNames,
}

impl NextUrlPaginator {
    /// Create a new next URL paginator
    pub fn new(next_path: impl Into<String>) -> Self {
        Self {
            next_path: next_path.into(),
            previous_path: None,
            params: PageParamNames::default(),
        }
    }

    /// Also track the previous page URL
    #[must_use]
    pub fn with_previous_path(mut self, path: impl Into<String>) -> Self {
        self.previous_path = Some(path.into());
        self
    }

    /// Use custom query parameter names
    #[must_use]
    pub fn with_params(mut self, params: PageParamNames) -> Self {
        self.params = params;
        self
    }
}

impl Paginator for NextUrlPaginator {
    fn param_names(&self) -> &PageParamNames {
        &self.params
    }

    fn next_locator(&self, response: &ResponseView<'_>) -> Option<String> {
        let next = extract_string(response.body, &self.next_path)?;
        resolve_locator(response.url, &next)
    }

    fn previous_locator(&self, response: &ResponseView<'_>) -> Option<String> {
        let path = self.previous_path.as_ref()?;
        let previous = extract_string(response.body, path)?;
        resolve_locator(response.url, &previous)
    }
}

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 5988)
///
/// Format: `Link: <https://api.example.com/items?page=2>; rel="next", ...`
#[derive(Debug, Clone)]
pub struct LinkHeaderPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
    params: PageParamNames,
}

impl Default for LinkHeaderPaginator {
    fn default() -> Self {
        Self::new("next")
    }
}

impl LinkHeaderPaginator {
    /// Create a new link header paginator
    pub fn new(rel: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            params: PageParamNames::default(),
        }
    }

    /// Use custom query parameter names
    #[must_use]
    pub fn with_params(mut self, params: PageParamNames) -> Self {
        self.params = params;
        self
    }

    fn find(&self, response: &ResponseView<'_>, rel: &str) -> Option<String> {
        let header = response.headers.get("link")?.to_str().ok()?;
        let target = parse_link_header(header, rel)?;
        resolve_locator(response.url, &target)
    }
}

impl Paginator for LinkHeaderPaginator {
    fn param_names(&self) -> &PageParamNames {
        &self.params
    }

    fn next_locator(&self, response: &ResponseView<'_>) -> Option<String> {
        self.find(response, &self.rel)
    }

    fn previous_locator(&self, response: &ResponseView<'_>) -> Option<String> {
        self.find(response, "prev")
    }
}

/// Parse a Link header and extract the URL for the given rel
pub(crate) fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r.split_whitespace().any(|r| r == target_rel) {
                return Some(u.to_string());
            }
        }
    }

    None
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (e.g., `?starting_after=obj_123`)
///
/// The locator is the current page URL with the cursor parameter replaced.
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Path to the cursor in the response
    pub cursor_path: String,
    /// Stop condition
    pub stop_condition: StopCondition,
    params: PageParamNames,
}

impl CursorPaginator {
    /// Create a new cursor paginator
    pub fn new(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        stop_condition: StopCondition,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            stop_condition,
            params: PageParamNames::default(),
        }
    }

    /// Use custom query parameter names
    #[must_use]
    pub fn with_params(mut self, params: PageParamNames) -> Self {
        self.params = params;
        self
    }
}

impl Paginator for CursorPaginator {
    fn param_names(&self) -> &PageParamNames {
        &self.params
    }

    fn next_locator(&self, response: &ResponseView<'_>) -> Option<String> {
        if self
            .stop_condition
            .should_stop(response.body, response.record_count)
        {
            return None;
        }

        let cursor = extract_string(response.body, &self.cursor_path)?;
        if cursor.is_empty() {
            return None;
        }

        let mut url = url::Url::parse(response.url).ok()?;
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| *k != self.cursor_param.as_str())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(&self.cursor_param, &cursor);

        Some(url.to_string())
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator {
    params: PageParamNames,
}

impl NoPaginator {
    /// Create a paginator that never yields a next page
    pub fn new(params: PageParamNames) -> Self {
        Self { params }
    }
}

impl Paginator for NoPaginator {
    fn param_names(&self) -> &PageParamNames {
        &self.params
    }

    fn next_locator(&self, _response: &ResponseView<'_>) -> Option<String> {
        None
    }
}
