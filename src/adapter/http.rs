//! Schema-driven HTTP adapter

use super::{PageRequest, ResourceAdapter};
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RawResponse, RequestConfig};
use crate::page::Page;
use crate::pagination::{Paginator, ResponseView};
use crate::schema::{MetaPaths, ResourceSchema};
use crate::template;
use crate::types::StringMap;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Generic adapter for any resource described by a [`ResourceSchema`]
///
/// `T` is the record type: a struct deriving `Deserialize`, or
/// `serde_json::Value` to keep records untyped.
pub struct HttpResourceAdapter<T> {
    client: Arc<HttpClient>,
    schema: ResourceSchema,
    uri: String,
    decoder: JsonDecoder,
    paginator: Box<dyn Paginator>,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpResourceAdapter<T> {
    /// Create an adapter for a schema whose URI has no path parameters
    pub fn new(client: Arc<HttpClient>, schema: ResourceSchema) -> Result<Self> {
        Self::with_params(client, schema, &StringMap::new())
    }

    /// Create an adapter, filling the URI path parameters from `params`
    pub fn with_params(
        client: Arc<HttpClient>,
        schema: ResourceSchema,
        params: &StringMap,
    ) -> Result<Self> {
        let uri = template::render(&schema.uri, params)?;
        let decoder = match &schema.record_key {
            Some(key) => JsonDecoder::with_path(key.clone()),
            None => JsonDecoder::new(),
        };
        let paginator = schema.pagination.build(schema.page_params.clone());

        Ok(Self {
            client,
            schema,
            uri,
            decoder,
            paginator,
            _record: PhantomData,
        })
    }

    /// The resource schema
    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// The rendered resource URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Absolute URL of the first page
    pub fn url(&self) -> String {
        self.client.build_url(&self.uri)
    }
}

#[async_trait]
impl<T> ResourceAdapter for HttpResourceAdapter<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Record = T;

    async fn fetch_page(&self, request: &PageRequest) -> Result<RawResponse> {
        match request {
            PageRequest::Url(url) => {
                if url.trim().is_empty() {
                    return Err(Error::invalid_argument("url", "page URL must not be empty"));
                }
                debug!("Fetching {} page {url}", self.schema.name);
                self.client.get(url).await
            }
            PageRequest::Options(options) => {
                let query = self.paginator.initial_params(options);
                let url = self.url();
                debug!("Fetching first {} page from {url} {:?}", self.schema.name, query);
                self.client
                    .get_with_config(&url, RequestConfig::new().queries(query))
                    .await
            }
        }
    }

    fn deserialize(&self, raw: &RawResponse) -> Result<Page<T>> {
        let document = self.decoder.decode_raw(raw.text()?)?;
        let values = self.decoder.extract_records(&document)?;

        let view = ResponseView {
            url: &raw.url,
            body: &document,
            headers: &raw.headers,
            record_count: values.len(),
        };
        let next = self.paginator.next_locator(&view);
        let previous = self.paginator.previous_locator(&view);

        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                self.schema.validate_record(&value)?;
                serde_json::from_value(value).map_err(|e| {
                    Error::decode(format!("{} record {index}: {e}", self.schema.name))
                })
            })
            .collect::<Result<Vec<T>>>()?;

        let meta = &self.schema.meta;
        debug!(
            "Decoded {} {} records, next page: {}",
            records.len(),
            self.schema.name,
            next.as_deref().unwrap_or("none")
        );

        Ok(Page::new(records)
            .with_url(raw.url.clone())
            .with_next_page_url(next)
            .with_previous_page_url(previous)
            .with_page_number(MetaPaths::read(meta.page.as_deref(), &document))
            .with_page_size(MetaPaths::read(meta.page_size.as_deref(), &document))
            .with_total(MetaPaths::read(meta.total.as_deref(), &document)))
    }
}

impl<T> std::fmt::Debug for HttpResourceAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResourceAdapter")
            .field("resource", &self.schema.name)
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}
