//! Tests for the adapter module

use super::*;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::PaginationConfig;
use crate::schema::{FieldType, MetaPaths, ResourceSchema};
use crate::types::StringMap;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Room {
    sid: String,
    max_participants: Option<u32>,
}

fn client_for(server: &MockServer) -> Arc<HttpClient> {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    Arc::new(HttpClient::with_config(config).unwrap())
}

fn rooms_schema() -> ResourceSchema {
    ResourceSchema::new("rooms", "/v1/Rooms")
        .with_record_key("rooms")
        .with_field("sid", FieldType::String)
        .with_field("max_participants", FieldType::Integer)
}

// ============================================================================
// PageRequest Tests
// ============================================================================

#[test]
fn test_page_request_from_options() {
    let request: PageRequest = PageOptions::new().with_page_size(5).into();
    assert_eq!(request, PageRequest::Options(PageOptions::new().with_page_size(5)));
    assert_eq!(PageRequest::first(), PageRequest::Options(PageOptions::default()));
}

// ============================================================================
// HttpResourceAdapter Tests
// ============================================================================

#[test]
fn test_adapter_renders_uri() {
    let client = Arc::new(HttpClient::new().unwrap());
    let schema = ResourceSchema::new("roles", "/v1/Services/{ServiceSid}/Roles");
    let params: StringMap = [("ServiceSid".to_string(), "IS1".to_string())].into();

    let adapter = HttpResourceAdapter::<Value>::with_params(client.clone(), schema.clone(), &params)
        .unwrap();
    assert_eq!(adapter.uri(), "/v1/Services/IS1/Roles");

    let err = HttpResourceAdapter::<Value>::new(client, schema).unwrap_err();
    assert!(err.to_string().contains("ServiceSid"));
}

#[tokio::test]
async fn test_adapter_first_page_typed() {
    let server = MockServer::start().await;
    let next = format!("{}/v1/Rooms?PageSize=2&Page=1&PageToken=PA2", server.uri());

    Mock::given(method("GET"))
        .and(path("/v1/Rooms"))
        .and(query_param("PageSize", "2"))
        .and(query_param("Status", "completed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rooms": [
                {"sid": "RM1", "max_participants": 10},
                {"sid": "RM2", "max_participants": null}
            ],
            "meta": {
                "page": 0,
                "page_size": 2,
                "next_page_url": next,
                "previous_page_url": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = HttpResourceAdapter::<Room>::new(client_for(&server), rooms_schema()).unwrap();
    let options = PageOptions::new()
        .with_page_size(2)
        .with_filter("Status", "completed");
    let page = adapter.load_page(&PageRequest::Options(options)).await.unwrap();

    assert_eq!(
        page.instances(),
        &[
            Room {
                sid: "RM1".to_string(),
                max_participants: Some(10)
            },
            Room {
                sid: "RM2".to_string(),
                max_participants: None
            }
        ]
    );
    assert_eq!(page.next_page_url(), Some(next.as_str()));
    assert_eq!(page.previous_page_url(), None);
    assert_eq!(page.page_number(), Some(0));
    assert_eq!(page.page_size(), Some(2));
    assert_eq!(page.total(), None);
    assert!(page.url().unwrap().starts_with(&server.uri()));
}

#[tokio::test]
async fn test_adapter_follows_locator_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Rooms"))
        .and(query_param("PageToken", "PA2"))
        .and(query_param("Page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rooms": [{"sid": "RM3"}],
            "meta": {"page": 1, "page_size": 2, "next_page_url": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = HttpResourceAdapter::<Room>::new(client_for(&server), rooms_schema()).unwrap();
    let url = format!("{}/v1/Rooms?PageSize=2&Page=1&PageToken=PA2", server.uri());
    let page = adapter.load_page(&PageRequest::Url(url)).await.unwrap();

    assert_eq!(page.len(), 1);
    assert!(page.is_last());
    assert_eq!(page.page_number(), Some(1));
}

#[tokio::test]
async fn test_adapter_encodes_path_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Services/IS%231/Roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [{"sid": "RL1"}],
            "meta": {"next_page_url": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let schema =
        ResourceSchema::new("roles", "/v1/Services/{ServiceSid}/Roles").with_record_key("roles");
    let params: StringMap = [("ServiceSid".to_string(), "IS#1".to_string())].into();
    let adapter =
        HttpResourceAdapter::<Value>::with_params(client_for(&server), schema, &params).unwrap();
    assert_eq!(adapter.uri(), "/v1/Services/IS%231/Roles");

    let page = adapter.load_page(&PageRequest::first()).await.unwrap();
    assert_eq!(page.instances(), &[json!({"sid": "RL1"})]);
}

#[tokio::test]
async fn test_adapter_rejects_empty_locator() {
    let adapter =
        HttpResourceAdapter::<Value>::new(Arc::new(HttpClient::new().unwrap()), rooms_schema())
            .unwrap();
    let err = adapter
        .fetch_page(&PageRequest::Url(String::new()))
        .await
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn test_adapter_relative_next_page_uri() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calls": [{"sid": "CA1"}],
            "page": 0,
            "page_size": 1,
            "next_page_uri": "/2010-04-01/Accounts/AC1/Calls.json?Page=1&PageSize=1&PageToken=PACA1"
        })))
        .mount(&server)
        .await;

    let schema = ResourceSchema::new("calls", "/2010-04-01/Accounts/{AccountSid}/Calls.json")
        .with_record_key("calls")
        .with_pagination(PaginationConfig::next_url("next_page_uri"))
        .with_meta(MetaPaths {
            page: Some("page".to_string()),
            page_size: Some("page_size".to_string()),
            total: None,
        });
    let params: StringMap = [("AccountSid".to_string(), "AC1".to_string())].into();
    let adapter =
        HttpResourceAdapter::<Value>::with_params(client_for(&server), schema, &params).unwrap();

    let page = adapter.load_page(&PageRequest::first()).await.unwrap();
    assert_eq!(
        page.next_page_url(),
        Some(
            format!(
                "{}/2010-04-01/Accounts/AC1/Calls.json?Page=1&PageSize=1&PageToken=PACA1",
                server.uri()
            )
            .as_str()
        )
    );
    assert_eq!(page.page_size(), Some(1));
}

#[tokio::test]
async fn test_adapter_field_type_mismatch_is_deserialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rooms": [{"sid": "RM1", "max_participants": "ten"}],
            "meta": {"next_page_url": null}
        })))
        .mount(&server)
        .await;

    let adapter = HttpResourceAdapter::<Value>::new(client_for(&server), rooms_schema()).unwrap();
    let err = adapter.load_page(&PageRequest::first()).await.unwrap_err();
    assert!(err.is_deserialization());
}

#[tokio::test]
async fn test_adapter_missing_record_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {}})))
        .mount(&server)
        .await;

    let adapter = HttpResourceAdapter::<Value>::new(client_for(&server), rooms_schema()).unwrap();
    let err = adapter.load_page(&PageRequest::first()).await.unwrap_err();
    assert!(err.is_deserialization());
    assert!(err.to_string().contains("rooms"));
}

#[tokio::test]
async fn test_adapter_typed_record_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rooms": [{"unique_name": "no sid"}],
            "meta": {}
        })))
        .mount(&server)
        .await;

    let adapter = HttpResourceAdapter::<Room>::new(client_for(&server), rooms_schema()).unwrap();
    let err = adapter.load_page(&PageRequest::first()).await.unwrap_err();
    assert!(err.is_deserialization());
    assert!(err.to_string().contains("rooms record 0"));
}

#[tokio::test]
async fn test_adapter_server_error_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Rooms"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = HttpResourceAdapter::<Value>::new(client_for(&server), rooms_schema()).unwrap();
    let err = adapter.load_page(&PageRequest::first()).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_adapter_link_header_pagination() {
    let server = MockServer::start().await;
    let next = format!("{}/items?page=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!("<{next}>; rel=\"next\"").as_str())
                .set_body_json(json!([{"id": 1}, {"id": 2}])),
        )
        .mount(&server)
        .await;

    let schema = ResourceSchema::new("items", "/items")
        .with_pagination(PaginationConfig::link_header("next"));
    let adapter = HttpResourceAdapter::<Value>::new(client_for(&server), schema).unwrap();

    let page = adapter.load_page(&PageRequest::first()).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.next_page_url(), Some(next.as_str()));
}

// ============================================================================
// Mock Adapter Tests
// ============================================================================

#[tokio::test]
async fn test_mock_adapter_chain() {
    let adapter = mock::MockAdapter::letters();

    let first = adapter.load_page(&PageRequest::first()).await.unwrap();
    assert_eq!(first.instances(), &["A", "B", "C"]);
    assert_eq!(first.next_page_url(), Some("mock://pages/1"));

    let second = first.next_page(&adapter).await.unwrap().unwrap();
    assert_eq!(second.instances(), &["D", "E"]);
    assert!(second.is_last());
    assert_eq!(adapter.fetches(), 2);
}
