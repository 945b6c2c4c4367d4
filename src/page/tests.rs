//! Tests for the page module

use super::*;
use crate::adapter::mock::MockAdapter;
use serde_json::json;

#[test]
fn test_page_accessors() {
    let page = Page::new(vec!["A", "B"])
        .with_url("https://video.twilio.com/v1/Rooms?PageSize=2")
        .with_next_page_url(Some("https://video.twilio.com/v1/Rooms?PageToken=PA2".to_string()))
        .with_page_number(Some(0))
        .with_page_size(Some(2))
        .with_total(Some(5));

    assert_eq!(page.instances(), &["A", "B"]);
    assert_eq!(page.len(), 2);
    assert!(!page.is_empty());
    assert!(!page.is_last());
    assert_eq!(
        page.next_page_url(),
        Some("https://video.twilio.com/v1/Rooms?PageToken=PA2")
    );
    assert_eq!(page.previous_page_url(), None);
    assert_eq!(page.url(), Some("https://video.twilio.com/v1/Rooms?PageSize=2"));
    assert_eq!(page.page_number(), Some(0));
    assert_eq!(page.page_size(), Some(2));
    assert_eq!(page.total(), Some(5));
}

#[test]
fn test_empty_locator_is_terminal() {
    let page = Page::new(vec![1]).with_next_page_url(Some(String::new()));
    assert!(page.is_last());
    assert_eq!(page.next_page_url(), None);

    let page = Page::new(vec![1]).with_previous_page_url(Some("  ".to_string()));
    assert_eq!(page.previous_page_url(), None);
}

#[test]
fn test_page_iteration_preserves_order() {
    let page = Page::new(vec![3, 1, 2]);
    let seen: Vec<i32> = page.iter().copied().collect();
    assert_eq!(seen, vec![3, 1, 2]);

    let mut by_ref = Vec::new();
    for value in &page {
        by_ref.push(*value);
    }
    assert_eq!(by_ref, vec![3, 1, 2]);
    assert_eq!(page.into_records(), vec![3, 1, 2]);
}

#[test]
fn test_into_parts() {
    let page = Page::new(vec!["A"]).with_next_page_url(Some("mock://pages/1".to_string()));
    let (records, next) = page.into_parts();
    assert_eq!(records, vec!["A"]);
    assert_eq!(next.as_deref(), Some("mock://pages/1"));
}

#[test]
fn test_page_serializes_to_json() {
    let page = Page::new(vec![json!({"sid": "RM1"})])
        .with_url("https://video.twilio.com/v1/Rooms")
        .with_page_number(Some(0));

    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["records"], json!([{"sid": "RM1"}]));
    assert_eq!(value["next_page_url"], json!(null));
    assert_eq!(value["url"], json!("https://video.twilio.com/v1/Rooms"));
    assert_eq!(value["page_number"], json!(0));
}

#[tokio::test]
async fn test_next_page_on_last_page_does_not_fetch() {
    let adapter = MockAdapter::letters();
    let page: Page<String> = Page::new(vec!["Z".to_string()]);

    assert!(page.next_page(&adapter).await.unwrap().is_none());
    assert!(page.previous_page(&adapter).await.unwrap().is_none());
    assert_eq!(adapter.fetches(), 0);
}

#[tokio::test]
async fn test_next_page_fetches_locator() {
    let adapter = MockAdapter::letters();
    let page: Page<String> =
        Page::new(vec!["C".to_string()]).with_next_page_url(Some(MockAdapter::url(1)));

    let next = page.next_page(&adapter).await.unwrap().unwrap();
    assert_eq!(next.instances(), &["D", "E"]);
    assert_eq!(next.url(), Some("mock://pages/1"));
    assert_eq!(adapter.fetches(), 1);
    assert_eq!(adapter.requests(), vec![PageRequest::Url(MockAdapter::url(1))]);
}

#[tokio::test]
async fn test_previous_page_fetches_locator() {
    let adapter = MockAdapter::letters();
    let page: Page<String> =
        Page::new(vec!["D".to_string()]).with_previous_page_url(Some(MockAdapter::url(0)));

    let previous = page.previous_page(&adapter).await.unwrap().unwrap();
    assert_eq!(previous.instances(), &["A", "B", "C"]);
}

#[tokio::test]
async fn test_next_page_transport_error() {
    let adapter = MockAdapter::letters().failing_on(1);
    let page: Page<String> =
        Page::new(vec!["C".to_string()]).with_next_page_url(Some(MockAdapter::url(1)));

    let err = page.next_page(&adapter).await.unwrap_err();
    assert!(err.is_transport());
}
