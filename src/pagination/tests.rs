//! Tests for the pagination module

use super::types::unwrap_page;
use super::*;
use crate::client::Client;
use crate::error::Error;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Item {
    id: String,
}

fn client_for(server: &MockServer) -> Client {
    Client::builder().base_url(server.uri()).build().unwrap()
}

fn page_json(server: &MockServer, ids: &[&str], offset: u32, total: u32) -> serde_json::Value {
    let link = |offset: u32| format!("{}/items?offset={offset}&limit=2", server.uri());
    let next = (offset + 2 < total).then(|| link(offset + 2));
    let previous = (offset > 0).then(|| link(offset - 2));
    json!({
        "href": link(offset),
        "items": ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
        "limit": 2,
        "offset": offset,
        "total": total,
        "next": next,
        "previous": previous,
    })
}

async fn mount_pages(server: &MockServer) {
    for (offset, ids) in [(0, vec!["a", "b"]), (2, vec!["c", "d"]), (4, vec!["e"])] {
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(server, &ids, offset, 5)))
            .mount(server)
            .await;
    }
}

#[test]
fn test_page_deserialize() {
    let page: Page<Item> = serde_json::from_value(json!({
        "href": "https://api.spotify.com/v1/me/tracks?offset=0&limit=2",
        "items": [{"id": "a"}, {"id": "b"}],
        "limit": 2,
        "offset": 0,
        "total": 3,
        "previous": null,
        "next": "https://api.spotify.com/v1/me/tracks?offset=2&limit=2"
    }))
    .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.total, 3);
    assert!(page.has_next());
    assert!(!page.has_previous());
}

#[test]
fn test_page_null_items_is_empty() {
    let page: Page<Item> = serde_json::from_value(json!({"items": null, "total": 0})).unwrap();
    assert!(page.is_empty());
    assert!(!page.has_next());
}

#[test]
fn test_unwrap_page_envelope() {
    let wrapped: Page<Item> = unwrap_page(json!({
        "categories": {"items": [{"id": "party"}], "total": 1}
    }))
    .unwrap();
    assert_eq!(wrapped.items, vec![Item { id: "party".into() }]);

    let plain: Page<Item> = unwrap_page(json!({"items": [{"id": "x"}], "total": 1})).unwrap();
    assert_eq!(plain.items, vec![Item { id: "x".into() }]);

}

#[test]
fn test_unwrap_page_skips_scalar_siblings() {
    let page: Page<Item> = unwrap_page(json!({
        "message": "Monday morning music, coming right up!",
        "playlists": {"items": [{"id": "p2"}], "total": 2, "offset": 1}
    }))
    .unwrap();

    assert_eq!(page.items, vec![Item { id: "p2".into() }]);
    assert_eq!(page.offset, 1);
}

#[test]
fn test_non_page_body_is_rejected() {
    let missing_items = unwrap_page::<Item>(json!({"total": 7}));
    assert!(matches!(missing_items, Err(Error::JsonParse(_))));

    let unrelated = unwrap_page::<Item>(json!({"message": "hi", "error": {"status": 500}}));
    assert!(matches!(unrelated, Err(Error::JsonParse(_))));

    let ambiguous = unwrap_page::<Item>(json!({
        "albums": {"items": []},
        "playlists": {"items": []}
    }));
    assert!(matches!(ambiguous, Err(Error::JsonParse(_))));
}

#[tokio::test]
async fn test_next_page_on_last_page_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let last: Page<Item> = Page {
        total: 1,
        items: vec![Item { id: "a".into() }],
        ..Page::default()
    };

    assert!(matches!(client.next_page(&last).await, Err(Error::NoMorePages)));
    assert!(matches!(
        client.previous_page(&last).await,
        Err(Error::NoMorePages)
    ));
}

#[tokio::test]
async fn test_next_then_previous() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();

    let second = client.next_page(&first).await.unwrap();
    assert_eq!(second.offset, 2);
    assert_eq!(second.items, vec![Item { id: "c".into() }, Item { id: "d".into() }]);

    let back = client.previous_page(&second).await.unwrap();
    assert_eq!(back, first);
}

#[tokio::test]
async fn test_next_page_is_repeatable() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();
    let snapshot = first.clone();

    let once = client.next_page(&first).await.unwrap();
    let twice = client.next_page(&first).await.unwrap();

    assert_eq!(once, twice);
    assert_eq!(first, snapshot);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_restored_page_resumes() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();
    let stored = serde_json::to_string(&first).unwrap();

    let restored: Page<Item> = serde_json::from_str(&stored).unwrap();
    let second = client.next_page(&restored).await.unwrap();
    assert_eq!(second.offset, 2);
}

#[tokio::test]
async fn test_pages_walks_every_page() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();

    let pages: Vec<Page<Item>> = client.pages(first).try_collect().await.unwrap();
    let ids: Vec<String> = pages
        .iter()
        .flat_map(|p| p.items.iter().map(|i| i.id.clone()))
        .collect();

    assert_eq!(pages.len(), 3);
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_pages_fetches_lazily() {
    let server = MockServer::start().await;
    mount_pages(&server).await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();

    let mut stream = Box::pin(client.pages(first));
    let head = stream.next().await.unwrap().unwrap();
    assert_eq!(head.offset, 0);
    assert!(server.received_requests().await.unwrap().is_empty());

    let next = stream.next().await.unwrap().unwrap();
    assert_eq!(next.offset, 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_pages_stops_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"status": 404, "message": "gone"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();

    let results: Vec<_> = client.pages(first).collect().await;
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(results[1].as_ref().unwrap_err().status(), Some(404));
}

#[tokio::test]
async fn test_next_page_follows_featured_playlists_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/browse/featured-playlists"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Monday morning music, coming right up!",
            "playlists": {
                "items": [{"id": "p2"}],
                "offset": 1,
                "limit": 1,
                "total": 2,
                "next": null,
                "previous": format!("{}/browse/featured-playlists?offset=0&limit=1", server.uri())
            }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first: Page<Item> = Page {
        items: vec![Item { id: "p1".into() }],
        limit: 1,
        total: 2,
        next: Some(format!(
            "{}/browse/featured-playlists?offset=1&limit=1",
            server.uri()
        )),
        ..Page::default()
    };

    let second = client.next_page(&first).await.unwrap();
    assert_eq!(second.items, vec![Item { id: "p2".into() }]);
    assert!(second.has_previous());

    let pages: Vec<Page<Item>> = client.pages(first).try_collect().await.unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].items, vec![Item { id: "p2".into() }]);
}

#[tokio::test]
async fn test_next_page_rejects_non_page_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 5})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first: Page<Item> = serde_json::from_value(page_json(&server, &["a", "b"], 0, 5)).unwrap();

    let results: Vec<_> = client.pages(first).collect().await;
    assert_eq!(results.len(), 2);
    assert!(matches!(results[1], Err(Error::JsonParse(_))));
}
