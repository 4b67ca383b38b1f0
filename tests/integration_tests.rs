//! Integration tests using mock HTTP server
//!
//! Drives the public client end to end: YAML settings → client → endpoint
//! calls → paging, retry and error decoding against a mock Web API.

use serde_json::json;
use spotify_web::options::limit;
use spotify_web::{AuthConfig, Client, ClientSettings, Error, Id, PlaylistTrackPage};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use test_case::test_case;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.uri())
        .auth(AuthConfig::bearer("test-token"))
        .build()
        .unwrap()
}

fn ids(count: usize) -> Vec<Id> {
    (0..count).map(|i| Id::new(format!("track{i}"))).collect()
}

// ============================================================================
// Paging
// ============================================================================

fn playlist_page(server: &MockServer, offset: u32, total: u32) -> serde_json::Value {
    let link = |offset: u32| {
        format!(
            "{}/playlists/pl/tracks?offset={offset}&limit=2",
            server.uri()
        )
    };
    let items: Vec<_> = (offset..total.min(offset + 2))
        .map(|i| json!({"added_at": "2024-01-01T00:00:00Z", "track": {"id": format!("t{i}"), "name": format!("Track {i}")}}))
        .collect();
    json!({
        "href": link(offset),
        "items": items,
        "limit": 2,
        "offset": offset,
        "total": total,
        "next": (offset + 2 < total).then(|| link(offset + 2)),
        "previous": (offset > 0).then(|| link(offset - 2)),
    })
}

async fn mount_playlist(server: &MockServer, total: u32) {
    for offset in (0..total).step_by(2) {
        Mock::given(method("GET"))
            .and(path("/playlists/pl/tracks"))
            .and(query_param("offset", offset.to_string()))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(server, offset, total)))
            .mount(server)
            .await;
    }
    // First request carries only the caller's options
    Mock::given(method("GET"))
        .and(path("/playlists/pl/tracks"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(server, 0, total)))
        .mount(server)
        .await;
}

fn track_ids(page: &PlaylistTrackPage) -> Vec<String> {
    page.items
        .iter()
        .filter_map(|entry| entry.track.as_ref())
        .map(|track| track.track.id.to_string())
        .collect()
}

#[tokio::test]
async fn test_walk_every_page_with_next_page() {
    let server = MockServer::start().await;
    mount_playlist(&server, 5).await;
    let client = client_for(&server);

    let mut page = client
        .get_playlist_tracks(&Id::new("pl"), &[limit(2)])
        .await
        .unwrap();
    let mut seen = track_ids(&page);
    let mut pages = 1;

    loop {
        match client.next_page(&page).await {
            Ok(next) => {
                seen.extend(track_ids(&next));
                page = next;
                pages += 1;
            }
            Err(Error::NoMorePages) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(pages, 3);
    assert_eq!(seen, vec!["t0", "t1", "t2", "t3", "t4"]);
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), page.total as usize);
}

#[tokio::test]
async fn test_page_walk_survives_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_playlist(&server, 4).await;

    let client = client_for(&server);
    let first = client
        .get_playlist_tracks(&Id::new("pl"), &[limit(2)])
        .await
        .unwrap();
    let second = assert_ok!(client.next_page(&first).await);

    assert_eq!(track_ids(&second), vec!["t2", "t3"]);
    assert!(matches!(
        client.next_page(&second).await,
        Err(Error::NoMorePages)
    ));
}

// ============================================================================
// Library
// ============================================================================

/// Mock of the user's saved tracks that remembers PUT and DELETE calls
struct SavedTracks {
    saved: Arc<Mutex<HashSet<String>>>,
}

impl Respond for SavedTracks {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let ids: Vec<String> = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "ids")
            .map(|(_, value)| value.split(',').map(String::from).collect())
            .unwrap_or_default();
        let mut saved = self.saved.lock().unwrap();

        match (request.method.as_str(), request.url.path()) {
            ("PUT", "/me/tracks") => {
                saved.extend(ids);
                ResponseTemplate::new(200)
            }
            ("DELETE", "/me/tracks") => {
                for id in &ids {
                    saved.remove(id);
                }
                ResponseTemplate::new(200)
            }
            ("GET", "/me/tracks/contains") => {
                let contains: Vec<bool> = ids.iter().map(|id| saved.contains(id)).collect();
                ResponseTemplate::new(200).set_body_json(contains)
            }
            _ => ResponseTemplate::new(404),
        }
    }
}

#[tokio::test]
async fn test_library_add_then_contains() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(SavedTracks {
            saved: Arc::new(Mutex::new(HashSet::new())),
        })
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tracks = ids(3);

    assert_eq!(
        client.user_has_tracks(&tracks).await.unwrap(),
        vec![false, false, false]
    );

    assert_ok!(client.add_tracks_to_library(&tracks[..2]).await);
    assert_eq!(
        client.user_has_tracks(&tracks).await.unwrap(),
        vec![true, true, false]
    );

    assert_ok!(client.remove_tracks_from_library(&tracks[..1]).await);
    assert_eq!(
        client.user_has_tracks(&tracks).await.unwrap(),
        vec![false, true, false]
    );
}

#[test_case(0 ; "empty")]
#[test_case(51 ; "one too many")]
#[tokio::test]
async fn test_library_rejects_id_count_without_request(count: usize) {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tracks = ids(count);

    let err = assert_err!(client.user_has_tracks(&tracks).await);
    assert!(matches!(err, Error::InvalidIdCount { min: 1, max: 50, actual } if actual == count));
    assert_err!(client.add_tracks_to_library(&tracks).await);
    assert_err!(client.remove_albums_from_library(&tracks).await);
}

#[test_case(1 ; "single")]
#[test_case(50 ; "maximum")]
#[tokio::test]
async fn test_library_accepts_id_count(count: usize) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/tracks/contains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![true; count]))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let saved = client.user_has_tracks(&ids(count)).await.unwrap();
    assert_eq!(saved.len(), count);
}

// ============================================================================
// Errors and settings
// ============================================================================

#[tokio::test]
async fn test_remote_error_reaches_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artists/nope"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"status": 400, "message": "invalid id"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_artist(&Id::new("nope")).await.unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.status, 400);
            assert_eq!(api.message, "invalid id");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_from_yaml_settings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artists/a1"))
        .and(header("Authorization", "Bearer from-yaml"))
        .and(header("Accept-Language", "sv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "a1", "name": "Robyn"})))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "base_url: {}\naccept_language: sv\nauth:\n  type: bearer\n  token: from-yaml\n",
        server.uri()
    );
    let client = ClientSettings::from_yaml_str(&yaml)
        .unwrap()
        .build_client()
        .unwrap();

    let artist = client.get_artist(&Id::new("a1")).await.unwrap();
    assert_eq!(artist.artist.name, "Robyn");
}
