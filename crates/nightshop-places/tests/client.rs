//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use nightshop_core::types::{Coordinate, OpenState};
use nightshop_places::{PlacesClient, PlacesError};
use wiremock::matchers::{body_partial_json, header, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "nightshop-test/0", base_url)
        .expect("client construction should not fail")
        .retry_policy(0, 0)
}

fn brussels() -> Coordinate {
    Coordinate {
        lat: 50.85,
        lng: 4.35,
    }
}

#[tokio::test]
async fn search_text_returns_normalized_records() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "places": [
            {
                "id": "place-a",
                "displayName": { "text": "Nachtwinkel Centrum", "languageCode": "nl" },
                "formattedAddress": "Rue de la Loi 1, Brussels",
                "location": { "latitude": 50.8503, "longitude": 4.3517 },
                "currentOpeningHours": { "openNow": true },
                "rating": 4.2,
                "userRatingCount": 87
            },
            {
                "id": "place-b",
                "displayName": { "text": "Corner Shop" },
                "formattedAddress": "Chaussée d'Ixelles 5, Brussels",
                "location": { "latitude": 50.8371, "longitude": 4.3622 }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "textQuery": "night shop",
            "maxResultCount": 20
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .search_text("night shop", brussels(), 2000.0)
        .await
        .expect("should parse search response");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some("place-a"));
    assert_eq!(records[0].name, "Nachtwinkel Centrum");
    assert_eq!(records[0].open_state, OpenState::Open);
    assert_eq!(records[0].rating, Some(4.2));
    assert_eq!(records[1].id.as_deref(), Some("place-b"));
    assert_eq!(records[1].open_state, OpenState::Unknown);
}

#[tokio::test]
async fn search_text_sends_field_mask() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(headers("X-Goog-FieldMask", vec!["places.id", "places.displayName", "places.formattedAddress", "places.location", "places.currentOpeningHours.openNow", "places.rating", "places.userRatingCount", "places.photos.name"]))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let records = client
        .search_text("tabac", brussels(), 2000.0)
        .await
        .expect("empty envelope should parse");
    assert!(records.is_empty());
}

#[tokio::test]
async fn search_nearby_sends_categories_and_rank_preference() {
    let server = MockServer::start().await;

    let response = serde_json::json!({
        "places": [
            {
                "id": "place-c",
                "displayName": { "text": "Night & Day" },
                "formattedAddress": "Boulevard Anspach 20, Brussels",
                "location": { "latitude": 50.8485, "longitude": 4.3499 },
                "currentOpeningHours": { "openNow": true }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1/places:searchNearby"))
        .and(body_partial_json(serde_json::json!({
            "includedPrimaryTypes": ["convenience_store", "grocery_store"],
            "rankPreference": "DISTANCE"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let categories = vec![
        "convenience_store".to_string(),
        "grocery_store".to_string(),
    ];
    let records = client
        .search_nearby(&categories, brussels(), 2000.0)
        .await
        .expect("should parse nearby response");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("place-c"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_text("night shop", brussels(), 2000.0).await;
    assert!(matches!(
        result,
        Err(PlacesError::UnexpectedStatus { status: 403, .. })
    ));
}

#[tokio::test]
async fn rate_limit_status_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_text("night shop", brussels(), 2000.0).await;
    assert!(matches!(
        result,
        Err(PlacesError::RateLimited {
            retry_after_secs: 7
        })
    ));
}

#[tokio::test]
async fn server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "places": [ { "id": "place-d", "displayName": { "text": "Spar Express" } } ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PlacesClient::with_base_url("test-key", 30, "nightshop-test/0", &server.uri())
        .expect("client construction should not fail")
        .retry_policy(3, 0);

    let records = client
        .search_text("night shop", brussels(), 2000.0)
        .await
        .expect("should succeed after retries");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("place-d"));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_text("night shop", brussels(), 2000.0).await;
    assert!(matches!(result, Err(PlacesError::Deserialize { .. })));
}
