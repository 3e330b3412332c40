//! Tests for the gateway module

use super::*;
use crate::config::ApiConfig;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::PageTarget;
use crate::types::{BackoffType, FeedKind};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer, client_id: Option<&str>) -> UnsplashGateway {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
        .no_rate_limit()
        .build();
    UnsplashGateway::with_client(
        HttpClient::with_config(config).unwrap(),
        client_id.map(String::from),
    )
}

fn request(feed: FeedKind, page: u32) -> PageRequest {
    PageRequest {
        session: SessionId(1),
        feed,
        page,
        per_page: 10,
        order: "popular".to_string(),
    }
}

#[test]
fn test_page_request_for_target() {
    let target = PageTarget::random(17, 3, false);
    let request = PageRequest::for_target(SessionId(4), FeedKind::Featured, &target, 30);

    assert_eq!(request.session, SessionId(4));

    assert_eq!(request.page, 17);
    assert_eq!(request.per_page, 30);
    assert_eq!(request.order, "latest");
    assert_eq!(request.feed, FeedKind::Featured);
}

#[test]
fn test_page_response_constructors() {
    let ok = PageResponse::success(vec![crate::Photo::new("a")]);
    assert!(ok.successful);
    assert_eq!(ok.len(), 1);

    let refused = PageResponse::unsuccessful();
    assert!(!refused.successful);
    assert!(refused.is_empty());
}

#[tokio::test]
async fn test_fetch_new_photos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .and(query_param("order_by", "popular"))
        .and(query_param("client_id", "key"))
        .and(header("Accept-Version", "v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "one", "likes": 3},
            {"id": "two"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway(&server, Some("key"))
        .fetch(request(FeedKind::New, 2))
        .await
        .unwrap();

    assert!(response.successful);
    let ids: Vec<_> = response.photos.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["one", "two"]);
}

#[tokio::test]
async fn test_fetch_featured_uses_curated_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos/curated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway(&server, None)
        .fetch(request(FeedKind::Featured, 1))
        .await
        .unwrap();

    assert!(response.successful);
    assert!(response.is_empty());
}

#[tokio::test]
async fn test_client_error_is_unsuccessful_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(401).set_body_string("OAuth error"))
        .mount(&server)
        .await;

    let response = gateway(&server, None)
        .fetch(request(FeedKind::New, 1))
        .await
        .unwrap();

    assert!(!response.successful);
}

#[tokio::test]
async fn test_server_error_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = gateway(&server, None)
        .fetch(request(FeedKind::New, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_undecodable_body_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": ["nope"]})))
        .mount(&server)
        .await;

    let err = gateway(&server, None)
        .fetch(request(FeedKind::New, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let gateway = Arc::new(gateway(&server, None));
    let task = {
        let gateway = Arc::clone(&gateway);
        tokio::spawn(async move { gateway.fetch(request(FeedKind::New, 1)).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    gateway.cancel(SessionId(1));

    let result = tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(Error::Canceled)));
}

#[tokio::test]
async fn test_cancel_is_scoped_to_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "kept"}]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let gateway = Arc::new(gateway(&server, None));
    let spawn_fetch = |session: u64| {
        let gateway = Arc::clone(&gateway);
        let mut request = request(FeedKind::New, 1);
        request.session = SessionId(session);
        tokio::spawn(async move { gateway.fetch(request).await })
    };
    let canceled = spawn_fetch(7);
    let kept = spawn_fetch(8);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gateway.open_scopes(), 2);
    gateway.cancel(SessionId(7));
    assert_eq!(gateway.open_scopes(), 1);

    let canceled = canceled.await.unwrap();
    assert!(matches!(canceled, Err(Error::Canceled)));

    let kept = tokio::time::timeout(Duration::from_secs(2), kept)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(kept.successful);
    assert_eq!(kept.photos[0].id, "kept");
}

#[test]
fn test_new_requires_client_id() {
    let err = UnsplashGateway::new(&ApiConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api.client_id"));

    let api = ApiConfig {
        client_id: Some("key".to_string()),
        ..ApiConfig::default()
    };
    assert!(UnsplashGateway::new(&api).is_ok());
}
