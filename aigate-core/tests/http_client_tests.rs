//! Tests for the pooled HTTP client against a mock server

use aigate_core::config::ConnectionConfig;
use aigate_core::http::{HttpClient, HttpExecutor, HttpRequest, RequestOptions, TransportError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(server: &MockServer, options: RequestOptions) -> HttpRequest {
    HttpRequest::new(format!("{}/v1/echo", server.uri()), json!({ "ping": true }), options)
        .header("Content-Type", "application/json")
        .header("x-api-key", "test-key")
}

#[test]
fn test_http_client_creation() {
    assert!(HttpClient::new().is_ok());
    assert!(HttpClient::from_config(&ConnectionConfig::default()).is_ok());
}

#[tokio::test]
async fn test_successful_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/echo"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({ "ping": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pong": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let reply = client.post_json(request(&server, RequestOptions::new())).await.unwrap();

    assert!(reply.is_success());
    assert_eq!(reply.status, 200);
    let body: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(body, json!({ "pong": true }));
}

#[tokio::test]
async fn test_request_id_header() {
    let server = MockServer::start().await;
    let options = RequestOptions::new();
    let request_id = options.request_id.to_string();

    Mock::given(method("POST"))
        .and(header("x-request-id", request_id.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    client.post_json(request(&server, options)).await.unwrap();
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": { "message": "boom" } })),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let reply = client.post_json(request(&server, RequestOptions::new())).await.unwrap();

    assert!(!reply.is_success());
    assert_eq!(reply.status, 500);
    assert!(reply.body.contains("boom"));
}

#[tokio::test]
async fn test_per_call_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap();
    let options = RequestOptions::new().with_timeout(Duration::from_millis(100));
    let err = client.post_json(request(&server, options)).await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout));
}

#[tokio::test]
async fn test_response_too_large() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let client = HttpClient::new().unwrap().with_max_response_size(16);
    let err = client.post_json(request(&server, RequestOptions::new())).await.unwrap_err();

    match err {
        TransportError::ResponseTooLarge { size, limit } => {
            assert_eq!(size, 64);
            assert_eq!(limit, 16);
        }
        other => panic!("Expected ResponseTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = HttpClient::new().unwrap();
    let request = HttpRequest::new(
        format!("http://127.0.0.1:{}/v1/echo", port),
        json!({}),
        RequestOptions::new(),
    );

    let err = client.post_json(request).await.unwrap_err();
    assert!(matches!(err, TransportError::Connect(_)));
}
