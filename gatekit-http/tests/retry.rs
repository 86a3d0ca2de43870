//! Transport retry and classification behavior against a mock server.

use gatekit_config::ConfigBuilder;
use gatekit_http::{HttpError, Transport};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> Transport {
    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .build();
    Transport::new(&config).unwrap()
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let result: serde_json::Value = transport
        .get(&format!("{}/flaky", server.uri()))
        .await
        .unwrap();

    assert_eq!(result, json!({"ok": true}));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "role not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let err = transport
        .get::<serde_json::Value>(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    match err {
        HttpError::Api(api) => {
            assert_eq!(api.status, 404);
            assert!(api.is_not_found());
            assert_eq!(api.message, "role not found");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn retry_budget_is_exhausted_on_persistent_failure() {
    let server = MockServer::start().await;

    // Initial attempt plus two retries.
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .retry_attempts(2)
        .build();
    let transport = Transport::new(&config).unwrap();

    let err = transport
        .get::<serde_json::Value>(&format!("{}/down", server.uri()))
        .await
        .unwrap_err();

    match err {
        HttpError::Api(api) => assert_eq!(api.status, 503),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn credentials_and_custom_headers_are_injected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/echo"))
        .and(header("authorization", "Bearer gk_test"))
        .and(header("content-type", "application/json"))
        .and(header("x-trace", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .header("x-trace", "abc123")
        .build();
    let transport = Transport::new(&config).unwrap();

    let _: serde_json::Value = transport.get(&format!("{}/echo", server.uri())).await.unwrap();
}

#[tokio::test]
async fn empty_success_body_is_a_noop_for_unit_calls() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/thing"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    transport
        .delete(&format!("{}/thing", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_success_body_is_an_error_when_a_value_is_required() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/void"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let err = transport
        .get::<serde_json::Value>(&format!("{}/void", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::EmptyBody));
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weird"))
        .respond_with(ResponseTemplate::new(400).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    let err = transport
        .get::<serde_json::Value>(&format!("{}/weird", server.uri()))
        .await
        .unwrap_err();

    match err {
        HttpError::Api(api) => assert_eq!(api.message, "<html>nope</html>"),
        other => panic!("expected ApiError, got {other:?}"),
    }
}
