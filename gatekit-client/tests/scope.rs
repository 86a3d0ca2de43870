//! Scope discovery behavior: laziness, single-flight, and failure
//! messaging.

use std::sync::Arc;

use gatekit_client::types::{Resource, User};
use gatekit_client::{ClientError, ConfigBuilder, Gatekit};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCOPE_PATH: &str = "/v1/api-key/scope";

async fn mount_scope(server: &MockServer, expect: u64) {
    Mock::given(method("GET"))
        .and(path(SCOPE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project_id": "proj",
            "environment_id": "env",
        })))
        .expect(expect)
        .mount(server)
        .await;
}

#[tokio::test]
async fn discovered_scope_addresses_scoped_endpoints() {
    let server = MockServer::start().await;
    mount_scope(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/facts/proj/env/role_assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "user": "u1", "role": "viewer"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/schema/proj/env/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"key": "viewer", "permissions": ["doc:read"], "extends": []}],
            "total": 1,
        })))
        .mount(&server)
        .await;

    let config = ConfigBuilder::new("gk_test").api_url(server.uri()).build();
    let client = Gatekit::new(config).unwrap();

    assert!(client
        .check(&User::new("u1"), "read", &Resource::new("doc"))
        .await
        .unwrap());

    let scope = client.scope().await.unwrap();
    assert_eq!(scope.project_id, "proj");
    assert_eq!(scope.environment_id, "env");
}

#[tokio::test]
async fn concurrent_first_callers_share_one_fetch() {
    let server = MockServer::start().await;
    mount_scope(&server, 1).await;

    let config = ConfigBuilder::new("gk_test").api_url(server.uri()).build();
    let client = Arc::new(Gatekit::new(config).unwrap());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.init().await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }
    // The expect(1) on the mock verifies exactly one fetch on drop.
}

#[tokio::test]
async fn preconfigured_scope_skips_discovery() {
    let server = MockServer::start().await;
    mount_scope(&server, 0).await;

    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .scope("proj", "env")
        .build();
    let client = Gatekit::new(config).unwrap();

    client.init().await.unwrap();
    let scope = client.scope().await.unwrap();
    assert_eq!(scope.project_id, "proj");
}

#[tokio::test]
async fn empty_preconfigured_scope_falls_back_to_discovery() {
    let server = MockServer::start().await;
    mount_scope(&server, 1).await;

    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .scope("", "")
        .build();
    let client = Gatekit::new(config).unwrap();

    let scope = client.scope().await.unwrap();
    assert_eq!(scope.project_id, "proj");
    assert_eq!(scope.environment_id, "env");
}

#[tokio::test]
async fn discovery_failure_names_both_remediations() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SCOPE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "invalid API key"
        })))
        .mount(&server)
        .await;

    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .retry_attempts(0)
        .build();
    let client = Gatekit::new(config).unwrap();

    let err = client.init().await.unwrap_err();
    assert!(matches!(err, ClientError::Scope { .. }));

    let message = err.to_string();
    assert!(message.contains("project_id and environment_id"));
    assert!(message.contains("valid scope"));
    assert!(message.contains("invalid API key"));
}

#[tokio::test]
async fn scope_failure_propagates_even_in_lenient_mode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SCOPE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = ConfigBuilder::new("gk_test")
        .api_url(server.uri())
        .retry_attempts(0)
        .build();
    let client = Gatekit::new(config).unwrap();

    let err = client
        .check(&User::new("u1"), "read", &Resource::new("doc"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Scope { .. }));
}

#[tokio::test]
async fn scope_is_fetched_once_across_many_checks() {
    let server = MockServer::start().await;
    mount_scope(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/facts/proj/env/role_assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let config = ConfigBuilder::new("gk_test").api_url(server.uri()).build();
    let client = Gatekit::new(config).unwrap();

    for _ in 0..3 {
        let response = client
            .check_with_details(&User::new("u1"), "read", &Resource::new("doc"))
            .await
            .unwrap();
        assert!(!response.allowed);
    }
}
