//! Mock ESA tests for the async session.

use std::time::Duration;

use dvfu_client::{AppCode, ClientConfig, Credentials, Error, EsaSession, ServiceUrl};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(ServiceUrl::new(server.uri()).unwrap())
}

async fn login(server: &MockServer) -> Result<EsaSession, Error> {
    EsaSession::login(
        mock_config(server),
        Credentials::new("ivanov.ii", "secret123"),
        AppCode::new("YXBwOnNlY3JldA=="),
    )
    .await
}

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .and(header("authorization", "Basic YXBwOnNlY3JldA=="))
        .and(header("cache-control", "no-cache"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "grant_type": "password",
            "username": "ivanov.ii",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "xyz"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = login(&server).await.unwrap();
    assert_eq!(session.token().unwrap().as_str(), "xyz");
    assert_eq!(session.login_name(), "ivanov.ii");

    server.verify().await;
}

#[tokio::test]
async fn test_login_records_token_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "xyz",
            "token_type": "Bearer",
            "expires_in": 86400,
            "refresh_token": "r"
        })))
        .mount(&server)
        .await;

    let session = login(&server).await.unwrap();
    let info = session.token_info().unwrap();
    assert_eq!(info.token_type.as_deref(), Some("Bearer"));
    assert_eq!(info.expires_in, Some(Duration::from_secs(86400)));
}

#[tokio::test]
async fn test_login_rejected_yields_no_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid credentials given."
        })))
        .mount(&server)
        .await;

    let session = login(&server).await.unwrap();
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_token_in_non_200_body_is_still_used() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"access_token": "abc"})))
        .mount(&server)
        .await;

    let session = login(&server).await.unwrap();
    assert_eq!(session.token().unwrap().as_str(), "abc");
}

#[tokio::test]
async fn test_non_json_body_yields_no_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let session = login(&server).await.unwrap();
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_unreachable_server_yields_no_token() {
    let config = ClientConfig::new(ServiceUrl::new("http://127.0.0.1:1").unwrap());
    let session = EsaSession::login(
        config,
        Credentials::new("ivanov.ii", "secret123"),
        AppCode::new("YXBwOnNlY3JldA=="),
    )
    .await
    .unwrap();

    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_invalid_app_code_is_rejected() {
    let server = MockServer::start().await;

    let result = EsaSession::login(
        mock_config(&server),
        Credentials::new("ivanov.ii", "secret123"),
        AppCode::new("bad\ncode"),
    )
    .await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
