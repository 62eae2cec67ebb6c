//! End-to-end tests for the `dvfu` binary against mock servers.

mod common;

use common::{args, config_path, run_cli, run_cli_async, run_cli_success};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn blackbox_args<'a>(server: &'a str, rest: &[&'a str]) -> Vec<String> {
    let mut list = vec![
        "blackbox",
        "--login",
        "ivanov.ii",
        "--password",
        "secret123",
        "--token",
        "long-token",
        "--url",
        server,
    ];
    list.extend_from_slice(rest);
    args(&list)
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_help_lists_services() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(&["--help"], home.path());
    assert!(stdout.contains("blackbox"));
    assert!(stdout.contains("esa"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_blackbox_without_credentials_fails() {
    let home = TempDir::new().unwrap();
    let output = run_cli(&["blackbox", "profile"], home.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No login given"));
}

#[test]
fn test_blackbox_rejects_plain_http_remote_url() {
    let home = TempDir::new().unwrap();
    let output = run_cli(
        &[
            "blackbox",
            "--login",
            "a",
            "--password",
            "b",
            "--token",
            "c",
            "--url",
            "http://blackbox.example.com",
            "profile",
        ],
        home.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid BlackBox URL"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_set_then_show_redacts_secrets() {
    let home = TempDir::new().unwrap();

    run_cli_success(
        &[
            "config",
            "set",
            "--login",
            "ivanov.ii",
            "--password",
            "secret123",
            "--blackbox-token",
            "long-token",
            "--timeout",
            "15",
        ],
        home.path(),
    );
    assert!(config_path(home.path()).exists());

    let stdout = run_cli_success(&["config", "show"], home.path());
    let shown: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shown["login"], "ivanov.ii");
    assert_eq!(shown["password"], "[REDACTED]");
    assert_eq!(shown["blackbox_token"], "[REDACTED]");
    assert_eq!(shown["timeout_secs"], 15);
    assert!(!stdout.contains("secret123"));
}

#[test]
fn test_config_set_keeps_existing_values() {
    let home = TempDir::new().unwrap();
    run_cli_success(&["config", "set", "--login", "ivanov.ii"], home.path());
    run_cli_success(&["config", "set", "--timeout", "5"], home.path());

    let stdout = run_cli_success(&["config", "show"], home.path());
    let shown: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(shown["login"], "ivanov.ii");
    assert_eq!(shown["timeout_secs"], 5);
}

#[test]
fn test_config_path_prints_location() {
    let home = TempDir::new().unwrap();
    let stdout = run_cli_success(&["config", "path"], home.path());
    assert!(stdout.contains("config.json"));
}

// ============================================================================
// BlackBox
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_blackbox_profile_prints_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/graphql/schedule"))
        .and(header("authorization", "Bearer long-token"))
        .and(body_partial_json(json!({"operationName": null})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"profile": {"fullName": "Ivanov I. I."}}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_cli_async(
        blackbox_args(&server.uri(), &["--compact", "profile"]),
        home.path().to_path_buf(),
    )
    .await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let printed: Value = serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(printed["profile"]["fullName"], "Ivanov I. I.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blackbox_non_200_exits_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/graphql/schedule"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_cli_async(
        blackbox_args(&server.uri(), &["news"]),
        home.path().to_path_buf(),
    )
    .await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("returned no data"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blackbox_short_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "short-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_cli_async(
        blackbox_args(&server.uri(), &["short-token"]),
        home.path().to_path_buf(),
    )
    .await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("short-1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blackbox_lessons_substitutes_range_and_group() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/graphql/schedule"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"lessons": [{"guid": "g-1"}]}})),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = run_cli_async(
        blackbox_args(
            &server.uri(),
            &[
                "lessons",
                "--start",
                "2024-09-02T00:00:00+10:00",
                "--end",
                "2024-09-08T23:59:59+10:00",
                "--group",
                "4521",
            ],
        ),
        home.path().to_path_buf(),
    )
    .await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let query = body["query"].as_str().unwrap();
    assert!(query.contains("2024-09-02T00:00:00+10:00"));
    assert!(query.contains("2024-09-08T23:59:59+10:00"));
    assert!(query.contains("4521"));
    assert!(!query.contains("#GROUP#"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blackbox_invalid_guid_sends_nothing() {
    let server = MockServer::start().await;

    let home = TempDir::new().unwrap();
    let output = run_cli_async(
        blackbox_args(&server.uri(), &["can-feedback", "bad\"guid"]),
        home.path().to_path_buf(),
    )
    .await;

    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blackbox_uses_credentials_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/mfc/units"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let uri = server.uri();
    run_cli_success(
        &[
            "config",
            "set",
            "--login",
            "ivanov.ii",
            "--password",
            "secret123",
            "--blackbox-token",
            "stored-token",
            "--blackbox-url",
            &uri,
        ],
        home.path(),
    );

    let output = run_cli_async(args(&["blackbox", "mfc-units"]), home.path().to_path_buf()).await;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

// ============================================================================
// ESA
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_esa_token_prints_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .and(header("authorization", "Basic app-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "xyz",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let uri = server.uri();
    let output = run_cli_async(
        args(&[
            "esa",
            "token",
            "--login",
            "ivanov.ii",
            "--password",
            "secret123",
            "--app-code",
            "app-code",
            "--url",
            &uri,
        ]),
        home.path().to_path_buf(),
    )
    .await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("xyz"));
    assert!(stdout.contains("3600s"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_esa_rejected_login_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token/create/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let uri = server.uri();
    let output = run_cli_async(
        args(&[
            "esa", "token", "--login", "a", "--password", "b", "--app-code", "c", "--url", &uri,
        ]),
        home.path().to_path_buf(),
    )
    .await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("did not issue a token"));
}
