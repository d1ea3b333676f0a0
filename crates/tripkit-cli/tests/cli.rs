//! End-to-end CLI tests against a mock backend.
//!
//! Each test gets its own HOME so the stored session is isolated.

mod common;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

const EXPIRED: &str = "authorization failed: Token is expired";

async fn sign_in(server: &MockServer, home: &TempDir, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/google/sign"))
        .and(body_json(json!({"id_token": "google-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body(access, refresh)))
        .mount(server)
        .await;

    let stdout = run_cli_with_env_success(
        &[
            "auth",
            "sign-in",
            "--provider",
            "google",
            "--id-token",
            "google-token",
        ],
        home.path(),
        &server.uri(),
    )
    .await;
    assert!(stdout.contains("Signed in successfully"));
    assert!(stdout.contains("mina"));
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("pong")))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_with_env_success(&["ping"], home.path(), &server.uri()).await;
    assert!(stdout.contains("reachable"));
    assert!(stdout.contains("pong"));
}

#[tokio::test]
async fn test_commands_require_session() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let stderr =
        run_cli_with_env_failure(&["auth", "whoami"], home.path(), &server.uri()).await;
    assert!(stderr.contains("No active session"));

    let stderr = run_cli_with_env_failure(&["trip", "list"], home.path(), &server.uri()).await;
    assert!(stderr.contains("No active session"));
}

#[tokio::test]
async fn test_invalid_api_url() {
    let home = TempDir::new().unwrap();

    let stderr = run_cli_with_env_failure(&["ping"], home.path(), "ftp://example.com").await;
    assert!(stderr.contains("Invalid API URL"));
}

#[tokio::test]
async fn test_sign_in_then_list_trips() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    sign_in(&server, &home, "A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/platform/session"))
        .and(header("authorization", "Bearer A1"))
        .and(header("x-refresh-token", "R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"session_id": "trip-1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_with_env_success(&["trip", "list"], home.path(), &server.uri()).await;
    assert!(stdout.contains("trip-1"));

    let stdout = run_cli_with_env_success(&["auth", "whoami"], home.path(), &server.uri()).await;
    assert!(stdout.contains("mina"));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_persisted() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    sign_in(&server, &home, "A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/platform/budget/list"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": EXPIRED})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refreshToken"))
        .and(header("x-refresh-token", "R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": {"token": "A2"},
            "refresh_token": {"token": "R2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/platform/budget/list"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"title": "Hotel"}])))
        .expect(2)
        .mount(&server)
        .await;

    let stdout = run_cli_with_env_success(&["budget", "list"], home.path(), &server.uri()).await;
    assert!(stdout.contains("Hotel"));

    // The next invocation starts from the rotated pair on disk.
    run_cli_with_env_success(&["budget", "list"], home.path(), &server.uri()).await;

    if cfg!(target_os = "linux") {
        let stored = std::fs::read_to_string(session_file(home.path())).unwrap();
        assert!(stored.contains("A2"));
        assert!(stored.contains("mina"));
    }
}

#[tokio::test]
async fn test_refresh_failure_signs_out() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    sign_in(&server, &home, "A1", "R1").await;

    Mock::given(method("GET"))
        .and(path("/platform/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": EXPIRED})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refreshToken"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "authorization failed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let stderr = run_cli_with_env_failure(&["trip", "list"], home.path(), &server.uri()).await;
    assert!(stderr.contains("tripkit auth sign-in"));

    let stderr =
        run_cli_with_env_failure(&["auth", "whoami"], home.path(), &server.uri()).await;
    assert!(stderr.contains("No active session"));
}

#[tokio::test]
async fn test_duplicate_location_is_a_notice() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    sign_in(&server, &home, "A1", "R1").await;

    Mock::given(method("PUT"))
        .and(path("/platform/location"))
        .and(body_json(json!({"session_id": "trip-1", "place_id": "p-1"})))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "duplicate"})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli_with_env(
        &[
            "location",
            "add",
            "--session-id",
            "trip-1",
            "--place-id",
            "p-1",
        ],
        home.path(),
        &server.uri(),
    )
    .await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already saved"));
}

#[tokio::test]
async fn test_create_trip_sends_unix_millis() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    sign_in(&server, &home, "A1", "R1").await;

    Mock::given(method("PUT"))
        .and(path("/platform/session"))
        .and(body_json(json!({
            "country_codes": ["KR", "JP"],
            "start_at": 1_709_251_200_000_i64,
            "end_at": 1_709_510_400_000_i64
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("trip-9")))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_with_env_success(
        &[
            "trip",
            "create",
            "--country",
            "KR",
            "--country",
            "JP",
            "--start",
            "2024-03-01",
            "--end",
            "2024-03-04",
        ],
        home.path(),
        &server.uri(),
    )
    .await;
    assert!(stdout.contains("trip-9"));
}

#[tokio::test]
async fn test_sign_out_removes_session() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    sign_in(&server, &home, "A1", "R1").await;
    run_cli_with_env_success(&["auth", "sign-out"], home.path(), &server.uri()).await;

    let stderr =
        run_cli_with_env_failure(&["auth", "whoami"], home.path(), &server.uri()).await;
    assert!(stderr.contains("No active session"));
}
