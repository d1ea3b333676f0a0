use std::path::{Path, PathBuf};
use std::process::Output;

use serde_json::{Value, json};
use tokio::process::Command;

/// Run the CLI with an isolated HOME so session storage does not leak
/// between tests or into the developer's real session.
pub async fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tripkit"))
        .args(args)
        .env("HOME", home)
        .env("XDG_DATA_HOME", home.join("data"))
        .env("TRIPKIT_API_URL", api_url)
        .env("TRIPKIT_TIMEOUT_MS", "2000")
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI with an isolated HOME and expect success.
pub async fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with an isolated HOME and expect failure; returns stderr.
pub async fn run_cli_with_env_failure(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Where the CLI keeps its session under an isolated HOME (Linux layout).
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data").join("tripkit").join("session.json")
}

/// A sign-in response carrying the given token pair.
pub fn session_body(access: &str, refresh: &str) -> Value {
    json!({
        "user_info": {"uid": "u-1", "username": "mina"},
        "auth_tokens": {
            "access_token": {"token": access},
            "refresh_token": {"token": refresh}
        }
    })
}
