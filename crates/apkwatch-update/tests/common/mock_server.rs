//! Mock server helpers for version checks and artifact downloads
//!
//! Provides utilities for setting up wiremock mock servers with the response
//! patterns the endpoints and CDNs produce.

use serde_json::{json, Value};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::constants::ARTIFACT_PATH_TRUNCATED;

/// Build a successful version envelope
pub fn version_body(version: &str, url: &str) -> Value {
    json!({
        "success": true,
        "value": {
            "version": version,
            "url": url
        }
    })
}

/// Full URL for a path on the mock server
pub fn server_url(server: &MockServer, path: &str) -> String {
    format!("{}{}", server.uri(), path)
}

/// Serve a version envelope pointing at an artifact on the same server
pub async fn mock_version_endpoint(
    server: &MockServer,
    api_path: &str,
    version: &str,
    artifact_path: &str,
) {
    let url = server_url(server, artifact_path);
    mock_version_json(server, api_path, version_body(version, &url)).await;
}

/// Serve an arbitrary JSON body on a version endpoint
pub async fn mock_version_json(server: &MockServer, api_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve a raw text body on a version endpoint
pub async fn mock_version_raw(server: &MockServer, api_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serve an artifact
pub async fn mock_artifact(server: &MockServer, artifact_path: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(artifact_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Serve an artifact and verify the number of requests when the server drops
pub async fn mock_artifact_expect(
    server: &MockServer,
    artifact_path: &str,
    content: &[u8],
    expected_calls: u64,
) {
    Mock::given(method("GET"))
        .and(path(artifact_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Respond with a status code and no body
pub async fn mock_status(server: &MockServer, any_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(any_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Respond only after a delay
pub async fn mock_slow(server: &MockServer, any_path: &str, body: &[u8], delay: Duration) {
    Mock::given(method("GET"))
        .and(path(any_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Serve one response that announces `announced` bytes but closes the
/// connection after sending `body`
///
/// wiremock always sends complete bodies, so this uses a raw socket.
pub async fn serve_truncated_body(body: &'static [u8], announced: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind truncated-body server");
    let addr = listener.local_addr().expect("local address");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        // Consume the whole request head so closing does not reset early
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\n\r\n",
            announced
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.write_all(body).await;
        let _ = socket.flush().await;
        // Dropping the socket closes the connection mid-body
    });

    format!("http://{}{}", addr, ARTIFACT_PATH_TRUNCATED)
}
