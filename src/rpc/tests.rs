//! Tests for the node ABI providers

use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use super::*;

/// Serve one canned HTTP response per connection, returning request bodies
async fn fake_node(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut bodies = Vec::new();
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            bodies.push(read_request_body(&mut socket).await);
            let response = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        bodies
    });
    (format!("http://{}", addr), handle)
}

async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let body_start = end + 4;
            if buf.len() >= body_start + length {
                return String::from_utf8_lossy(&buf[body_start..body_start + length]).into_owned();
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn provider_for(url: &str) -> HttpAbiProvider {
    let config = DecoderConfig::default()
        .with_node_url(url)
        .with_timeout(Duration::from_secs(5));
    HttpAbiProvider::new(&config).unwrap()
}

#[test]
fn test_endpoint_trims_trailing_slash() {
    let provider = provider_for("http://127.0.0.1:8888/");
    assert_eq!(provider.endpoint(), "http://127.0.0.1:8888/v1/chain/get_abi");
}

#[tokio::test]
async fn test_fetch_abi_success() {
    let body = json!({
        "account_name": "eosio.token",
        "abi": {
            "version": "eosio::abi/1.1",
            "structs": [{ "name": "close", "base": "", "fields": [{ "name": "owner", "type": "name" }] }],
            "actions": [{ "name": "close", "type": "close", "ricardian_contract": "" }]
        }
    });
    let (url, server) = fake_node(vec![(200, body.to_string())]).await;

    let abi = provider_for(&url).fetch_abi("eosio.token").await.unwrap();

    assert_eq!(abi.version, "eosio::abi/1.1");
    assert!(abi.find_action("close").is_some());
    let requests = server.await.unwrap();
    let request: serde_json::Value = serde_json::from_str(&requests[0]).unwrap();
    assert_eq!(request, json!({ "account_name": "eosio.token" }));
}

#[tokio::test]
async fn test_fetch_abi_account_without_contract() {
    let (url, _server) = fake_node(vec![(200, json!({ "account_name": "alice" }).to_string())]).await;

    let result = provider_for(&url).fetch_abi("alice").await;
    assert!(matches!(result, Err(DecodeError::AbiNotFound(account)) if account == "alice"));
}

#[tokio::test]
async fn test_fetch_abi_http_error() {
    let (url, _server) = fake_node(vec![(500, json!({ "code": 500 }).to_string())]).await;

    let result = provider_for(&url).fetch_abi("eosio").await;
    assert!(matches!(result, Err(DecodeError::AbiFetch { .. })));
}

#[tokio::test]
async fn test_fetch_abi_malformed_body() {
    let (url, _server) = fake_node(vec![(200, "not json".to_string())]).await;

    let result = provider_for(&url).fetch_abi("eosio").await;
    assert!(matches!(result, Err(DecodeError::AbiFetch { .. })));
}

#[tokio::test]
async fn test_fetch_abi_unreachable_node() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = provider_for(&format!("http://{}", addr)).fetch_abi("eosio").await;
    assert!(matches!(result, Err(DecodeError::AbiFetch { .. })));
}

#[tokio::test]
async fn test_memory_provider_counts_fetches() {
    let provider = MemoryAbiProvider::new().with_abi("eosio", AbiDocument::default());

    assert!(provider.fetch_abi("eosio").await.is_ok());
    assert!(matches!(provider.fetch_abi("nobody").await, Err(DecodeError::AbiNotFound(_))));
    assert_eq!(provider.fetch_count(), 2);
}
