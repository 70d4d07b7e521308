//! Route tests: the axum router driven by a mock RPC node

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use streamq_gateway::{build_router, ServerConfig};
use streamq_sdk::{Address, MockTransport, RpcClient, StreamTokenQuery};
use tower::ServiceExt;

const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
const HOLDER: &str = "0xAbCd000000000000000000000000000000001234";

fn app() -> (MockTransport, Router) {
    let transport = MockTransport::new();
    let client = RpcClient::with_transport(transport.clone());
    let query = StreamTokenQuery::new(client, Address::parse_canonical(TOKEN).unwrap());
    (transport, build_router(&ServerConfig::default(), Arc::new(query)))
}

fn word(last: &[u8]) -> Value {
    let mut word = [0u8; 32];
    word[32 - last.len()..].copy_from_slice(last);
    json!(format!("0x{}", hex::encode(word)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let cors = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap(), cors)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "http://player.example")
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://player.example")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ==================== Balance Route Tests ====================

#[tokio::test]
async fn test_balance_ok() {
    let (transport, app) = app();
    // 10^18
    transport.set_response("eth_call", word(&[0x0d, 0xe0, 0xb6, 0xb3, 0xa7, 0x64, 0x00, 0x00]));

    let (status, body, cors) = send(app, get(&format!("/balance/{}", HOLDER))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"address": HOLDER, "balance": "1000000000000000000"}));
    assert_eq!(cors.as_deref(), Some("*"));
}

#[tokio::test]
async fn test_balance_invalid_address() {
    let (transport, app) = app();

    let (status, body, _) = send(app, get("/balance/0x1234")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid Ethereum address format");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_balance_revert_is_500() {
    let (transport, app) = app();
    transport.set_rpc_error("eth_call", 3, "execution reverted");

    let (status, body, _) = send(app, get(&format!("/balance/{}", HOLDER))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error retrieving token balance: "));
    assert!(message.contains("execution reverted"));
}

#[tokio::test]
async fn test_balance_empty_result_is_500() {
    let (transport, app) = app();
    transport.set_response("eth_call", json!("0x"));

    let (status, _, _) = send(app, get(&format!("/balance/{}", HOLDER))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== Stream Permission Route Tests ====================

#[tokio::test]
async fn test_can_stream_ok() {
    let (transport, app) = app();
    transport.set_response("eth_call", word(&[1]));

    let (status, body, _) = send(app, get(&format!("/can-stream/{}/content_001", HOLDER))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"allowed": true}));
}

#[tokio::test]
async fn test_can_stream_transport_failure() {
    let (transport, app) = app();
    transport.set_transport_failure("eth_call", "connection refused");

    let (status, body, _) = send(app, get(&format!("/can-stream/{}/content_001", HOLDER))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Error checking stream access: "));
}

// ==================== Query Route Tests ====================

#[tokio::test]
async fn test_query_balance() {
    let (transport, app) = app();
    transport.set_response("eth_call", word(&[0x2a]));

    let (status, body, _) = send(
        app,
        post_json("/query", json!({"operation": "balance", "address": HOLDER})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], "42");
}

#[tokio::test]
async fn test_query_can_stream_false() {
    let (transport, app) = app();
    transport.set_response("eth_call", word(&[0]));

    let (status, body, _) = send(
        app,
        post_json(
            "/query",
            json!({"operation": "canStream", "address": HOLDER, "contentId": "content_001"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"allowed": false}));
}

#[tokio::test]
async fn test_query_caller_errors() {
    let cases = [
        (json!({"address": HOLDER}), "Missing operation parameter"),
        (json!({"operation": "transfer", "address": HOLDER}), "Unknown operation: transfer"),
        (json!({"operation": "balance"}), "Missing address parameter"),
        (json!({"operation": "balance", "address": ""}), "Missing address parameter"),
        (json!({"operation": "canStream", "address": HOLDER}), "Missing contentId parameter"),
        (
            json!({"operation": "canStream", "address": "0x12", "contentId": "c"}),
            "Invalid Ethereum address format",
        ),
    ];

    for (request, expected) in cases {
        let (transport, app) = app();
        let (status, body, _) = send(app, post_json("/query", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], expected);
        assert_eq!(transport.request_count(), 0);
    }
}

// ==================== Health Route Tests ====================

#[tokio::test]
async fn test_health_ok() {
    let (_, app) = app();

    let (status, body, _) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "blockNumber": 256}));
}

#[tokio::test]
async fn test_health_node_down() {
    let (transport, app) = app();
    transport.set_transport_failure("eth_blockNumber", "connection refused");

    let (status, body, _) = send(app, get("/health")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("connection refused"));
}
