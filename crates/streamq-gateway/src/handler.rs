//! Query handling and HTTP status mapping

use std::str::FromStr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use streamq_sdk::{SdkError, StreamTokenQuery};

/// Body of `POST /query`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// `"balance"` or `"canStream"`
    #[serde(default)]
    pub operation: Option<String>,
    /// Account to query
    #[serde(default)]
    pub address: Option<String>,
    /// Content identifier, required for `canStream`
    #[serde(default)]
    pub content_id: Option<String>,
}

/// Supported query operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Token balance lookup
    Balance,
    /// Streaming permission check
    CanStream,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balance" => Ok(Operation::Balance),
            "canStream" => Ok(Operation::CanStream),
            other => Err(format!("Unknown operation: {}", other)),
        }
    }
}

/// Status plus JSON body, independent of the HTTP framework
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body
    pub body: Value,
}

impl QueryResponse {
    /// 200 with `body`
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// `{"error": message}` with `status`
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

impl IntoResponse for QueryResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Dispatch a `POST /query` body
pub async fn handle_query(query: &StreamTokenQuery, request: QueryRequest) -> QueryResponse {
    let operation = match request.operation.as_deref() {
        Some(op) if !op.is_empty() => op,
        _ => return QueryResponse::error(StatusCode::BAD_REQUEST, "Missing operation parameter"),
    };

    match operation.parse::<Operation>() {
        Ok(Operation::Balance) => token_balance(query, request.address.as_deref()).await,
        Ok(Operation::CanStream) => {
            can_stream(
                query,
                request.address.as_deref(),
                request.content_id.as_deref(),
            )
            .await
        }
        Err(message) => QueryResponse::error(StatusCode::BAD_REQUEST, message),
    }
}

/// Token balance of `address`, as `{address, balance}`
pub async fn token_balance(query: &StreamTokenQuery, address: Option<&str>) -> QueryResponse {
    tracing::info!("Received request to get token balance");

    let address = match address {
        Some(a) if !a.is_empty() => a,
        _ => return QueryResponse::error(StatusCode::BAD_REQUEST, "Missing address parameter"),
    };

    match query.get_token_balance(address).await {
        Ok(balance) => QueryResponse::ok(json!({
            "address": address,
            "balance": balance.to_string(),
        })),
        Err(e) => error_response("Error retrieving token balance", e),
    }
}

/// Streaming permission of `address` for `content_id`, as `{allowed}`
pub async fn can_stream(
    query: &StreamTokenQuery,
    address: Option<&str>,
    content_id: Option<&str>,
) -> QueryResponse {
    tracing::info!("Received request to check stream access");

    let address = match address {
        Some(a) if !a.is_empty() => a,
        _ => return QueryResponse::error(StatusCode::BAD_REQUEST, "Missing address parameter"),
    };
    let content_id = match content_id {
        Some(c) if !c.is_empty() => c,
        _ => return QueryResponse::error(StatusCode::BAD_REQUEST, "Missing contentId parameter"),
    };

    match query.can_stream_content(address, content_id).await {
        Ok(allowed) => QueryResponse::ok(json!({ "allowed": allowed })),
        Err(e) => error_response("Error checking stream access", e),
    }
}

/// Liveness of the RPC node, as `{status, blockNumber}`
pub async fn health(query: &StreamTokenQuery) -> QueryResponse {
    match query.client().block_number().await {
        Ok(block_number) => QueryResponse::ok(json!({
            "status": "ok",
            "blockNumber": block_number,
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            QueryResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error reaching RPC node: {}", e),
            )
        }
    }
}

/// Caller errors are 400, everything else 500 prefixed with `context`
fn error_response(context: &str, error: SdkError) -> QueryResponse {
    match error {
        SdkError::InvalidAddress(_) => {
            QueryResponse::error(StatusCode::BAD_REQUEST, "Invalid Ethereum address format")
        }
        e if e.is_caller_error() => QueryResponse::error(StatusCode::BAD_REQUEST, e.to_string()),
        e => {
            tracing::error!("{}: {}", context, e);
            QueryResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {}", context, e),
            )
        }
    }
}
