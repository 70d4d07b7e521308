//! Transport layer for RPC communication

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::SdkError;

/// Transport trait for RPC communication (object-safe)
///
/// Implementations must be shareable across concurrent callers; each
/// request is self-contained.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get the JSON `result` member.
    ///
    /// A JSON-RPC error object maps to [`SdkError::ContractCall`]; anything
    /// that prevents getting a well-formed response maps to
    /// [`SdkError::Transport`].
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError>;
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// Split a JSON-RPC response body into its result or error
pub fn parse_rpc_response(body: Value) -> Result<Value, SdkError> {
    let response: JsonRpcResponse = serde_json::from_value(body)
        .map_err(|e| SdkError::Transport(format!("Malformed JSON-RPC response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(SdkError::ContractCall {
            code: error.code,
            message: error.message,
            data: error.data.map(revert_data_to_string),
        });
    }

    response
        .result
        .ok_or_else(|| SdkError::Transport("No result in JSON-RPC response".to_string()))
}

fn revert_data_to_string(data: Value) -> String {
    match data {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Canned reply for one RPC method in [`MockTransport`]
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful `result` member
    Result(Value),
    /// JSON-RPC error object
    RpcError {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
    /// The request never produced a response
    TransportFailure(String),
}

/// A request observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// RPC method name
    pub method: String,
    /// Positional parameters
    pub params: Vec<Value>,
}

/// Mock transport for testing
///
/// Clones share the same response table and request log, so a test can keep
/// one handle for assertions after giving another to a client.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert(
            "eth_chainId".to_string(),
            MockResponse::Result(Value::String("0x1".to_string())),
        );
        defaults.insert(
            "eth_blockNumber".to_string(),
            MockResponse::Result(Value::String("0x100".to_string())), // Block 256
        );
        defaults.insert(
            "eth_call".to_string(),
            MockResponse::Result(Value::String("0x".to_string())),
        );

        Self {
            responses: Arc::new(Mutex::new(defaults)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a successful result for a specific method
    pub fn set_response(&self, method: &str, response: Value) {
        self.set(method, MockResponse::Result(response));
    }

    /// Make a method answer with a JSON-RPC error object
    pub fn set_rpc_error(&self, method: &str, code: i64, message: &str) {
        self.set(
            method,
            MockResponse::RpcError {
                code,
                message: message.to_string(),
            },
        );
    }

    /// Make a method fail at the transport level
    pub fn set_transport_failure(&self, method: &str, cause: &str) {
        self.set(method, MockResponse::TransportFailure(cause.to_string()));
    }

    /// Requests seen so far, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    fn set(&self, method: &str, response: MockResponse) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        self.requests
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(RecordedRequest {
                method: method.to_string(),
                params,
            });

        let response = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        match response {
            Some(MockResponse::Result(value)) => Ok(value),
            Some(MockResponse::RpcError { code, message }) => Err(SdkError::ContractCall {
                code,
                message,
                data: None,
            }),
            Some(MockResponse::TransportFailure(cause)) => Err(SdkError::Transport(cause)),
            None => Err(SdkError::ContractCall {
                code: -32601,
                message: format!("Method not found: {}", method),
                data: None,
            }),
        }
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport with no request deadline
    pub fn new(url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create a new HTTP transport whose requests fail after `timeout`
    pub fn with_timeout(url: &str, timeout: std::time::Duration) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, url))
    }

    fn with_client(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let id = self.next_id();
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(id, method, url = %self.url, "sending JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(format!("HTTP {}: {}", status, e)))?;

        parse_rpc_response(body)
    }
}
