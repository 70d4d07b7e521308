//! RpcClient - read-only JSON-RPC client

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use streamq_primitives::Address;

use crate::transport::Transport;
use crate::types::{BlockId, CallRequest};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Read-only RPC client.
///
/// Holds the one shared transport handle. Cloning is cheap and every clone
/// talks through the same transport, so build it once at startup and hand
/// clones to whoever needs one.
#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn Transport>,
}

impl RpcClient {
    /// Create a client with HTTP transport
    #[cfg(feature = "http")]
    pub fn http(url: &str) -> Self {
        Self::with_transport(HttpTransport::new(url))
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Create a client over an already shared transport
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Helper method to make an RPC request that returns a hex string
    async fn request_string(&self, method: &str, params: Vec<Value>) -> Result<String, SdkError> {
        match self.transport.request_json(method, params).await {
            Ok(Value::String(s)) => Ok(s),
            Ok(other) => Err(SdkError::Transport(format!(
                "{} returned a non-string result: {}",
                method, other
            ))),
            Err(e) => {
                if let SdkError::ContractCall { code, message, .. } = &e {
                    tracing::warn!(method, code, %message, "node rejected request");
                }
                Err(e)
            }
        }
    }

    /// Get the chain ID
    pub async fn chain_id(&self) -> Result<u64, SdkError> {
        let result = self.request_string("eth_chainId", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<u64, SdkError> {
        let result = self.request_string("eth_blockNumber", vec![]).await?;
        parse_hex_u64(&result)
    }

    /// Execute a read-only call against `contract`.
    ///
    /// An empty payload is reported as [`SdkError::EmptyResult`], never as
    /// zero-length data.
    pub async fn call(
        &self,
        contract: &Address,
        data: &[u8],
        block: BlockId,
    ) -> Result<Bytes, SdkError> {
        let request = CallRequest {
            to: Some(*contract),
            data: Some(Bytes::copy_from_slice(data)),
            ..Default::default()
        };
        let result = self
            .request_string(
                "eth_call",
                vec![serde_json::to_value(&request)?, serde_json::to_value(block)?],
            )
            .await?;

        let bytes = parse_hex_bytes(&result)?;
        if bytes.is_empty() {
            return Err(SdkError::EmptyResult);
        }
        Ok(bytes)
    }
}

// ==================== Helper Functions ====================

fn parse_hex_u64(s: &str) -> Result<u64, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(s, 16)
        .map_err(|e| SdkError::Transport(format!("Invalid hex quantity {:?}: {}", s, e)))
}

fn parse_hex_bytes(s: &str) -> Result<Bytes, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes =
        hex::decode(s).map_err(|e| SdkError::Transport(format!("Invalid hex data: {}", e)))?;
    Ok(Bytes::from(bytes))
}
