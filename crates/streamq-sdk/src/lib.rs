//! # streamq-sdk
//!
//! Read-only query client for the streaming token contract.
//!
//! ## Features
//!
//! - **ABI**: Solidity ABI encoding and decoding
//! - **RpcClient**: `eth_call` over a shared, injected transport
//! - **Contract**: Helpers for encoding/decoding contract calls
//! - **StreamTokenQuery**: Named queries (balance, streaming permission, ...)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use streamq_sdk::{Address, HttpTransport, RpcClient, StreamTokenQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // One transport for the whole process
//!     let client = RpcClient::with_transport(HttpTransport::new("http://localhost:8545"));
//!
//!     let token = Address::parse_canonical("0x5FbDB2315678afecb367f032d93F642f64180aa3")?;
//!     let query = StreamTokenQuery::new(client, token);
//!
//!     let balance = query
//!         .get_token_balance("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
//!         .await?;
//!     println!("Balance: {}", balance);
//!
//!     let allowed = query
//!         .can_stream_content("0x70997970C51812dc3A010C7d01b50e0d17dc79C8", "content_001")
//!         .await?;
//!     println!("Can stream: {}", allowed);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! ```rust
//! use serde_json::json;
//! use streamq_sdk::{Address, MockTransport, RpcClient, SdkError, StreamTokenQuery};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let transport = MockTransport::new();
//! transport.set_response("eth_call", json!("0x"));
//!
//! let client = RpcClient::with_transport(transport.clone());
//! let query = StreamTokenQuery::new(client, Address::ZERO);
//!
//! let result = query
//!     .get_token_balance("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
//!     .await;
//! assert!(matches!(result, Err(SdkError::EmptyResult)));
//! assert_eq!(transport.request_count(), 1);
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod client;
pub mod contract;
mod error;
mod query;
mod transport;
pub mod types;

// Re-export main types
pub use client::RpcClient;
pub use error::SdkError;
pub use query::StreamTokenQuery;
pub use transport::{parse_rpc_response, MockResponse, MockTransport, RecordedRequest};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use streamq_primitives::{Address, H256, U256};
