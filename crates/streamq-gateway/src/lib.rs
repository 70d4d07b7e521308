//! # streamq-gateway
//!
//! HTTP front end for the streaming token query facade.
//!
//! ## Routes
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /balance/:address` | `{address, balance}` |
//! | `GET /can-stream/:address/:content_id` | `{allowed}` |
//! | `POST /query` | either of the above, by `operation` |
//! | `GET /health` | `{status, blockNumber}` |
//!
//! Errors are `{error}` with status 400 for bad input and 500 for anything
//! that went wrong past validation.
//!
//! ## Usage
//!
//! ```no_run
//! use streamq_gateway::{GatewayServer, ServerConfig};
//! use streamq_sdk::{Address, HttpTransport, RpcClient, StreamTokenQuery};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RpcClient::with_transport(HttpTransport::new("http://localhost:8545"));
//! let token = Address::parse_canonical("0x5FbDB2315678afecb367f032d93F642f64180aa3")?;
//! let query = StreamTokenQuery::new(client, token);
//!
//! let server = GatewayServer::new(ServerConfig::default(), query);
//! server.run(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;

// Re-export main types
pub use cli::Cli;
pub use config::{GatewayConfig, GatewaySettings};
pub use error::{ConfigError, GatewayError, GatewayResult};
pub use handler::{handle_query, QueryRequest, QueryResponse};
pub use server::{build_router, GatewayServer, ServerConfig};
