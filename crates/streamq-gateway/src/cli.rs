//! CLI argument parsing for streamq-gateway

use clap::Parser;
use std::path::PathBuf;

/// HTTP gateway for streaming token queries
#[derive(Parser, Debug, Clone)]
#[command(name = "streamq-gateway")]
#[command(about = "HTTP gateway for streaming token queries")]
#[command(version)]
pub struct Cli {
    /// TOML config file (optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint URL (overrides WEB3_PROVIDER_URL)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Token contract address (overrides TOKEN_CONTRACT_ADDRESS)
    #[arg(long)]
    pub contract: Option<String>,

    /// HTTP listen address (overrides GATEWAY_LISTEN_ADDR)
    #[arg(long)]
    pub listen: Option<String>,

    /// Per-request RPC timeout in seconds, 0 to disable
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Block to query: latest, pending, finalized, or a number
    #[arg(long)]
    pub block: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
