//! streamq gateway binary
//!
//! Serves streaming token queries over HTTP.

use anyhow::{Context, Result};
use streamq_gateway::{Cli, GatewayConfig, GatewayServer, ServerConfig};
use streamq_sdk::{HttpTransport, RpcClient, StreamTokenQuery};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(cli.log_json.then(|| fmt::layer().json()))
        .with((!cli.log_json).then(fmt::layer))
        .with(filter)
        .init();

    tracing::info!("streamq gateway starting...");

    let settings = GatewayConfig::load(&cli, |key| std::env::var(key).ok())
        .context("invalid gateway configuration")?;

    // One transport for the life of the process
    let transport = match settings.request_timeout {
        Some(timeout) => HttpTransport::with_timeout(&settings.rpc_url, timeout)?,
        None => HttpTransport::new(&settings.rpc_url),
    };
    let client = RpcClient::with_transport(transport);
    let query = StreamTokenQuery::new(client, settings.contract_address).with_block(settings.block);

    tracing::info!(
        rpc_url = %settings.rpc_url,
        contract = %settings.contract_address,
        "Querying token contract"
    );

    let server = GatewayServer::new(ServerConfig::new(settings.listen_addr), query);
    server
        .run(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("streamq gateway stopped");

    Ok(())
}
