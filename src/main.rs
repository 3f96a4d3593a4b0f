mod backend;
mod codec;
mod config;
mod error;
mod ethereum;
mod ffcapi;
mod rpc_server;

use backend::AlloyBackend;
use clap::Parser;
use config::{init_tracing, Config};
use ethereum::EthConnector;
use rpc_server::RpcServer;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config.log_level);

    info!(rpc_url = %config.rpc_url, "using Ethereum RPC");
    let backend = AlloyBackend::new(&config.rpc_url)?;
    let connector = Arc::new(EthConnector::new(Arc::new(backend), config.rpc_timeout()));

    // Probe the node once; the server still starts if it is not reachable yet.
    match connector.is_ready().await {
        Ok(ready) => info!(details = ?ready.downstream_details, "connected to Ethereum node"),
        Err(e) => warn!("could not reach Ethereum node, submissions will fail until it is up: {e}"),
    }

    let server = RpcServer::new(config.bind_addr, connector).await?;
    info!(
        address = %server.local_addr(),
        "connector JSON-RPC server running (send_transaction, is_live, is_ready)"
    );

    // Wait for shutdown signal
    signal::ctrl_c().await?;
    info!("shutting down server");

    server.stop().await?;
    info!("server stopped");

    Ok(())
}
