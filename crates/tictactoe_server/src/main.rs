//! Tic-tac-toe server - unified CLI
//!
//! Serves the game registry over HTTP or MCP.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use rmcp::ServiceExt;
use std::path::Path;
use std::sync::Arc;
use tictactoe_core::GameRegistry;
use tictactoe_server::{GameServer, ServerConfig, init_tracing, router};
use tracing::{info, instrument, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Http {
            host,
            port,
            config,
            debug,
        } => {
            let config = load_config(&config, host, port, debug)?;
            init_tracing(config.effective_log_filter());
            info!(config = ?config, "Configuration loaded");
            run_http_server(config).await
        }
        Command::Mcp { config, debug } => {
            let config = load_config(&config, None, None, debug)?;
            init_tracing(config.effective_log_filter());
            info!(config = ?config, "Configuration loaded");
            run_mcp_server(config).await
        }
    }
}

/// Reads the config file and layers CLI/env overrides on top.
fn load_config(
    path: &Path,
    host: Option<String>,
    port: Option<u16>,
    verbose: bool,
) -> Result<ServerConfig> {
    Ok(ServerConfig::load_or_default(path)?.with_overrides(host, port, verbose))
}

/// Run the HTTP game server
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!("Starting tic-tac-toe HTTP server");

    let registry = Arc::new(GameRegistry::new());
    let app = router(registry);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run the MCP game server (stdio mode)
///
/// Only the logging settings of `config` apply; stdio has no address.
#[instrument(skip_all, fields(log_filter = config.effective_log_filter()))]
async fn run_mcp_server(config: ServerConfig) -> Result<()> {
    info!("Starting tic-tac-toe MCP server");

    let server = GameServer::new(Arc::new(GameRegistry::new()));

    info!("Server ready - connect via MCP protocol");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
